use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::prompts::models::Prompt;
use crate::shared::pagination::{
    default_page, default_page_size, page_limit, page_offset, SortDirection,
};
use crate::shared::status::RecordStatus;
use crate::shared::templating::placeholders;

// Query params for listing prompts
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct PromptQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Search in name, description, or template
    pub search: Option<String>,

    /// Filter by status (none = all)
    pub status: Option<RecordStatus>,

    /// Sort direction (default: desc by created_at)
    #[serde(default)]
    pub sort: SortDirection,
}

impl PromptQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }

    /// ILIKE pattern for the search term, if any. Wildcards in the term match literally.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn validate_has_text(dto: &CreatePromptDto) -> Result<(), ValidationError> {
    let blank = |s: &Option<String>| s.as_deref().is_none_or(|t| t.trim().is_empty());
    if blank(&dto.template) && blank(&dto.content) {
        let mut err = ValidationError::new("template_or_content");
        err.message = Some("either template or content must be provided".into());
        return Err(err);
    }
    Ok(())
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_has_text"))]
pub struct CreatePromptDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,

    /// Template with `{{placeholder}}` tokens
    pub template: Option<String>,

    /// Fallback text used when `template` is empty
    pub content: Option<String>,

    pub system_prompt: Option<String>,

    /// Defaults to `active`, which makes this the prompt used for new responses
    pub status: Option<RecordStatus>,

    pub model_id: Uuid,

    pub knowledge_base_id: Option<Uuid>,
}

// Update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePromptDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,

    /// Reset the description to empty (takes precedence over `description`)
    #[serde(default)]
    pub clear_description: bool,

    pub template: Option<String>,

    pub content: Option<String>,

    pub system_prompt: Option<String>,

    /// Remove the system prompt (takes precedence over `system_prompt`)
    #[serde(default)]
    pub clear_system_prompt: bool,

    pub status: Option<RecordStatus>,

    pub model_id: Option<Uuid>,

    pub knowledge_base_id: Option<Uuid>,

    /// Unlink the knowledge base (takes precedence over `knowledge_base_id`)
    #[serde(default)]
    pub detach_knowledge_base: bool,
}

// Response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct PromptResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub template: String,
    pub content: String,
    pub system_prompt: Option<String>,
    pub status: RecordStatus,
    pub model_id: Uuid,
    pub knowledge_base_id: Option<Uuid>,
    /// Placeholder paths used by the effective template
    pub variables: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Prompt> for PromptResponseDto {
    fn from(p: Prompt) -> Self {
        let variables = placeholders(p.effective_template());
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            template: p.template,
            content: p.content,
            system_prompt: p.system_prompt,
            status: p.status,
            model_id: p.model_id,
            knowledge_base_id: p.knowledge_base_id,
            variables,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Placeholders a stored prompt expects
#[derive(Debug, Serialize, ToSchema)]
pub struct PromptVariablesDto {
    pub prompt_id: Uuid,
    /// Placeholders in the effective template (`template`, or `content` as fallback)
    pub template_variables: Vec<String>,
    /// Placeholders in the system prompt
    pub system_prompt_variables: Vec<String>,
}

impl From<&Prompt> for PromptVariablesDto {
    fn from(p: &Prompt) -> Self {
        Self {
            prompt_id: p.id,
            template_variables: placeholders(p.effective_template()),
            system_prompt_variables: p
                .effective_system_prompt()
                .map(placeholders)
                .unwrap_or_default(),
        }
    }
}

/// Render an unsaved template against a sample context
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PreviewTemplateDto {
    #[validate(length(min = 1, max = 100000))]
    pub template: String,

    /// Sample variables, nested objects allowed
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewTemplateResponseDto {
    pub rendered: String,
    pub variables: Vec<String>,
    /// Placeholders left literal because the context has no value for them
    pub unresolved: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn create_dto(template: Option<&str>, content: Option<&str>) -> CreatePromptDto {
        CreatePromptDto {
            name: "Front desk".to_string(),
            description: None,
            template: template.map(str::to_string),
            content: content.map(str::to_string),
            system_prompt: None,
            status: None,
            model_id: Uuid::new_v4(),
            knowledge_base_id: None,
        }
    }

    #[test]
    fn test_create_requires_template_or_content() {
        assert_err!(create_dto(None, None).validate());
        assert_err!(create_dto(Some("  "), Some("")).validate());
        assert_ok!(create_dto(Some("Hi {{user_message}}"), None).validate());
        assert_ok!(create_dto(None, Some("Hello")).validate());
    }

    #[test]
    fn test_search_pattern_ignores_blank() {
        let mut params: PromptQueryParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.search_pattern(), None);

        params.search = Some("  ".to_string());
        assert_eq!(params.search_pattern(), None);

        params.search = Some(" pool ".to_string());
        assert_eq!(params.search_pattern(), Some("%pool%".to_string()));
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let mut params: PromptQueryParams = serde_json::from_str("{}").unwrap();

        params.search = Some("50%".to_string());
        assert_eq!(params.search_pattern(), Some(r"%50\%%".to_string()));

        params.search = Some(r"room_1\a".to_string());
        assert_eq!(params.search_pattern(), Some(r"%room\_1\\a%".to_string()));
    }

    #[test]
    fn test_update_detach_defaults_to_false() {
        let dto: UpdatePromptDto = serde_json::from_str(r#"{"name": "Renamed"}"#).unwrap();
        assert!(!dto.detach_knowledge_base);
        assert!(!dto.clear_description);
        assert!(!dto.clear_system_prompt);
        assert_eq!(dto.name.as_deref(), Some("Renamed"));
    }

    #[test]
    fn test_update_clear_flags() {
        let dto: UpdatePromptDto = serde_json::from_str(
            r#"{"clear_system_prompt": true, "clear_description": true, "system_prompt": "kept?"}"#,
        )
        .unwrap();
        assert!(dto.clear_system_prompt);
        assert!(dto.clear_description);
        assert_eq!(dto.system_prompt.as_deref(), Some("kept?"));
    }
}
