use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::ai_models::models::AiModel;
use crate::shared::pagination::{default_page, default_page_size, page_limit, page_offset};
use crate::shared::status::RecordStatus;

// Query params for listing models
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct AiModelQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Filter by status (none = all)
    pub status: Option<RecordStatus>,
}

impl AiModelQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAiModelDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub provider: String,

    #[validate(length(min = 1, max = 200))]
    pub model_identifier: String,

    pub description: Option<String>,

    /// Defaults to `active`
    pub status: Option<RecordStatus>,
}

// Update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAiModelDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub provider: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub model_identifier: Option<String>,

    pub description: Option<String>,

    pub status: Option<RecordStatus>,
}

// Response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct AiModelResponseDto {
    pub id: Uuid,
    pub name: String,
    pub provider: String,
    pub model_identifier: String,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AiModel> for AiModelResponseDto {
    fn from(m: AiModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            provider: m.provider,
            model_identifier: m.model_identifier,
            description: m.description,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_rejects_blank_fields() {
        let dto = CreateAiModelDto {
            name: String::new(),
            provider: "openai".to_string(),
            model_identifier: "gpt-4o-mini".to_string(),
            description: None,
            status: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_query_params_status_filter_parses() {
        let params: AiModelQueryParams =
            serde_json::from_str(r#"{"status": "inactive", "page": 2}"#).unwrap();
        assert_eq!(params.status, Some(RecordStatus::Inactive));
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 10);
    }
}
