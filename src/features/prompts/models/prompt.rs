use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::status::RecordStatus;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Prompt {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Template with `{{placeholder}}` tokens; may be empty
    pub template: String,
    /// Fallback template text used when `template` is empty
    pub content: String,
    pub system_prompt: Option<String>,
    pub status: RecordStatus,
    pub model_id: Uuid,
    pub knowledge_base_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prompt {
    /// The text to substitute: `template`, or `content` when the template is blank
    pub fn effective_template(&self) -> &str {
        if self.template.trim().is_empty() {
            &self.content
        } else {
            &self.template
        }
    }

    /// The system prompt, if set to something other than whitespace
    pub fn effective_system_prompt(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}
