use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::status::RecordStatus;

/// Database model for a configured AI model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AiModel {
    pub id: Uuid,
    pub name: String,
    /// Vendor name shown in the admin UI (e.g. "openai")
    pub provider: String,
    /// Identifier understood by the generation function (e.g. "gpt-4o-mini")
    pub model_identifier: String,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
