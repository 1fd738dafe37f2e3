use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a suggested next question shown after a response
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    pub id: Uuid,
    /// The prompt this question is shown after, and generates with when selected
    pub prompt_id: Uuid,
    pub question: String,
    /// Display order, ascending
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
