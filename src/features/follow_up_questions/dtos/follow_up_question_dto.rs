use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::follow_up_questions::models::FollowUpQuestion;

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFollowUpQuestionDto {
    #[validate(length(min = 1, max = 500))]
    pub question: String,

    /// Display position; appended after the last question when omitted
    #[validate(range(min = 0))]
    pub position: Option<i32>,
}

// Update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFollowUpQuestionDto {
    #[validate(length(min = 1, max = 500))]
    pub question: Option<String>,

    #[validate(range(min = 0))]
    pub position: Option<i32>,
}

/// A follow-up question as shown to admins and guests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FollowUpQuestionDto {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub question: String,
    pub position: i32,
}

impl From<FollowUpQuestion> for FollowUpQuestionDto {
    fn from(q: FollowUpQuestion) -> Self {
        Self {
            id: q.id,
            prompt_id: q.prompt_id,
            question: q.question,
            position: q.position,
        }
    }
}
