use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::follow_up_questions::dtos::FollowUpQuestionDto;
use crate::features::responses::context::CallerContext;
use crate::features::responses::errors::ResponseError;
use crate::features::responses::services::GeneratedResponse;
use crate::shared::constants::GENERATION_FALLBACK_MESSAGE;

// Free-text chat request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChatRequestDto {
    #[validate(length(min = 1, max = 10000))]
    pub message: String,

    /// Generated when absent
    #[validate(length(max = 255))]
    pub user_id: Option<String>,

    /// Generated when absent
    #[validate(length(max = 255))]
    pub session_id: Option<String>,

    /// Extra template variables. Keys override `user_message`, `user_id`,
    /// `session_id` and `timestamp`.
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ChatRequestDto {
    pub fn caller(&self) -> CallerContext {
        CallerContext {
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            extra: self.context.clone().unwrap_or_default(),
        }
    }
}

// Follow-up selection request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct FollowUpRequestDto {
    #[validate(length(max = 255))]
    pub user_id: Option<String>,

    #[validate(length(max = 255))]
    pub session_id: Option<String>,

    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Map<String, serde_json::Value>>,
}

impl FollowUpRequestDto {
    pub fn caller(&self) -> CallerContext {
        CallerContext {
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            extra: self.context.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResponseErrorDto {
    /// Stable error code, e.g. `no_active_prompt`
    pub code: String,
    pub message: String,
}

/// Result of a chat turn. Exactly one of `response` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResponseOutcomeDto {
    pub success: bool,
    pub response: Option<String>,
    pub follow_up_questions: Vec<FollowUpQuestionDto>,
    pub error: Option<ResponseErrorDto>,
    /// Text to show the guest: the response, or a generic apology on failure
    pub display_message: String,
}

impl ResponseOutcomeDto {
    pub fn from_result(result: Result<GeneratedResponse, ResponseError>) -> Self {
        match result {
            Ok(generated) => Self {
                success: true,
                display_message: generated.response.clone(),
                response: Some(generated.response),
                follow_up_questions: generated.follow_up_questions,
                error: None,
            },
            Err(e) => Self {
                success: false,
                response: None,
                follow_up_questions: Vec::new(),
                error: Some(ResponseErrorDto {
                    code: e.code().to_string(),
                    message: e.client_message(),
                }),
                display_message: GENERATION_FALLBACK_MESSAGE.to_string(),
            },
        }
    }
}

impl From<Result<GeneratedResponse, ResponseError>> for ResponseOutcomeDto {
    fn from(result: Result<GeneratedResponse, ResponseError>) -> Self {
        Self::from_result(result)
    }
}
