use thiserror::Error;
use uuid::Uuid;

/// Failure reading chat configuration from the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Backend(String),
}

/// Failure calling the remote text-generation function
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to generation function failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation function returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation function reported an error: {0}")]
    Remote(String),

    #[error("invalid response from generation function: {0}")]
    InvalidResponse(String),
}

/// Why a response could not be produced
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("no active prompt is configured")]
    NoActivePrompt,

    #[error("AI model {0} not found")]
    ModelNotFound(Uuid),

    #[error("AI model {0} is not active")]
    ModelInactive(Uuid),

    #[error("text generation failed: {0}")]
    Generation(#[source] GenerationError),

    #[error("could not read chat configuration: {0}")]
    Store(#[source] StoreError),

    #[error("follow-up question {0} not found")]
    FollowUpNotFound(Uuid),

    #[error("prompt {0} not found")]
    PromptNotFound(Uuid),
}

impl ResponseError {
    /// Stable machine-readable code, safe to show to clients
    pub fn code(&self) -> &'static str {
        match self {
            ResponseError::NoActivePrompt => "no_active_prompt",
            ResponseError::ModelNotFound(_) => "model_not_found",
            ResponseError::ModelInactive(_) => "model_inactive",
            ResponseError::Generation(_) => "generation_failed",
            ResponseError::Store(_) => "store_unavailable",
            ResponseError::FollowUpNotFound(_) => "follow_up_not_found",
            ResponseError::PromptNotFound(_) => "prompt_not_found",
        }
    }

    /// Message for clients. Store and generation causes stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ResponseError::Generation(_) => "Text generation failed".to_string(),
            ResponseError::Store(_) => "Chat configuration is unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for ResponseError {
    fn from(e: StoreError) -> Self {
        ResponseError::Store(e)
    }
}

impl From<GenerationError> for ResponseError {
    fn from(e: GenerationError) -> Self {
        ResponseError::Generation(e)
    }
}
