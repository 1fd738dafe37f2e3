/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// CONTEXT BAG KEYS
// =============================================================================

/// The guest's message text
pub const CTX_USER_MESSAGE: &str = "user_message";

/// Caller-supplied or generated user identifier
pub const CTX_USER_ID: &str = "user_id";

/// Caller-supplied or generated session identifier
pub const CTX_SESSION_ID: &str = "session_id";

/// ISO-8601 generation time
pub const CTX_TIMESTAMP: &str = "timestamp";

/// Concatenated knowledge-base documents
pub const CTX_KNOWLEDGE_BASE: &str = "knowledge_base";

/// Text shown to the guest in place of a failed generation
pub const GENERATION_FALLBACK_MESSAGE: &str =
    "I encountered an error while generating a response. Please try again.";
