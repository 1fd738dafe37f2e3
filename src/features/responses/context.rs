use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::constants::{CTX_SESSION_ID, CTX_TIMESTAMP, CTX_USER_ID, CTX_USER_MESSAGE};
use crate::shared::templating::{iso_timestamp, ContextMap, ContextValue};

/// Caller-side inputs that shape the context bag
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    /// Extra variables. These override the reserved keys when names collide.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Build the variables available to prompt templates.
///
/// Reserved keys come first, then caller extras on top. Top-level `null`
/// extras are skipped so they cannot blank out a reserved key.
pub fn build_context(message: &str, caller: &CallerContext, now: DateTime<Utc>) -> ContextMap {
    let mut ctx = ContextMap::new();

    ctx.insert(CTX_USER_MESSAGE.to_string(), ContextValue::from(message));
    ctx.insert(
        CTX_USER_ID.to_string(),
        ContextValue::from(id_or_generated(caller.user_id.as_deref())),
    );
    ctx.insert(
        CTX_SESSION_ID.to_string(),
        ContextValue::from(id_or_generated(caller.session_id.as_deref())),
    );
    ctx.insert(CTX_TIMESTAMP.to_string(), ContextValue::from(iso_timestamp(now)));

    for (key, value) in &caller.extra {
        if value.is_null() {
            continue;
        }
        ctx.insert(key.clone(), ContextValue::from(value.clone()));
    }

    ctx
}

fn id_or_generated(id: Option<&str>) -> String {
    match id.map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => id.to_string(),
        None => Uuid::new_v4().to_string(),
    }
}
