//! `{{variable.path}}` substitution for stored prompt templates.
//!
//! This is plain variable lookup: there are no conditionals, loops, filters or
//! function calls, and nothing in a substituted value is ever evaluated.
//!
//! # Usage
//!
//! ```ignore
//! use crate::shared::templating::{render, ContextMap, ContextValue};
//!
//! let mut ctx = ContextMap::new();
//! ctx.insert("user_message".to_string(), ContextValue::from("Where is the pool?"));
//!
//! let prompt = render("Guest asks: {{user_message}}", &ctx);
//! ```
//!
//! Placeholders that cannot be resolved are left in the output exactly as written.

pub mod engine;
pub mod value;

pub use engine::{placeholders, render, unresolved};
pub use value::{iso_timestamp, ContextMap, ContextValue};
