//! Prompts: stored templates plus the model and optional knowledge base they
//! are sent with. The most recently created active prompt answers new messages.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PromptService;
