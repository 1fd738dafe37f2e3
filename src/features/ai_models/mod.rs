//! AI model configurations referenced by prompts.
//!
//! A prompt can only generate while its model is `active`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AiModelService;
