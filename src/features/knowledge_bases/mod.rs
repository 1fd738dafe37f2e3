//! Knowledge bases: named collections of text documents.
//!
//! When a prompt references a knowledge base, its documents are concatenated in
//! storage order and exposed to templates as `{{knowledge_base}}`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::KnowledgeBaseService;
