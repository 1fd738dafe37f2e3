pub mod ai_models;
pub mod follow_up_questions;
pub mod knowledge_bases;
pub mod prompts;
pub mod responses;
