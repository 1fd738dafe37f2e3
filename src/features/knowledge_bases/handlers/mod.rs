pub mod knowledge_base_handler;

pub use knowledge_base_handler::*;
