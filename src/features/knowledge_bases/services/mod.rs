pub mod knowledge_base_service;

pub use knowledge_base_service::KnowledgeBaseService;
