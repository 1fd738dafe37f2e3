pub mod knowledge_base;

pub use knowledge_base::{concat_documents, KnowledgeBase, KnowledgeBaseDocument};
