pub mod knowledge_base_dto;

pub use knowledge_base_dto::{
    CreateDocumentDto, CreateKnowledgeBaseDto, DocumentResponseDto, KnowledgeBaseResponseDto,
    UpdateDocumentDto, UpdateKnowledgeBaseDto,
};
