use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::knowledge_bases::models::{KnowledgeBase, KnowledgeBaseDocument};

// Create knowledge base request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateKnowledgeBaseDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,
}

// Update knowledge base request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateKnowledgeBaseDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KnowledgeBaseResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub document_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<KnowledgeBase> for KnowledgeBaseResponseDto {
    fn from(kb: KnowledgeBase) -> Self {
        Self {
            id: kb.id,
            name: kb.name,
            description: kb.description,
            document_count: kb.document_count,
            created_at: kb.created_at,
            updated_at: kb.updated_at,
        }
    }
}

// Create document request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDocumentDto {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    /// Position within the knowledge base; appended at the end when omitted
    #[validate(range(min = 0))]
    pub position: Option<i32>,
}

// Update document request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDocumentDto {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    #[validate(range(min = 0))]
    pub position: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub knowledge_base_id: Uuid,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<KnowledgeBaseDocument> for DocumentResponseDto {
    fn from(d: KnowledgeBaseDocument) -> Self {
        Self {
            id: d.id,
            knowledge_base_id: d.knowledge_base_id,
            title: d.title,
            content: d.content,
            position: d.position,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
