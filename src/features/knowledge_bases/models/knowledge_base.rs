use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a knowledge base, with its document count
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub document_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for one document inside a knowledge base
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct KnowledgeBaseDocument {
    pub id: Uuid,
    pub knowledge_base_id: Uuid,
    pub title: String,
    pub content: String,
    /// Storage order within the knowledge base
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KnowledgeBaseDocument {
    /// `title:\ncontent`, the form documents take inside generation context
    pub fn as_context_entry(&self) -> String {
        format!("{}:\n{}", self.title, self.content)
    }
}

/// Concatenate documents into a single context string, blank-line separated, in the given order
pub fn concat_documents(documents: &[KnowledgeBaseDocument]) -> String {
    documents
        .iter()
        .map(KnowledgeBaseDocument::as_context_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}
