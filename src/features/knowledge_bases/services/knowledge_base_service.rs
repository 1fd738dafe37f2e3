use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_db_error;
use crate::core::error::{AppError, Result};
use crate::features::knowledge_bases::dtos::{
    CreateDocumentDto, CreateKnowledgeBaseDto, DocumentResponseDto, KnowledgeBaseResponseDto,
    UpdateDocumentDto, UpdateKnowledgeBaseDto,
};
use crate::features::knowledge_bases::models::{KnowledgeBase, KnowledgeBaseDocument};
use crate::shared::pagination::PaginationQuery;

pub(crate) const DOCUMENT_COLUMNS: &str =
    "id, knowledge_base_id, title, content, position, created_at, updated_at";

/// Service for managing knowledge bases and their documents
pub struct KnowledgeBaseService {
    pool: PgPool,
}

impl KnowledgeBaseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new, empty knowledge base
    pub async fn create(&self, dto: CreateKnowledgeBaseDto) -> Result<KnowledgeBaseResponseDto> {
        let kb = sqlx::query_as::<_, KnowledgeBase>(
            r#"
            INSERT INTO knowledge_bases (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, 0::BIGINT AS document_count, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Knowledge base", e))?;

        tracing::info!("Knowledge base created: id={}, name={}", kb.id, kb.name);

        Ok(kb.into())
    }

    /// Get knowledge base by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<KnowledgeBaseResponseDto> {
        let kb = sqlx::query_as::<_, KnowledgeBase>(
            r#"
            SELECT kb.id, kb.name, kb.description,
                   (SELECT COUNT(*) FROM knowledge_base_documents d WHERE d.knowledge_base_id = kb.id) AS document_count,
                   kb.created_at, kb.updated_at
            FROM knowledge_bases kb
            WHERE kb.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Knowledge base with id {} not found", id)))?;

        Ok(kb.into())
    }

    /// List knowledge bases, newest first
    pub async fn list(
        &self,
        params: &PaginationQuery,
    ) -> Result<(Vec<KnowledgeBaseResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM knowledge_bases")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let kbs = sqlx::query_as::<_, KnowledgeBase>(
            r#"
            SELECT kb.id, kb.name, kb.description,
                   (SELECT COUNT(*) FROM knowledge_base_documents d WHERE d.knowledge_base_id = kb.id) AS document_count,
                   kb.created_at, kb.updated_at
            FROM knowledge_bases kb
            ORDER BY kb.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok((kbs.into_iter().map(Into::into).collect(), total))
    }

    /// Update knowledge base metadata
    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateKnowledgeBaseDto,
    ) -> Result<KnowledgeBaseResponseDto> {
        let kb = sqlx::query_as::<_, KnowledgeBase>(
            r#"
            UPDATE knowledge_bases
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, description,
                      (SELECT COUNT(*) FROM knowledge_base_documents d WHERE d.knowledge_base_id = $3) AS document_count,
                      created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Knowledge base", e))?
        .ok_or_else(|| AppError::NotFound(format!("Knowledge base with id {} not found", id)))?;

        Ok(kb.into())
    }

    /// Delete a knowledge base and its documents. Prompts using it are detached.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM knowledge_bases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Knowledge base", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Knowledge base with id {} not found",
                id
            )));
        }

        tracing::info!("Knowledge base deleted: id={}", id);
        Ok(())
    }

    async fn ensure_exists(&self, id: Uuid) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM knowledge_bases WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Knowledge base with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// List a knowledge base's documents in storage order
    pub async fn list_documents(&self, knowledge_base_id: Uuid) -> Result<Vec<DocumentResponseDto>> {
        self.ensure_exists(knowledge_base_id).await?;

        let documents = sqlx::query_as::<_, KnowledgeBaseDocument>(&format!(
            r#"
            SELECT {}
            FROM knowledge_base_documents
            WHERE knowledge_base_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(knowledge_base_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    /// Add a document; without an explicit position it goes after the last one
    pub async fn add_document(
        &self,
        knowledge_base_id: Uuid,
        dto: CreateDocumentDto,
    ) -> Result<DocumentResponseDto> {
        self.ensure_exists(knowledge_base_id).await?;

        let document = sqlx::query_as::<_, KnowledgeBaseDocument>(&format!(
            r#"
            INSERT INTO knowledge_base_documents (knowledge_base_id, title, content, position)
            VALUES (
                $1, $2, $3,
                COALESCE($4, (SELECT COALESCE(MAX(position), -1) + 1
                              FROM knowledge_base_documents WHERE knowledge_base_id = $1))
            )
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(knowledge_base_id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Document", e))?;

        tracing::info!(
            "Document added: id={}, knowledge_base={}, position={}",
            document.id,
            knowledge_base_id,
            document.position
        );

        Ok(document.into())
    }

    /// Update a document belonging to the given knowledge base
    pub async fn update_document(
        &self,
        knowledge_base_id: Uuid,
        document_id: Uuid,
        dto: UpdateDocumentDto,
    ) -> Result<DocumentResponseDto> {
        let document = sqlx::query_as::<_, KnowledgeBaseDocument>(&format!(
            r#"
            UPDATE knowledge_base_documents
            SET title = COALESCE($1, title),
                content = COALESCE($2, content),
                position = COALESCE($3, position),
                updated_at = NOW()
            WHERE id = $4 AND knowledge_base_id = $5
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.position)
        .bind(document_id)
        .bind(knowledge_base_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Document", e))?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Document {} not found in knowledge base {}",
                document_id, knowledge_base_id
            ))
        })?;

        Ok(document.into())
    }

    /// Remove a document from the given knowledge base
    pub async fn delete_document(&self, knowledge_base_id: Uuid, document_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM knowledge_base_documents WHERE id = $1 AND knowledge_base_id = $2",
        )
        .bind(document_id)
        .bind(knowledge_base_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Document {} not found in knowledge base {}",
                document_id, knowledge_base_id
            )));
        }

        Ok(())
    }
}
