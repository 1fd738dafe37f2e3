use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::ai_models::models::AiModel;
use crate::features::ai_models::services::ai_model_service::AI_MODEL_COLUMNS;
use crate::features::follow_up_questions::models::FollowUpQuestion;
use crate::features::follow_up_questions::services::follow_up_question_service::FOLLOW_UP_COLUMNS;
use crate::features::knowledge_bases::models::KnowledgeBaseDocument;
use crate::features::knowledge_bases::services::knowledge_base_service::DOCUMENT_COLUMNS;
use crate::features::prompts::models::Prompt;
use crate::features::prompts::services::prompt_service::PROMPT_COLUMNS;
use crate::features::responses::errors::StoreError;
use crate::shared::status::RecordStatus;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read access to the chat configuration the response pipeline needs.
///
/// Implementations must be safe to share across requests.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// The most recently created prompt with `active` status
    async fn latest_active_prompt(&self) -> StoreResult<Option<Prompt>>;

    /// A prompt by id, whatever its status
    async fn find_prompt(&self, id: Uuid) -> StoreResult<Option<Prompt>>;

    async fn find_model(&self, id: Uuid) -> StoreResult<Option<AiModel>>;

    /// Documents of a knowledge base in storage order
    async fn list_documents(&self, knowledge_base_id: Uuid)
        -> StoreResult<Vec<KnowledgeBaseDocument>>;

    /// Follow-up questions of a prompt, ascending by position
    async fn list_follow_up_questions(&self, prompt_id: Uuid)
        -> StoreResult<Vec<FollowUpQuestion>>;

    async fn find_follow_up_question(&self, id: Uuid) -> StoreResult<Option<FollowUpQuestion>>;
}

/// Postgres-backed store
pub struct PgResponseStore {
    pool: PgPool,
}

impl PgResponseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseStore for PgResponseStore {
    async fn latest_active_prompt(&self) -> StoreResult<Option<Prompt>> {
        let prompt = sqlx::query_as::<_, Prompt>(&format!(
            r#"
            SELECT {}
            FROM prompts
            WHERE status = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
            PROMPT_COLUMNS
        ))
        .bind(RecordStatus::Active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn find_prompt(&self, id: Uuid) -> StoreResult<Option<Prompt>> {
        let prompt = sqlx::query_as::<_, Prompt>(&format!(
            "SELECT {} FROM prompts WHERE id = $1",
            PROMPT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn find_model(&self, id: Uuid) -> StoreResult<Option<AiModel>> {
        let model = sqlx::query_as::<_, AiModel>(&format!(
            "SELECT {} FROM ai_models WHERE id = $1",
            AI_MODEL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(model)
    }

    async fn list_documents(
        &self,
        knowledge_base_id: Uuid,
    ) -> StoreResult<Vec<KnowledgeBaseDocument>> {
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
        .await?;

        Ok(documents)
    }

    async fn list_follow_up_questions(
        &self,
        prompt_id: Uuid,
    ) -> StoreResult<Vec<FollowUpQuestion>> {
        let questions = sqlx::query_as::<_, FollowUpQuestion>(&format!(
            r#"
            SELECT {}
            FROM follow_up_questions
            WHERE prompt_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
            FOLLOW_UP_COLUMNS
        ))
        .bind(prompt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn find_follow_up_question(&self, id: Uuid) -> StoreResult<Option<FollowUpQuestion>> {
        let question = sqlx::query_as::<_, FollowUpQuestion>(&format!(
            "SELECT {} FROM follow_up_questions WHERE id = $1",
            FOLLOW_UP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }
}
