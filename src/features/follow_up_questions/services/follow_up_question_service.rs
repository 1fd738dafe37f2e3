use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_db_error;
use crate::core::error::{AppError, Result};
use crate::features::follow_up_questions::dtos::{
    CreateFollowUpQuestionDto, FollowUpQuestionDto, UpdateFollowUpQuestionDto,
};
use crate::features::follow_up_questions::models::FollowUpQuestion;

pub(crate) const FOLLOW_UP_COLUMNS: &str = "id, prompt_id, question, position, created_at, updated_at";

/// Service for managing follow-up questions attached to prompts
pub struct FollowUpQuestionService {
    pool: PgPool,
}

impl FollowUpQuestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_prompt_exists(&self, prompt_id: Uuid) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM prompts WHERE id = $1)")
            .bind(prompt_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Prompt with id {} not found",
                prompt_id
            )));
        }
        Ok(())
    }

    /// List a prompt's follow-up questions in display order
    pub async fn list_for_prompt(&self, prompt_id: Uuid) -> Result<Vec<FollowUpQuestionDto>> {
        self.ensure_prompt_exists(prompt_id).await?;

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
        .await
        .map_err(AppError::Database)?;

        Ok(questions.into_iter().map(Into::into).collect())
    }

    /// Attach a follow-up question to a prompt
    pub async fn create(
        &self,
        prompt_id: Uuid,
        dto: CreateFollowUpQuestionDto,
    ) -> Result<FollowUpQuestionDto> {
        self.ensure_prompt_exists(prompt_id).await?;

        let question = sqlx::query_as::<_, FollowUpQuestion>(&format!(
            r#"
            INSERT INTO follow_up_questions (prompt_id, question, position)
            VALUES (
                $1, $2,
                COALESCE($3, (SELECT COALESCE(MAX(position), -1) + 1
                              FROM follow_up_questions WHERE prompt_id = $1))
            )
            RETURNING {}
            "#,
            FOLLOW_UP_COLUMNS
        ))
        .bind(prompt_id)
        .bind(&dto.question)
        .bind(dto.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Follow-up question", e))?;

        tracing::info!(
            "Follow-up question created: id={}, prompt={}, position={}",
            question.id,
            prompt_id,
            question.position
        );

        Ok(question.into())
    }

    /// Update question text or position
    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateFollowUpQuestionDto,
    ) -> Result<FollowUpQuestionDto> {
        let question = sqlx::query_as::<_, FollowUpQuestion>(&format!(
            r#"
            UPDATE follow_up_questions
            SET question = COALESCE($1, question),
                position = COALESCE($2, position),
                updated_at = NOW()
            WHERE id = $3
            RETURNING {}
            "#,
            FOLLOW_UP_COLUMNS
        ))
        .bind(&dto.question)
        .bind(dto.position)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Follow-up question", e))?
        .ok_or_else(|| {
            AppError::NotFound(format!("Follow-up question with id {} not found", id))
        })?;

        Ok(question.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM follow_up_questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Follow-up question with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
