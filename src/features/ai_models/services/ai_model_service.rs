use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_db_error;
use crate::core::error::{AppError, Result};
use crate::features::ai_models::dtos::{
    AiModelQueryParams, AiModelResponseDto, CreateAiModelDto, UpdateAiModelDto,
};
use crate::features::ai_models::models::AiModel;
use crate::shared::status::RecordStatus;

pub(crate) const AI_MODEL_COLUMNS: &str =
    "id, name, provider, model_identifier, description, status, created_at, updated_at";

/// Service for managing AI model configurations
pub struct AiModelService {
    pool: PgPool,
}

impl AiModelService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new model configuration
    pub async fn create(&self, dto: CreateAiModelDto) -> Result<AiModelResponseDto> {
        let model = sqlx::query_as::<_, AiModel>(&format!(
            r#"
            INSERT INTO ai_models (name, provider, model_identifier, description, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            AI_MODEL_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.provider)
        .bind(&dto.model_identifier)
        .bind(&dto.description)
        .bind(dto.status.unwrap_or_default())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("AI model", e))?;

        tracing::info!(
            "AI model created: id={}, identifier={}",
            model.id,
            model.model_identifier
        );

        Ok(model.into())
    }

    /// Get model by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<AiModelResponseDto> {
        let model = sqlx::query_as::<_, AiModel>(&format!(
            "SELECT {} FROM ai_models WHERE id = $1",
            AI_MODEL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("AI model with id {} not found", id)))?;

        Ok(model.into())
    }

    /// List models with pagination and optional status filter
    pub async fn list(&self, params: &AiModelQueryParams) -> Result<(Vec<AiModelResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ai_models WHERE ($1::record_status IS NULL OR status = $1)",
        )
        .bind(params.status)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let models = sqlx::query_as::<_, AiModel>(&format!(
            r#"
            SELECT {}
            FROM ai_models
            WHERE ($1::record_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            AI_MODEL_COLUMNS
        ))
        .bind(params.status)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    /// Update a model configuration
    pub async fn update(&self, id: Uuid, dto: UpdateAiModelDto) -> Result<AiModelResponseDto> {
        let model = sqlx::query_as::<_, AiModel>(&format!(
            r#"
            UPDATE ai_models
            SET name = COALESCE($1, name),
                provider = COALESCE($2, provider),
                model_identifier = COALESCE($3, model_identifier),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            AI_MODEL_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.provider)
        .bind(&dto.model_identifier)
        .bind(&dto.description)
        .bind(dto.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("AI model", e))?
        .ok_or_else(|| AppError::NotFound(format!("AI model with id {} not found", id)))?;

        if model.status != RecordStatus::Active {
            tracing::info!(
                "AI model {} is now {}; prompts using it will not generate",
                model.id,
                model.status
            );
        }

        Ok(model.into())
    }

    /// Delete a model. Fails while prompts still reference it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM ai_models WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("AI model", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "AI model with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
