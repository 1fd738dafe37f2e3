use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_db_error;
use crate::core::error::{AppError, Result};
use crate::features::prompts::dtos::{
    CreatePromptDto, PreviewTemplateDto, PreviewTemplateResponseDto, PromptQueryParams,
    PromptResponseDto, PromptVariablesDto, UpdatePromptDto,
};
use crate::features::prompts::models::Prompt;
use crate::shared::status::RecordStatus;
use crate::shared::templating::{placeholders, render, unresolved, ContextMap, ContextValue};

pub(crate) const PROMPT_COLUMNS: &str = "id, name, description, template, content, system_prompt, \
     status, model_id, knowledge_base_id, created_at, updated_at";

pub struct PromptService {
    pool: PgPool,
}

impl PromptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a prompt. New prompts are active unless told otherwise.
    pub async fn create(&self, dto: CreatePromptDto) -> Result<PromptResponseDto> {
        let prompt = sqlx::query_as::<_, Prompt>(&format!(
            r#"
            INSERT INTO prompts
                (name, description, template, content, system_prompt, status, model_id, knowledge_base_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PROMPT_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.template.as_deref().unwrap_or_default())
        .bind(dto.content.as_deref().unwrap_or_default())
        .bind(&dto.system_prompt)
        .bind(dto.status.unwrap_or_default())
        .bind(dto.model_id)
        .bind(dto.knowledge_base_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Prompt", e))?;

        tracing::info!(
            "Prompt created: id={}, name={}, status={}",
            prompt.id,
            prompt.name,
            prompt.status
        );

        Ok(prompt.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PromptResponseDto> {
        Ok(self.find(id).await?.into())
    }

    /// List prompts with optional search and status filter
    pub async fn list(&self, params: &PromptQueryParams) -> Result<(Vec<PromptResponseDto>, i64)> {
        let search = params.search_pattern();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM prompts
            WHERE ($1::record_status IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR name ILIKE $2 ESCAPE '\' OR description ILIKE $2 ESCAPE '\' OR template ILIKE $2 ESCAPE '\')
            "#,
        )
        .bind(params.status)
        .bind(&search)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let prompts = sqlx::query_as::<_, Prompt>(&format!(
            r#"
            SELECT {}
            FROM prompts
            WHERE ($1::record_status IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR name ILIKE $2 ESCAPE '\' OR description ILIKE $2 ESCAPE '\' OR template ILIKE $2 ESCAPE '\')
            ORDER BY created_at {}
            LIMIT $3 OFFSET $4
            "#,
            PROMPT_COLUMNS,
            params.sort.as_sql()
        ))
        .bind(params.status)
        .bind(&search)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok((prompts.into_iter().map(Into::into).collect(), total))
    }

    /// Update a prompt. Omitted fields keep their current values.
    pub async fn update(&self, id: Uuid, dto: UpdatePromptDto) -> Result<PromptResponseDto> {
        let prompt = sqlx::query_as::<_, Prompt>(&format!(
            r#"
            UPDATE prompts
            SET name = COALESCE($1, name),
                description = CASE WHEN $2 THEN NULL ELSE COALESCE($3, description) END,
                template = COALESCE($4, template),
                content = COALESCE($5, content),
                system_prompt = CASE WHEN $6 THEN NULL ELSE COALESCE($7, system_prompt) END,
                status = COALESCE($8, status),
                model_id = COALESCE($9, model_id),
                knowledge_base_id = CASE WHEN $10 THEN NULL ELSE COALESCE($11, knowledge_base_id) END,
                updated_at = NOW()
            WHERE id = $12
            RETURNING {}
            "#,
            PROMPT_COLUMNS
        ))
        .bind(&dto.name)
        .bind(dto.clear_description)
        .bind(&dto.description)
        .bind(&dto.template)
        .bind(&dto.content)
        .bind(dto.clear_system_prompt)
        .bind(&dto.system_prompt)
        .bind(dto.status)
        .bind(dto.model_id)
        .bind(dto.detach_knowledge_base)
        .bind(dto.knowledge_base_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Prompt", e))?
        .ok_or_else(|| AppError::NotFound(format!("Prompt with id {} not found", id)))?;

        tracing::info!("Prompt updated: id={}, status={}", prompt.id, prompt.status);

        Ok(prompt.into())
    }

    /// Soft delete: the prompt is marked inactive and stops being selected
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE prompts
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(RecordStatus::Inactive)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Prompt with id {} not found", id)));
        }

        tracing::info!("Prompt deactivated: id={}", id);
        Ok(())
    }

    /// Placeholders referenced by a stored prompt
    pub async fn variables(&self, id: Uuid) -> Result<PromptVariablesDto> {
        let prompt = self.find(id).await?;
        Ok(PromptVariablesDto::from(&prompt))
    }

    /// Render a template against a sample context without storing anything
    pub fn preview(&self, dto: PreviewTemplateDto) -> PreviewTemplateResponseDto {
        preview_template(dto)
    }

    async fn find(&self, id: Uuid) -> Result<Prompt> {
        sqlx::query_as::<_, Prompt>(&format!(
            "SELECT {} FROM prompts WHERE id = $1",
            PROMPT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Prompt with id {} not found", id)))
    }
}

fn preview_template(dto: PreviewTemplateDto) -> PreviewTemplateResponseDto {
    let ctx: ContextMap = dto
        .context
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, ContextValue::from(v)))
        .collect();

    PreviewTemplateResponseDto {
        rendered: render(&dto.template, &ctx),
        variables: placeholders(&dto.template),
        unresolved: unresolved(&dto.template, &ctx),
    }
}
