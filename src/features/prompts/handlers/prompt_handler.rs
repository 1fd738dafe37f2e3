use axum::{extract::Path, extract::Query, extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::prompts::dtos::{
    CreatePromptDto, PreviewTemplateDto, PreviewTemplateResponseDto, PromptQueryParams,
    PromptResponseDto, PromptVariablesDto, UpdatePromptDto,
};
use crate::features::prompts::services::PromptService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a new prompt
#[utoipa::path(
    post,
    path = "/api/admin/prompts",
    request_body = CreatePromptDto,
    responses(
        (status = 200, description = "Prompt created successfully", body = ApiResponse<PromptResponseDto>),
        (status = 400, description = "Validation error or unknown model / knowledge base")
    ),
    tag = "prompts"
)]
pub async fn create_prompt(
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<CreatePromptDto>,
) -> Result<Json<ApiResponse<PromptResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let prompt = service.create(dto).await?;
    Ok(Json(ApiResponse::success(Some(prompt), None, None)))
}

/// Get a prompt by ID
#[utoipa::path(
    get,
    path = "/api/admin/prompts/{id}",
    params(
        ("id" = Uuid, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Prompt retrieved successfully", body = ApiResponse<PromptResponseDto>),
        (status = 404, description = "Prompt not found")
    ),
    tag = "prompts"
)]
pub async fn get_prompt(
    State(service): State<Arc<PromptService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PromptResponseDto>>> {
    let prompt = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(prompt), None, None)))
}

/// List prompts with pagination and filtering
#[utoipa::path(
    get,
    path = "/api/admin/prompts",
    params(PromptQueryParams),
    responses(
        (status = 200, description = "Prompts retrieved successfully", body = ApiResponse<Vec<PromptResponseDto>>)
    ),
    tag = "prompts"
)]
pub async fn list_prompts(
    State(service): State<Arc<PromptService>>,
    Query(params): Query<PromptQueryParams>,
) -> Result<Json<ApiResponse<Vec<PromptResponseDto>>>> {
    let (prompts, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(prompts),
        None,
        Some(Meta { total }),
    )))
}

/// Update a prompt
#[utoipa::path(
    put,
    path = "/api/admin/prompts/{id}",
    params(
        ("id" = Uuid, Path, description = "Prompt ID")
    ),
    request_body = UpdatePromptDto,
    responses(
        (status = 200, description = "Prompt updated successfully", body = ApiResponse<PromptResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Prompt not found")
    ),
    tag = "prompts"
)]
pub async fn update_prompt(
    State(service): State<Arc<PromptService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdatePromptDto>,
) -> Result<Json<ApiResponse<PromptResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let prompt = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(prompt), None, None)))
}

/// Deactivate a prompt
#[utoipa::path(
    delete,
    path = "/api/admin/prompts/{id}",
    params(
        ("id" = Uuid, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Prompt deactivated successfully"),
        (status = 404, description = "Prompt not found")
    ),
    tag = "prompts"
)]
pub async fn delete_prompt(
    State(service): State<Arc<PromptService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Prompt deactivated".to_string()),
        None,
    )))
}

/// List the placeholders a prompt expects
#[utoipa::path(
    get,
    path = "/api/admin/prompts/{id}/variables",
    params(
        ("id" = Uuid, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Variables retrieved successfully", body = ApiResponse<PromptVariablesDto>),
        (status = 404, description = "Prompt not found")
    ),
    tag = "prompts"
)]
pub async fn get_prompt_variables(
    State(service): State<Arc<PromptService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PromptVariablesDto>>> {
    let variables = service.variables(id).await?;
    Ok(Json(ApiResponse::success(Some(variables), None, None)))
}

/// Render a template against sample values
#[utoipa::path(
    post,
    path = "/api/admin/prompts/preview",
    request_body = PreviewTemplateDto,
    responses(
        (status = 200, description = "Template rendered", body = ApiResponse<PreviewTemplateResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "prompts"
)]
pub async fn preview_prompt(
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<PreviewTemplateDto>,
) -> Result<Json<ApiResponse<PreviewTemplateResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        Some(service.preview(dto)),
        None,
        None,
    )))
}
