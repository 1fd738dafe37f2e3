use axum::{extract::Path, extract::Query, extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::ai_models::dtos::{
    AiModelQueryParams, AiModelResponseDto, CreateAiModelDto, UpdateAiModelDto,
};
use crate::features::ai_models::services::AiModelService;
use crate::shared::types::{ApiResponse, Meta};

/// Register a new AI model
#[utoipa::path(
    post,
    path = "/api/admin/ai-models",
    request_body = CreateAiModelDto,
    responses(
        (status = 200, description = "AI model created successfully", body = ApiResponse<AiModelResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "ai-models"
)]
pub async fn create_ai_model(
    State(service): State<Arc<AiModelService>>,
    AppJson(dto): AppJson<CreateAiModelDto>,
) -> Result<Json<ApiResponse<AiModelResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let model = service.create(dto).await?;
    Ok(Json(ApiResponse::success(Some(model), None, None)))
}

/// Get an AI model by ID
#[utoipa::path(
    get,
    path = "/api/admin/ai-models/{id}",
    params(
        ("id" = Uuid, Path, description = "AI model ID")
    ),
    responses(
        (status = 200, description = "AI model retrieved successfully", body = ApiResponse<AiModelResponseDto>),
        (status = 404, description = "AI model not found")
    ),
    tag = "ai-models"
)]
pub async fn get_ai_model(
    State(service): State<Arc<AiModelService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AiModelResponseDto>>> {
    let model = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(model), None, None)))
}

/// List AI models
#[utoipa::path(
    get,
    path = "/api/admin/ai-models",
    params(AiModelQueryParams),
    responses(
        (status = 200, description = "AI models retrieved successfully", body = ApiResponse<Vec<AiModelResponseDto>>)
    ),
    tag = "ai-models"
)]
pub async fn list_ai_models(
    State(service): State<Arc<AiModelService>>,
    Query(params): Query<AiModelQueryParams>,
) -> Result<Json<ApiResponse<Vec<AiModelResponseDto>>>> {
    let (models, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(models),
        None,
        Some(Meta { total }),
    )))
}

/// Update an AI model (including toggling its status)
#[utoipa::path(
    put,
    path = "/api/admin/ai-models/{id}",
    params(
        ("id" = Uuid, Path, description = "AI model ID")
    ),
    request_body = UpdateAiModelDto,
    responses(
        (status = 200, description = "AI model updated successfully", body = ApiResponse<AiModelResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "AI model not found")
    ),
    tag = "ai-models"
)]
pub async fn update_ai_model(
    State(service): State<Arc<AiModelService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateAiModelDto>,
) -> Result<Json<ApiResponse<AiModelResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let model = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(model), None, None)))
}

/// Delete an AI model
#[utoipa::path(
    delete,
    path = "/api/admin/ai-models/{id}",
    params(
        ("id" = Uuid, Path, description = "AI model ID")
    ),
    responses(
        (status = 200, description = "AI model deleted successfully"),
        (status = 400, description = "AI model is still used by a prompt"),
        (status = 404, description = "AI model not found")
    ),
    tag = "ai-models"
)]
pub async fn delete_ai_model(
    State(service): State<Arc<AiModelService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
