use axum::{extract::Path, extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::follow_up_questions::dtos::{
    CreateFollowUpQuestionDto, FollowUpQuestionDto, UpdateFollowUpQuestionDto,
};
use crate::features::follow_up_questions::services::FollowUpQuestionService;
use crate::shared::types::{ApiResponse, Meta};

/// List follow-up questions of a prompt
#[utoipa::path(
    get,
    path = "/api/admin/prompts/{id}/follow-up-questions",
    params(
        ("id" = Uuid, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Follow-up questions retrieved successfully", body = ApiResponse<Vec<FollowUpQuestionDto>>),
        (status = 404, description = "Prompt not found")
    ),
    tag = "follow-up-questions"
)]
pub async fn list_follow_up_questions(
    State(service): State<Arc<FollowUpQuestionService>>,
    Path(prompt_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<FollowUpQuestionDto>>>> {
    let questions = service.list_for_prompt(prompt_id).await?;
    let total = questions.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(questions),
        None,
        Some(Meta { total }),
    )))
}

/// Add a follow-up question to a prompt
#[utoipa::path(
    post,
    path = "/api/admin/prompts/{id}/follow-up-questions",
    params(
        ("id" = Uuid, Path, description = "Prompt ID")
    ),
    request_body = CreateFollowUpQuestionDto,
    responses(
        (status = 200, description = "Follow-up question created successfully", body = ApiResponse<FollowUpQuestionDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Prompt not found")
    ),
    tag = "follow-up-questions"
)]
pub async fn create_follow_up_question(
    State(service): State<Arc<FollowUpQuestionService>>,
    Path(prompt_id): Path<Uuid>,
    AppJson(dto): AppJson<CreateFollowUpQuestionDto>,
) -> Result<Json<ApiResponse<FollowUpQuestionDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let question = service.create(prompt_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(question), None, None)))
}

/// Update a follow-up question
#[utoipa::path(
    put,
    path = "/api/admin/follow-up-questions/{id}",
    params(
        ("id" = Uuid, Path, description = "Follow-up question ID")
    ),
    request_body = UpdateFollowUpQuestionDto,
    responses(
        (status = 200, description = "Follow-up question updated successfully", body = ApiResponse<FollowUpQuestionDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Follow-up question not found")
    ),
    tag = "follow-up-questions"
)]
pub async fn update_follow_up_question(
    State(service): State<Arc<FollowUpQuestionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateFollowUpQuestionDto>,
) -> Result<Json<ApiResponse<FollowUpQuestionDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let question = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(question), None, None)))
}

/// Delete a follow-up question
#[utoipa::path(
    delete,
    path = "/api/admin/follow-up-questions/{id}",
    params(
        ("id" = Uuid, Path, description = "Follow-up question ID")
    ),
    responses(
        (status = 200, description = "Follow-up question deleted successfully"),
        (status = 404, description = "Follow-up question not found")
    ),
    tag = "follow-up-questions"
)]
pub async fn delete_follow_up_question(
    State(service): State<Arc<FollowUpQuestionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
