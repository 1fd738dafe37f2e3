use axum::{extract::Path, extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::responses::dtos::{ChatRequestDto, FollowUpRequestDto, ResponseOutcomeDto};
use crate::features::responses::services::ResponseService;
use crate::shared::types::ApiResponse;

fn envelope(outcome: ResponseOutcomeDto) -> Json<ApiResponse<ResponseOutcomeDto>> {
    let message = (!outcome.success).then(|| outcome.display_message.clone());
    Json(ApiResponse {
        success: outcome.success,
        data: Some(outcome),
        message,
        meta: None,
        errors: None,
    })
}

/// Generate a response to a guest message
///
/// Pipeline failures are reported inside the outcome (`success = false`) with a
/// display message suitable for the guest.
#[utoipa::path(
    post,
    path = "/api/chat/respond",
    request_body = ChatRequestDto,
    responses(
        (status = 200, description = "Outcome of the chat turn", body = ApiResponse<ResponseOutcomeDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "chat"
)]
pub async fn respond(
    State(service): State<Arc<ResponseService>>,
    AppJson(dto): AppJson<ChatRequestDto>,
) -> Result<Json<ApiResponse<ResponseOutcomeDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = service.generate_response(&dto.message, &dto.caller()).await;
    if let Err(e) = &result {
        tracing::warn!("Chat response failed: code={}, error={}", e.code(), e);
    }

    Ok(envelope(ResponseOutcomeDto::from_result(result)))
}

/// Generate a response for a selected follow-up question
#[utoipa::path(
    post,
    path = "/api/chat/follow-ups/{id}/respond",
    params(
        ("id" = Uuid, Path, description = "Follow-up question ID")
    ),
    request_body = FollowUpRequestDto,
    responses(
        (status = 200, description = "Outcome of the chat turn", body = ApiResponse<ResponseOutcomeDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "chat"
)]
pub async fn respond_to_follow_up(
    State(service): State<Arc<ResponseService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<FollowUpRequestDto>,
) -> Result<Json<ApiResponse<ResponseOutcomeDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = service.respond_to_follow_up(id, &dto.caller()).await;
    if let Err(e) = &result {
        tracing::warn!(
            "Follow-up response failed: follow_up_id={}, code={}, error={}",
            id,
            e.code(),
            e
        );
    }

    Ok(envelope(ResponseOutcomeDto::from_result(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::responses::generation::TextGenerator;
    use crate::features::responses::routes;
    use crate::shared::constants::GENERATION_FALLBACK_MESSAGE;
    use crate::shared::status::RecordStatus;
    use crate::shared::test_helpers::{
        ai_model, follow_up, prompt, FailingGenerator, InMemoryStore, RecordingGenerator,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server(store: InMemoryStore, generator: Arc<dyn TextGenerator>) -> TestServer {
        let service = Arc::new(ResponseService::new(Arc::new(store), generator));
        TestServer::new(routes::public_routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_respond_success() {
        let model = ai_model(RecordStatus::Active);
        let p = prompt("Hi {{user_message}}", model.id);
        let store = InMemoryStore::new()
            .with_model(model)
            .with_follow_up(follow_up(p.id, "Is there parking?", 0))
            .with_prompt(p);
        let server = server(store, Arc::new(RecordingGenerator::echo()));

        let response = server
            .post("/api/chat/respond")
            .json(&json!({"message": "where is the gym?"}))
            .await;

        response.assert_status_ok();
        let body: ApiResponse<ResponseOutcomeDto> = response.json();
        assert!(body.success);
        let outcome = body.data.unwrap();
        assert_eq!(outcome.response.as_deref(), Some("Hi where is the gym?"));
        assert_eq!(outcome.follow_up_questions.len(), 1);
        assert_eq!(outcome.follow_up_questions[0].question, "Is there parking?");
    }

    #[tokio::test]
    async fn test_respond_reports_structured_error() {
        let model = ai_model(RecordStatus::Active);
        let store = InMemoryStore::new()
            .with_model(model.clone())
            .with_prompt(prompt("{{user_message}}", model.id));
        let server = server(store, Arc::new(FailingGenerator));

        let response = server
            .post("/api/chat/respond")
            .json(&json!({"message": "hello"}))
            .await;

        response.assert_status_ok();
        let body: ApiResponse<ResponseOutcomeDto> = response.json();
        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some(GENERATION_FALLBACK_MESSAGE));
        let outcome = body.data.unwrap();
        assert!(outcome.response.is_none());
        assert_eq!(outcome.display_message, GENERATION_FALLBACK_MESSAGE);
        assert_eq!(outcome.error.unwrap().code, "generation_failed");
    }

    #[tokio::test]
    async fn test_respond_without_active_prompt() {
        let server = server(InMemoryStore::new(), Arc::new(RecordingGenerator::echo()));

        let response = server
            .post("/api/chat/respond")
            .json(&json!({"message": "hello"}))
            .await;

        let body: ApiResponse<ResponseOutcomeDto> = response.json();
        assert_eq!(body.data.unwrap().error.unwrap().code, "no_active_prompt");
    }

    #[tokio::test]
    async fn test_respond_rejects_empty_message() {
        let server = server(InMemoryStore::new(), Arc::new(RecordingGenerator::echo()));

        let response = server
            .post("/api/chat/respond")
            .json(&json!({"message": ""}))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_follow_up_route() {
        let model = ai_model(RecordStatus::Active);
        let p = prompt("Q: {{user_message}} ({{room}})", model.id);
        let question = follow_up(p.id, "Late checkout?", 0);
        let store = InMemoryStore::new()
            .with_model(model)
            .with_follow_up(question.clone())
            .with_prompt(p);
        let server = server(store, Arc::new(RecordingGenerator::echo()));

        let response = server
            .post(&format!("/api/chat/follow-ups/{}/respond", question.id))
            .json(&json!({"context": {"room": 412}}))
            .await;

        let body: ApiResponse<ResponseOutcomeDto> = response.json();
        let outcome = body.data.unwrap();
        assert_eq!(outcome.response.as_deref(), Some("Q: Late checkout? (412)"));
        assert!(outcome.follow_up_questions.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_follow_up() {
        let server = server(InMemoryStore::new(), Arc::new(RecordingGenerator::echo()));

        let response = server
            .post(&format!("/api/chat/follow-ups/{}/respond", Uuid::new_v4()))
            .json(&json!({}))
            .await;

        let body: ApiResponse<ResponseOutcomeDto> = response.json();
        assert!(!body.success);
        assert_eq!(body.data.unwrap().error.unwrap().code, "follow_up_not_found");
    }
}
