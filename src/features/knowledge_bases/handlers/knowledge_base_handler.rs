use axum::{extract::Path, extract::Query, extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::knowledge_bases::dtos::{
    CreateDocumentDto, CreateKnowledgeBaseDto, DocumentResponseDto, KnowledgeBaseResponseDto,
    UpdateDocumentDto, UpdateKnowledgeBaseDto,
};
use crate::features::knowledge_bases::services::KnowledgeBaseService;
use crate::shared::pagination::PaginationQuery;
use crate::shared::types::{ApiResponse, Meta};

/// Create a knowledge base
#[utoipa::path(
    post,
    path = "/api/admin/knowledge-bases",
    request_body = CreateKnowledgeBaseDto,
    responses(
        (status = 200, description = "Knowledge base created successfully", body = ApiResponse<KnowledgeBaseResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "knowledge-bases"
)]
pub async fn create_knowledge_base(
    State(service): State<Arc<KnowledgeBaseService>>,
    AppJson(dto): AppJson<CreateKnowledgeBaseDto>,
) -> Result<Json<ApiResponse<KnowledgeBaseResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let kb = service.create(dto).await?;
    Ok(Json(ApiResponse::success(Some(kb), None, None)))
}

/// Get a knowledge base by ID
#[utoipa::path(
    get,
    path = "/api/admin/knowledge-bases/{id}",
    params(
        ("id" = Uuid, Path, description = "Knowledge base ID")
    ),
    responses(
        (status = 200, description = "Knowledge base retrieved successfully", body = ApiResponse<KnowledgeBaseResponseDto>),
        (status = 404, description = "Knowledge base not found")
    ),
    tag = "knowledge-bases"
)]
pub async fn get_knowledge_base(
    State(service): State<Arc<KnowledgeBaseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<KnowledgeBaseResponseDto>>> {
    let kb = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(kb), None, None)))
}

/// List knowledge bases
#[utoipa::path(
    get,
    path = "/api/admin/knowledge-bases",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Knowledge bases retrieved successfully", body = ApiResponse<Vec<KnowledgeBaseResponseDto>>)
    ),
    tag = "knowledge-bases"
)]
pub async fn list_knowledge_bases(
    State(service): State<Arc<KnowledgeBaseService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<KnowledgeBaseResponseDto>>>> {
    let (kbs, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(kbs),
        None,
        Some(Meta { total }),
    )))
}

/// Update a knowledge base
#[utoipa::path(
    put,
    path = "/api/admin/knowledge-bases/{id}",
    params(
        ("id" = Uuid, Path, description = "Knowledge base ID")
    ),
    request_body = UpdateKnowledgeBaseDto,
    responses(
        (status = 200, description = "Knowledge base updated successfully", body = ApiResponse<KnowledgeBaseResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Knowledge base not found")
    ),
    tag = "knowledge-bases"
)]
pub async fn update_knowledge_base(
    State(service): State<Arc<KnowledgeBaseService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateKnowledgeBaseDto>,
) -> Result<Json<ApiResponse<KnowledgeBaseResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let kb = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(kb), None, None)))
}

/// Delete a knowledge base and all its documents
#[utoipa::path(
    delete,
    path = "/api/admin/knowledge-bases/{id}",
    params(
        ("id" = Uuid, Path, description = "Knowledge base ID")
    ),
    responses(
        (status = 200, description = "Knowledge base deleted successfully"),
        (status = 404, description = "Knowledge base not found")
    ),
    tag = "knowledge-bases"
)]
pub async fn delete_knowledge_base(
    State(service): State<Arc<KnowledgeBaseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// List documents of a knowledge base in storage order
#[utoipa::path(
    get,
    path = "/api/admin/knowledge-bases/{id}/documents",
    params(
        ("id" = Uuid, Path, description = "Knowledge base ID")
    ),
    responses(
        (status = 200, description = "Documents retrieved successfully", body = ApiResponse<Vec<DocumentResponseDto>>),
        (status = 404, description = "Knowledge base not found")
    ),
    tag = "knowledge-bases"
)]
pub async fn list_documents(
    State(service): State<Arc<KnowledgeBaseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<DocumentResponseDto>>>> {
    let documents = service.list_documents(id).await?;
    let total = documents.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(documents),
        None,
        Some(Meta { total }),
    )))
}

/// Add a document to a knowledge base
#[utoipa::path(
    post,
    path = "/api/admin/knowledge-bases/{id}/documents",
    params(
        ("id" = Uuid, Path, description = "Knowledge base ID")
    ),
    request_body = CreateDocumentDto,
    responses(
        (status = 200, description = "Document added successfully", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Knowledge base not found")
    ),
    tag = "knowledge-bases"
)]
pub async fn add_document(
    State(service): State<Arc<KnowledgeBaseService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateDocumentDto>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let document = service.add_document(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(document), None, None)))
}

/// Update a document
#[utoipa::path(
    put,
    path = "/api/admin/knowledge-bases/{id}/documents/{document_id}",
    params(
        ("id" = Uuid, Path, description = "Knowledge base ID"),
        ("document_id" = Uuid, Path, description = "Document ID")
    ),
    request_body = UpdateDocumentDto,
    responses(
        (status = 200, description = "Document updated successfully", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Document not found")
    ),
    tag = "knowledge-bases"
)]
pub async fn update_document(
    State(service): State<Arc<KnowledgeBaseService>>,
    Path((id, document_id)): Path<(Uuid, Uuid)>,
    AppJson(dto): AppJson<UpdateDocumentDto>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let document = service.update_document(id, document_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(document), None, None)))
}

/// Delete a document
#[utoipa::path(
    delete,
    path = "/api/admin/knowledge-bases/{id}/documents/{document_id}",
    params(
        ("id" = Uuid, Path, description = "Knowledge base ID"),
        ("document_id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document deleted successfully"),
        (status = 404, description = "Document not found")
    ),
    tag = "knowledge-bases"
)]
pub async fn delete_document(
    State(service): State<Arc<KnowledgeBaseService>>,
    Path((id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_document(id, document_id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
