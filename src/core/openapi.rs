use utoipa::{Modify, OpenApi};

use crate::features::ai_models::{dtos as ai_models_dtos, handlers as ai_models_handlers};
use crate::features::follow_up_questions::{
    dtos as follow_ups_dtos, handlers as follow_ups_handlers,
};
use crate::features::knowledge_bases::{
    dtos as knowledge_bases_dtos, handlers as knowledge_bases_handlers,
};
use crate::features::prompts::{dtos as prompts_dtos, handlers as prompts_handlers};
use crate::features::responses::{dtos as responses_dtos, handlers as responses_handlers};
use crate::shared::pagination::SortDirection;
use crate::shared::status::RecordStatus;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Chat (public)
        responses_handlers::response_handler::respond,
        responses_handlers::response_handler::respond_to_follow_up,
        // Prompts
        prompts_handlers::prompt_handler::create_prompt,
        prompts_handlers::prompt_handler::get_prompt,
        prompts_handlers::prompt_handler::list_prompts,
        prompts_handlers::prompt_handler::update_prompt,
        prompts_handlers::prompt_handler::delete_prompt,
        prompts_handlers::prompt_handler::get_prompt_variables,
        prompts_handlers::prompt_handler::preview_prompt,
        // AI models
        ai_models_handlers::ai_model_handler::create_ai_model,
        ai_models_handlers::ai_model_handler::get_ai_model,
        ai_models_handlers::ai_model_handler::list_ai_models,
        ai_models_handlers::ai_model_handler::update_ai_model,
        ai_models_handlers::ai_model_handler::delete_ai_model,
        // Knowledge bases
        knowledge_bases_handlers::knowledge_base_handler::create_knowledge_base,
        knowledge_bases_handlers::knowledge_base_handler::get_knowledge_base,
        knowledge_bases_handlers::knowledge_base_handler::list_knowledge_bases,
        knowledge_bases_handlers::knowledge_base_handler::update_knowledge_base,
        knowledge_bases_handlers::knowledge_base_handler::delete_knowledge_base,
        knowledge_bases_handlers::knowledge_base_handler::list_documents,
        knowledge_bases_handlers::knowledge_base_handler::add_document,
        knowledge_bases_handlers::knowledge_base_handler::update_document,
        knowledge_bases_handlers::knowledge_base_handler::delete_document,
        // Follow-up questions
        follow_ups_handlers::follow_up_question_handler::list_follow_up_questions,
        follow_ups_handlers::follow_up_question_handler::create_follow_up_question,
        follow_ups_handlers::follow_up_question_handler::update_follow_up_question,
        follow_ups_handlers::follow_up_question_handler::delete_follow_up_question,
    ),
    components(
        schemas(
            // Shared
            Meta,
            RecordStatus,
            SortDirection,
            // Chat
            responses_dtos::ChatRequestDto,
            responses_dtos::FollowUpRequestDto,
            responses_dtos::ResponseErrorDto,
            responses_dtos::ResponseOutcomeDto,
            ApiResponse<responses_dtos::ResponseOutcomeDto>,
            // Prompts
            prompts_dtos::CreatePromptDto,
            prompts_dtos::UpdatePromptDto,
            prompts_dtos::PromptResponseDto,
            prompts_dtos::PromptVariablesDto,
            prompts_dtos::PreviewTemplateDto,
            prompts_dtos::PreviewTemplateResponseDto,
            ApiResponse<prompts_dtos::PromptResponseDto>,
            ApiResponse<Vec<prompts_dtos::PromptResponseDto>>,
            ApiResponse<prompts_dtos::PromptVariablesDto>,
            ApiResponse<prompts_dtos::PreviewTemplateResponseDto>,
            // AI models
            ai_models_dtos::CreateAiModelDto,
            ai_models_dtos::UpdateAiModelDto,
            ai_models_dtos::AiModelResponseDto,
            ApiResponse<ai_models_dtos::AiModelResponseDto>,
            ApiResponse<Vec<ai_models_dtos::AiModelResponseDto>>,
            // Knowledge bases
            knowledge_bases_dtos::CreateKnowledgeBaseDto,
            knowledge_bases_dtos::UpdateKnowledgeBaseDto,
            knowledge_bases_dtos::KnowledgeBaseResponseDto,
            knowledge_bases_dtos::CreateDocumentDto,
            knowledge_bases_dtos::UpdateDocumentDto,
            knowledge_bases_dtos::DocumentResponseDto,
            ApiResponse<knowledge_bases_dtos::KnowledgeBaseResponseDto>,
            ApiResponse<Vec<knowledge_bases_dtos::KnowledgeBaseResponseDto>>,
            ApiResponse<knowledge_bases_dtos::DocumentResponseDto>,
            ApiResponse<Vec<knowledge_bases_dtos::DocumentResponseDto>>,
            // Follow-up questions
            follow_ups_dtos::CreateFollowUpQuestionDto,
            follow_ups_dtos::UpdateFollowUpQuestionDto,
            follow_ups_dtos::FollowUpQuestionDto,
            ApiResponse<follow_ups_dtos::FollowUpQuestionDto>,
            ApiResponse<Vec<follow_ups_dtos::FollowUpQuestionDto>>,
        )
    ),
    tags(
        (name = "chat", description = "Guest-facing response generation"),
        (name = "prompts", description = "Prompt templates and their variables"),
        (name = "ai-models", description = "AI model configuration"),
        (name = "knowledge-bases", description = "Knowledge bases and their documents"),
        (name = "follow-up-questions", description = "Suggested follow-up questions per prompt"),
    ),
    info(
        title = "Guest Chat API",
        version = "0.1.0",
        description = "API documentation for the guest chat service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
