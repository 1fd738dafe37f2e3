//! In-memory collaborators and record builders for tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::features::ai_models::models::AiModel;
use crate::features::follow_up_questions::models::FollowUpQuestion;
use crate::features::knowledge_bases::models::KnowledgeBaseDocument;
use crate::features::prompts::models::Prompt;
use crate::features::responses::errors::{GenerationError, StoreError};
use crate::features::responses::generation::{GenerationRequest, TextGenerator};
use crate::features::responses::store::{ResponseStore, StoreResult};
use crate::shared::status::RecordStatus;

pub fn ai_model(status: RecordStatus) -> AiModel {
    AiModel {
        id: Uuid::new_v4(),
        name: "Concierge GPT".to_string(),
        provider: "openai".to_string(),
        model_identifier: "gpt-4o-mini".to_string(),
        description: None,
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// An active prompt with the given template
pub fn prompt(template: &str, model_id: Uuid) -> Prompt {
    Prompt {
        id: Uuid::new_v4(),
        name: "Front desk".to_string(),
        description: None,
        template: template.to_string(),
        content: String::new(),
        system_prompt: None,
        status: RecordStatus::Active,
        model_id,
        knowledge_base_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn document(
    knowledge_base_id: Uuid,
    title: &str,
    content: &str,
    position: i32,
) -> KnowledgeBaseDocument {
    KnowledgeBaseDocument {
        id: Uuid::new_v4(),
        knowledge_base_id,
        title: title.to_string(),
        content: content.to_string(),
        position,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn follow_up(prompt_id: Uuid, question: &str, position: i32) -> FollowUpQuestion {
    FollowUpQuestion {
        id: Uuid::new_v4(),
        prompt_id,
        question: question.to_string(),
        position,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// `ResponseStore` over plain vectors, with switches to make reads fail
#[derive(Default)]
pub struct InMemoryStore {
    prompts: Vec<Prompt>,
    models: Vec<AiModel>,
    documents: Vec<KnowledgeBaseDocument>,
    follow_ups: Vec<FollowUpQuestion>,
    fail_prompts: bool,
    fail_documents: bool,
    fail_follow_ups: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(mut self, prompt: Prompt) -> Self {
        self.prompts.push(prompt);
        self
    }

    pub fn with_model(mut self, model: AiModel) -> Self {
        self.models.push(model);
        self
    }

    pub fn with_document(mut self, document: KnowledgeBaseDocument) -> Self {
        self.documents.push(document);
        self
    }

    pub fn with_follow_up(mut self, follow_up: FollowUpQuestion) -> Self {
        self.follow_ups.push(follow_up);
        self
    }

    pub fn failing_prompts(mut self) -> Self {
        self.fail_prompts = true;
        self
    }

    pub fn failing_documents(mut self) -> Self {
        self.fail_documents = true;
        self
    }

    pub fn failing_follow_ups(mut self) -> Self {
        self.fail_follow_ups = true;
        self
    }

    fn check(failing: bool, what: &str) -> StoreResult<()> {
        if failing {
            return Err(StoreError::Backend(format!("{} unavailable", what)));
        }
        Ok(())
    }
}

#[async_trait]
impl ResponseStore for InMemoryStore {
    async fn latest_active_prompt(&self) -> StoreResult<Option<Prompt>> {
        Self::check(self.fail_prompts, "prompts")?;
        Ok(self
            .prompts
            .iter()
            .filter(|p| p.status.is_active())
            .max_by_key(|p| (p.created_at, p.id))
            .cloned())
    }

    async fn find_prompt(&self, id: Uuid) -> StoreResult<Option<Prompt>> {
        Self::check(self.fail_prompts, "prompts")?;
        Ok(self.prompts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_model(&self, id: Uuid) -> StoreResult<Option<AiModel>> {
        Ok(self.models.iter().find(|m| m.id == id).cloned())
    }

    async fn list_documents(
        &self,
        knowledge_base_id: Uuid,
    ) -> StoreResult<Vec<KnowledgeBaseDocument>> {
        Self::check(self.fail_documents, "documents")?;
        let mut documents: Vec<_> = self
            .documents
            .iter()
            .filter(|d| d.knowledge_base_id == knowledge_base_id)
            .cloned()
            .collect();
        documents.sort_by_key(|d| (d.position, d.created_at));
        Ok(documents)
    }

    async fn list_follow_up_questions(
        &self,
        prompt_id: Uuid,
    ) -> StoreResult<Vec<FollowUpQuestion>> {
        Self::check(self.fail_follow_ups, "follow-up questions")?;
        let mut questions: Vec<_> = self
            .follow_ups
            .iter()
            .filter(|q| q.prompt_id == prompt_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| (q.position, q.created_at));
        Ok(questions)
    }

    async fn find_follow_up_question(&self, id: Uuid) -> StoreResult<Option<FollowUpQuestion>> {
        Ok(self.follow_ups.iter().find(|q| q.id == id).cloned())
    }
}

/// Returns the substituted prompt as the response and keeps every request
#[derive(Default)]
pub struct RecordingGenerator {
    requests: Mutex<Vec<GenerationRequest>>,
}

impl RecordingGenerator {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let response = request.prompt.clone();
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

/// Always fails with a remote error
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Remote("upstream unavailable".to_string()))
    }
}
