use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::features::follow_up_questions::dtos::FollowUpQuestionDto;
use crate::features::knowledge_bases::models::concat_documents;
use crate::features::prompts::models::Prompt;
use crate::features::responses::context::{build_context, CallerContext};
use crate::features::responses::errors::ResponseError;
use crate::features::responses::generation::{GenerationRequest, TextGenerator};
use crate::features::responses::store::ResponseStore;
use crate::shared::constants::CTX_KNOWLEDGE_BASE;
use crate::shared::templating::{render, ContextValue};

/// Text produced for the guest plus the questions they can pick next
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedResponse {
    pub response: String,
    pub follow_up_questions: Vec<FollowUpQuestionDto>,
}

/// Turns a guest message into generated text using the stored chat configuration
pub struct ResponseService {
    store: Arc<dyn ResponseStore>,
    generator: Arc<dyn TextGenerator>,
}

impl ResponseService {
    pub fn new(store: Arc<dyn ResponseStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    /// Answer a free-text message with the active prompt
    pub async fn generate_response(
        &self,
        message: &str,
        caller: &CallerContext,
    ) -> Result<GeneratedResponse, ResponseError> {
        let prompt = self
            .store
            .latest_active_prompt()
            .await?
            .ok_or(ResponseError::NoActivePrompt)?;

        tracing::debug!("Using prompt: id={}, name={}", prompt.id, prompt.name);

        let response = self.generate_with_prompt(&prompt, message, caller).await?;
        let follow_up_questions = self.follow_up_questions(prompt.id).await;

        Ok(GeneratedResponse {
            response,
            follow_up_questions,
        })
    }

    /// Answer a selected follow-up question with the prompt it belongs to.
    ///
    /// The question text becomes `user_message`. No further follow-ups are returned.
    pub async fn respond_to_follow_up(
        &self,
        follow_up_id: Uuid,
        caller: &CallerContext,
    ) -> Result<GeneratedResponse, ResponseError> {
        let follow_up = self
            .store
            .find_follow_up_question(follow_up_id)
            .await?
            .ok_or(ResponseError::FollowUpNotFound(follow_up_id))?;

        let prompt = self
            .store
            .find_prompt(follow_up.prompt_id)
            .await?
            .ok_or(ResponseError::PromptNotFound(follow_up.prompt_id))?;

        tracing::debug!(
            "Answering follow-up: id={}, prompt_id={}",
            follow_up.id,
            prompt.id
        );

        let response = self
            .generate_with_prompt(&prompt, &follow_up.question, caller)
            .await?;

        Ok(GeneratedResponse {
            response,
            follow_up_questions: Vec::new(),
        })
    }

    async fn generate_with_prompt(
        &self,
        prompt: &Prompt,
        message: &str,
        caller: &CallerContext,
    ) -> Result<String, ResponseError> {
        let model = self
            .store
            .find_model(prompt.model_id)
            .await?
            .ok_or(ResponseError::ModelNotFound(prompt.model_id))?;

        if !model.status.is_active() {
            return Err(ResponseError::ModelInactive(model.id));
        }

        let mut ctx = build_context(message, caller, Utc::now());

        let knowledge_base = match prompt.knowledge_base_id {
            Some(kb_id) => {
                let text = self.knowledge_base_context(kb_id).await;
                ctx.insert(
                    CTX_KNOWLEDGE_BASE.to_string(),
                    ContextValue::from(text.clone()),
                );
                Some(text).filter(|t| !t.is_empty())
            }
            None => None,
        };

        let request = GenerationRequest {
            model_id: model.id.to_string(),
            prompt: render(prompt.effective_template(), &ctx),
            system_prompt: prompt
                .effective_system_prompt()
                .map(|system| render(system, &ctx)),
            knowledge_base_context: knowledge_base,
        };

        let response = self.generator.generate(request).await.map_err(|e| {
            tracing::error!(
                "Generation failed: prompt_id={}, model_id={}, error={}",
                prompt.id,
                model.id,
                e
            );
            ResponseError::Generation(e)
        })?;

        tracing::info!(
            "Response generated: prompt_id={}, model={}, response_len={}",
            prompt.id,
            model.name,
            response.len()
        );

        Ok(response)
    }

    /// Documents folded into one string. Failures degrade to an empty string.
    async fn knowledge_base_context(&self, knowledge_base_id: Uuid) -> String {
        match self.store.list_documents(knowledge_base_id).await {
            Ok(documents) if documents.is_empty() => {
                tracing::warn!(
                    "Knowledge base {} has no documents, continuing without context",
                    knowledge_base_id
                );
                String::new()
            }
            Ok(documents) => concat_documents(&documents),
            Err(e) => {
                tracing::warn!(
                    "Failed to load knowledge base {}, continuing without context: {}",
                    knowledge_base_id,
                    e
                );
                String::new()
            }
        }
    }

    async fn follow_up_questions(&self, prompt_id: Uuid) -> Vec<FollowUpQuestionDto> {
        match self.store.list_follow_up_questions(prompt_id).await {
            Ok(questions) => questions.into_iter().map(Into::into).collect(),
            Err(e) => {
                tracing::warn!(
                    "Failed to load follow-up questions for prompt {}: {}",
                    prompt_id,
                    e
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::responses::errors::GenerationError;
    use crate::shared::status::RecordStatus;
    use crate::shared::test_helpers::{
        ai_model, document, follow_up, prompt, FailingGenerator, InMemoryStore,
        RecordingGenerator,
    };
    use serde_json::json;

    fn service(
        store: InMemoryStore,
        generator: Arc<RecordingGenerator>,
    ) -> ResponseService {
        ResponseService::new(Arc::new(store), generator)
    }

    #[tokio::test]
    async fn test_echo_response_without_knowledge_base() {
        let model = ai_model(RecordStatus::Active);
        let store = InMemoryStore::new()
            .with_model(model.clone())
            .with_prompt(prompt("Hi {{user_message}}", model.id));
        let generator = Arc::new(RecordingGenerator::echo());

        let result = service(store, generator.clone())
            .generate_response("where is breakfast?", &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "Hi where is breakfast?");
        assert!(result.follow_up_questions.is_empty());

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model_id, model.id.to_string());
        assert_eq!(requests[0].system_prompt, None);
        assert_eq!(requests[0].knowledge_base_context, None);
    }

    #[tokio::test]
    async fn test_no_active_prompt() {
        let model = ai_model(RecordStatus::Active);
        let mut inactive = prompt("Hi", model.id);
        inactive.status = RecordStatus::Inactive;
        let store = InMemoryStore::new().with_model(model).with_prompt(inactive);
        let generator = Arc::new(RecordingGenerator::echo());

        let err = service(store, generator.clone())
            .generate_response("hello", &CallerContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResponseError::NoActivePrompt));
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_latest_active_prompt_wins() {
        let model = ai_model(RecordStatus::Active);
        let mut older = prompt("old {{user_message}}", model.id);
        older.created_at = Utc::now() - chrono::Duration::hours(1);
        let newer = prompt("new {{user_message}}", model.id);
        let store = InMemoryStore::new()
            .with_model(model)
            .with_prompt(newer)
            .with_prompt(older);

        let result = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("x", &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "new x");
    }

    #[tokio::test]
    async fn test_same_created_at_picks_highest_id() {
        let model = ai_model(RecordStatus::Active);
        let mut first = prompt("first {{user_message}}", model.id);
        let mut second = prompt("second {{user_message}}", model.id);
        second.created_at = first.created_at;
        if first.id > second.id {
            std::mem::swap(&mut first.id, &mut second.id);
        }
        let store = InMemoryStore::new()
            .with_model(model)
            .with_prompt(second)
            .with_prompt(first);

        let result = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("x", &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "second x");
    }

    #[tokio::test]
    async fn test_inactive_model() {
        let model = ai_model(RecordStatus::Inactive);
        let store = InMemoryStore::new()
            .with_model(model.clone())
            .with_prompt(prompt("Hi", model.id));
        let generator = Arc::new(RecordingGenerator::echo());

        let err = service(store, generator.clone())
            .generate_response("hello", &CallerContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResponseError::ModelInactive(id) if id == model.id));
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_model() {
        let missing = Uuid::new_v4();
        let store = InMemoryStore::new().with_prompt(prompt("Hi", missing));

        let err = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("hello", &CallerContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResponseError::ModelNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_store_failure_is_fatal() {
        let store = InMemoryStore::new().failing_prompts();

        let err = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("hello", &CallerContext::default())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "store_unavailable");
    }

    #[tokio::test]
    async fn test_knowledge_base_documents_in_order() {
        let model = ai_model(RecordStatus::Active);
        let kb_id = Uuid::new_v4();
        let mut p = prompt("Facts:\n{{knowledge_base}}\nQ: {{user_message}}", model.id);
        p.knowledge_base_id = Some(kb_id);
        let store = InMemoryStore::new()
            .with_model(model)
            .with_prompt(p)
            .with_document(document(kb_id, "Pool", "Open 8am to 8pm.", 2))
            .with_document(document(kb_id, "Check-in", "From 3pm.", 1));
        let generator = Arc::new(RecordingGenerator::echo());

        let result = service(store, generator.clone())
            .generate_response("pool hours?", &CallerContext::default())
            .await
            .unwrap();

        let kb = "Check-in:\nFrom 3pm.\n\nPool:\nOpen 8am to 8pm.";
        assert_eq!(result.response, format!("Facts:\n{}\nQ: pool hours?", kb));
        assert_eq!(
            generator.requests()[0].knowledge_base_context.as_deref(),
            Some(kb)
        );
    }

    #[tokio::test]
    async fn test_knowledge_base_failure_is_soft() {
        let model = ai_model(RecordStatus::Active);
        let mut p = prompt("[{{knowledge_base}}] {{user_message}}", model.id);
        p.knowledge_base_id = Some(Uuid::new_v4());
        let store = InMemoryStore::new()
            .with_model(model)
            .with_prompt(p)
            .failing_documents();
        let generator = Arc::new(RecordingGenerator::echo());

        let result = service(store, generator.clone())
            .generate_response("hello", &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "[] hello");
        assert_eq!(generator.requests()[0].knowledge_base_context, None);
    }

    #[tokio::test]
    async fn test_knowledge_base_without_documents_is_soft() {
        let model = ai_model(RecordStatus::Active);
        let mut p = prompt("[{{knowledge_base}}] {{user_message}}", model.id);
        p.knowledge_base_id = Some(Uuid::new_v4());
        let store = InMemoryStore::new()
            .with_model(model)
            .with_prompt(p)
            .with_document(document(Uuid::new_v4(), "Elsewhere", "Not linked.", 0));
        let generator = Arc::new(RecordingGenerator::echo());

        let result = service(store, generator.clone())
            .generate_response("hello", &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "[] hello");
        assert_eq!(generator.requests()[0].knowledge_base_context, None);
    }

    #[tokio::test]
    async fn test_knowledge_base_placeholder_literal_without_knowledge_base() {
        let model = ai_model(RecordStatus::Active);
        let store = InMemoryStore::new()
            .with_model(model.clone())
            .with_prompt(prompt("{{knowledge_base}} {{user_message}}", model.id));

        let result = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("hello", &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "{{knowledge_base}} hello");
    }

    #[tokio::test]
    async fn test_follow_ups_ordered_by_position() {
        let model = ai_model(RecordStatus::Active);
        let p = prompt("{{user_message}}", model.id);
        let store = InMemoryStore::new()
            .with_model(model)
            .with_follow_up(follow_up(p.id, "Is there parking?", 2))
            .with_follow_up(follow_up(p.id, "When is breakfast?", 0))
            .with_follow_up(follow_up(Uuid::new_v4(), "Unrelated", 1))
            .with_prompt(p);

        let result = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("hi", &CallerContext::default())
            .await
            .unwrap();

        let questions: Vec<_> = result
            .follow_up_questions
            .iter()
            .map(|q| q.question.as_str())
            .collect();
        assert_eq!(questions, vec!["When is breakfast?", "Is there parking?"]);
    }

    #[tokio::test]
    async fn test_follow_up_failure_is_soft() {
        let model = ai_model(RecordStatus::Active);
        let store = InMemoryStore::new()
            .with_model(model.clone())
            .with_prompt(prompt("{{user_message}}", model.id))
            .failing_follow_ups();

        let result = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("hi", &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "hi");
        assert!(result.follow_up_questions.is_empty());
    }

    #[tokio::test]
    async fn test_template_falls_back_to_content() {
        let model = ai_model(RecordStatus::Active);
        let mut p = prompt("   ", model.id);
        p.content = "Guest says: {{user_message}}".to_string();
        let store = InMemoryStore::new().with_model(model).with_prompt(p);

        let result = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("hello", &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "Guest says: hello");
    }

    #[tokio::test]
    async fn test_system_prompt_is_substituted() {
        let model = ai_model(RecordStatus::Active);
        let mut p = prompt("{{user_message}}", model.id);
        p.system_prompt = Some("You work at {{hotel.name}}. Session {{session_id}}.".to_string());
        let store = InMemoryStore::new().with_model(model).with_prompt(p);
        let generator = Arc::new(RecordingGenerator::echo());
        let caller = CallerContext {
            session_id: Some("s-1".to_string()),
            extra: json!({"hotel": {"name": "Harbor Inn"}})
                .as_object()
                .cloned()
                .unwrap(),
            ..Default::default()
        };

        service(store, generator.clone())
            .generate_response("hi", &caller)
            .await
            .unwrap();

        assert_eq!(
            generator.requests()[0].system_prompt.as_deref(),
            Some("You work at Harbor Inn. Session s-1.")
        );
    }

    #[tokio::test]
    async fn test_extras_override_reserved_keys() {
        let model = ai_model(RecordStatus::Active);
        let store = InMemoryStore::new()
            .with_model(model.clone())
            .with_prompt(prompt("{{user_message}} / {{user_id}}", model.id));
        let caller = CallerContext {
            user_id: Some("guest-1".to_string()),
            extra: json!({"user_message": "from extras"}).as_object().cloned().unwrap(),
            ..Default::default()
        };

        let result = service(store, Arc::new(RecordingGenerator::echo()))
            .generate_response("from caller", &caller)
            .await
            .unwrap();

        assert_eq!(result.response, "from extras / guest-1");
    }

    #[tokio::test]
    async fn test_generation_error_wraps_cause() {
        let model = ai_model(RecordStatus::Active);
        let store = InMemoryStore::new()
            .with_model(model.clone())
            .with_prompt(prompt("{{user_message}}", model.id));
        let svc = ResponseService::new(Arc::new(store), Arc::new(FailingGenerator));

        let err = svc
            .generate_response("hi", &CallerContext::default())
            .await
            .unwrap_err();

        match err {
            ResponseError::Generation(GenerationError::Remote(message)) => {
                assert_eq!(message, "upstream unavailable")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_follow_up_selection_uses_its_prompt() {
        let model = ai_model(RecordStatus::Active);
        let mut linked = prompt("Follow-up: {{user_message}}", model.id);
        linked.status = RecordStatus::Inactive;
        let active = prompt("Active: {{user_message}}", model.id);
        let question = follow_up(linked.id, "Do you allow pets?", 0);
        let store = InMemoryStore::new()
            .with_model(model)
            .with_prompt(active)
            .with_follow_up(question.clone())
            .with_follow_up(follow_up(linked.id, "Another?", 1))
            .with_prompt(linked);

        let result = service(store, Arc::new(RecordingGenerator::echo()))
            .respond_to_follow_up(question.id, &CallerContext::default())
            .await
            .unwrap();

        assert_eq!(result.response, "Follow-up: Do you allow pets?");
        assert!(result.follow_up_questions.is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_with_inactive_model() {
        let model = ai_model(RecordStatus::Inactive);
        let p = prompt("Follow-up: {{user_message}}", model.id);
        let question = follow_up(p.id, "Is the spa open?", 0);
        let store = InMemoryStore::new()
            .with_model(model.clone())
            .with_follow_up(question.clone())
            .with_prompt(p);
        let generator = Arc::new(RecordingGenerator::echo());

        let err = service(store, generator.clone())
            .respond_to_follow_up(question.id, &CallerContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResponseError::ModelInactive(id) if id == model.id));
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_not_found() {
        let missing = Uuid::new_v4();
        let err = service(InMemoryStore::new(), Arc::new(RecordingGenerator::echo()))
            .respond_to_follow_up(missing, &CallerContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResponseError::FollowUpNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_follow_up_prompt_not_found() {
        let orphan_prompt = Uuid::new_v4();
        let question = follow_up(orphan_prompt, "Orphan?", 0);
        let store = InMemoryStore::new().with_follow_up(question.clone());

        let err = service(store, Arc::new(RecordingGenerator::echo()))
            .respond_to_follow_up(question.id, &CallerContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResponseError::PromptNotFound(id) if id == orphan_prompt));
    }
}
