pub mod ai_model_service;

pub use ai_model_service::AiModelService;
