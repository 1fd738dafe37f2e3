pub mod ai_model_dto;

pub use ai_model_dto::{AiModelQueryParams, AiModelResponseDto, CreateAiModelDto, UpdateAiModelDto};
