pub mod prompt_dto;

pub use prompt_dto::{
    CreatePromptDto, PreviewTemplateDto, PreviewTemplateResponseDto, PromptQueryParams,
    PromptResponseDto, PromptVariablesDto, UpdatePromptDto,
};
