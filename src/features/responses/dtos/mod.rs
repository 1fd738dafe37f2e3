pub mod response_dto;

pub use response_dto::{ChatRequestDto, FollowUpRequestDto, ResponseErrorDto, ResponseOutcomeDto};
