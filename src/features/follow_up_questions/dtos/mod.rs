pub mod follow_up_question_dto;

pub use follow_up_question_dto::{
    CreateFollowUpQuestionDto, FollowUpQuestionDto, UpdateFollowUpQuestionDto,
};
