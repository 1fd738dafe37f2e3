pub mod follow_up_question_service;

pub use follow_up_question_service::FollowUpQuestionService;
