pub mod follow_up_question;

pub use follow_up_question::FollowUpQuestion;
