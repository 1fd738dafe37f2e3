pub mod follow_up_question_handler;

pub use follow_up_question_handler::*;
