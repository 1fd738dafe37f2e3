pub mod ai_model_handler;

pub use ai_model_handler::*;
