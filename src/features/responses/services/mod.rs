pub mod response_service;

pub use response_service::{GeneratedResponse, ResponseService};
