//! Response assembly: pick the active prompt, check its model, build the
//! template context (plus knowledge base when linked), substitute, call the
//! generation function and attach the prompt's follow-up questions.
//!
//! Storage and generation sit behind [`store::ResponseStore`] and
//! [`generation::TextGenerator`].

pub mod context;
pub mod dtos;
pub mod errors;
pub mod generation;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use services::ResponseService;
