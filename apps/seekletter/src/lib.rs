pub mod board;
pub mod cli;
pub mod collector;
pub mod config;
pub mod errors;
pub mod letters;
pub mod llm_client;
pub mod models;
pub mod store;

pub use errors::AppError;
