pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
