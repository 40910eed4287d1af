// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_view;
pub mod config;
pub mod constants;
pub mod errors;
pub mod handler;
pub mod key_handlers;
pub mod log_view;
pub mod logging;
pub mod message;
pub mod status_indicator;
pub mod transcript;
