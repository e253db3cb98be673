// src/lib.rs

pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod export;
pub mod models;
pub mod state;
pub mod utils;

pub use api::ApiClient;
pub use error::AppError;
pub use state::ConsoleState;
