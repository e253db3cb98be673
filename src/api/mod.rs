// src/api/mod.rs

pub mod client;
pub mod endpoints;

pub use client::{Ack, ApiClient, ApiResponse, Page, upsert_param};
