// src/controllers/mod.rs

pub mod analytics;
pub mod companies;
pub mod curriculum;
pub mod discussions;
pub mod enrollments;
pub mod filter;
pub mod form;
pub mod inflight;
pub mod list;
pub mod mutation;
pub mod notify;
pub mod pagination;
