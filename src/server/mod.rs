//! HTTP server for the posts page and its JSON API.

pub mod api;
pub mod app;
pub mod errors;
pub mod tracing;
