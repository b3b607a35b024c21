//! This module contains the API endpoints for the server.
pub mod posts;
pub mod routes;
pub mod state;
