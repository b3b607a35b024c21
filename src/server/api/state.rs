//! Centralized state management for the Actix web server
use crate::{config::Env, db};

/// Global, read-only state
pub trait Global {
    /// Database connection
    fn db(&self) -> &db::DatabaseConnection;
    /// Resolved environment
    fn env(&self) -> &Env;
}

/// Application state
///
/// Cloned into every worker. Holds no per-request data.
#[derive(Debug, Clone)]
pub struct App {
    /// Database connection
    pub db: db::DatabaseConnection,
    /// Resolved environment
    pub env: Env,
}

impl Global for App {
    fn db(&self) -> &db::DatabaseConnection {
        &self.db
    }

    fn env(&self) -> &Env {
        &self.env
    }
}
