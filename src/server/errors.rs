//! Generic HTTP errors returned by the server.
use derive_more::{Display, Error};

/// Errors that are not specific to a single endpoint.
#[derive(Debug, Display, Error)]
pub enum HTTPError {
    /// No route matched the request.
    #[display(fmt = "404 Not Found")]
    NotFound,
    /// Something went wrong on our side, e.g. the database is unreachable.
    #[display(fmt = "500 Internal server error")]
    InternalServerError,
}
