//! Listing, creating and deleting posts.
//!
//! Operations take the store capability as an argument and hold nothing
//! between calls. Which operation runs is decided by the request method
//! alone, see [`Intent::from_method`].
use actix_web::http::Method;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::config::Env;
use crate::db::models::post::{Manager, NewPost, Post};

use self::form::{FormError, Fields, PayloadError};

pub mod form;

/// Error reported for any malformed form.
pub const INVALID_FORM_DATA: &str = "Invalid form data";
/// Error reported when the store rejects a mutation.
pub const STORE_FAILURE: &str = "Unable to save changes";
/// Form field that lets a `POST` stand in for another method.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Everything the home page needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoaderData {
    /// All posts in store order.
    pub posts: Vec<Post>,
    /// Message from the environment.
    pub message: String,
}

/// Outcome of a create or delete.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionData {
    /// Whether the mutation was applied.
    pub success: bool,
    /// Reason for failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionData {
    /// Successful mutation.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Failed mutation.
    #[must_use]
    pub fn failed(error: &str) -> Self {
        Self {
            success: false,
            error: Some(error.to_owned()),
        }
    }
}

/// Why a mutation was not applied.
#[derive(Debug, Display)]
pub enum Error {
    /// Form did not have the expected shape. The store was not touched.
    #[display(fmt = "{}", INVALID_FORM_DATA)]
    Validation(FormError),
    /// No operation is bound to this method.
    #[display(fmt = "Unsupported method: {}", _0)]
    UnsupportedMethod(String),
    /// The store call failed.
    #[display(fmt = "{}", STORE_FAILURE)]
    Store(anyhow::Error),
    /// The body could not be read as a form. The store was not touched.
    #[display(fmt = "{}", _0)]
    Payload(PayloadError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Self::Validation(ref err) => Some(err),
            Self::Store(ref err) => Some(&**err),
            Self::Payload(ref err) => Some(err),
            Self::UnsupportedMethod(_) => None,
        }
    }
}

impl From<FormError> for Error {
    fn from(err: FormError) -> Self {
        Self::Validation(err)
    }
}

impl From<PayloadError> for Error {
    fn from(err: PayloadError) -> Self {
        Self::Payload(err)
    }
}

impl From<&Error> for ActionData {
    fn from(err: &Error) -> Self {
        Self::failed(&err.to_string())
    }
}

/// Operation selected by a request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Read every post.
    List,
    /// Insert one post.
    Create,
    /// Remove one post by id.
    Delete,
}

impl Intent {
    /// Map a request method onto an operation.
    ///
    /// # Errors
    /// Errors with [`Error::UnsupportedMethod`] for anything but
    /// `GET`, `HEAD`, `POST` and `DELETE`.
    pub fn from_method(method: &Method) -> Result<Self, Error> {
        match *method {
            Method::GET | Method::HEAD => Ok(Self::List),
            Method::POST => Ok(Self::Create),
            Method::DELETE => Ok(Self::Delete),
            _ => Err(Error::UnsupportedMethod(method.to_string())),
        }
    }
}

/// Resolve the method a request stands for.
///
/// HTML forms can only `POST`, so a `POST` carrying a `_method` field is
/// treated as that method instead.
///
/// # Errors
/// Errors if the override is not a valid method name.
pub fn effective_method(method: &Method, fields: &Fields) -> Result<Method, Error> {
    if *method != Method::POST {
        return Ok(method.clone());
    }
    match fields.get(METHOD_OVERRIDE_FIELD) {
        Some(raw) => Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| Error::UnsupportedMethod(raw.to_owned())),
        None => Ok(Method::POST),
    }
}

/// Fetch every post, plus the environment message.
///
/// # Errors
/// Errors if the store cannot be read.
#[tracing::instrument(skip(store, env))]
pub async fn list<M: Manager + ?Sized>(store: &M, env: &Env) -> anyhow::Result<LoaderData> {
    let posts = store.find_all().await?;
    tracing::debug!(count = posts.len(), "Listed posts");
    Ok(LoaderData {
        posts,
        message: env.message.clone(),
    })
}

/// Create a post from the `title` and `content` fields.
///
/// # Errors
/// Errors if either field is missing, or if the insert fails.
#[tracing::instrument(skip(store, fields))]
pub async fn create<M: Manager + ?Sized>(store: &M, fields: &Fields) -> Result<(), Error> {
    let title = form::require_text(fields, "title")?;
    let content = form::require_text(fields, "content")?;
    let id = store
        .create(&NewPost::new(title, content))
        .await
        .map_err(Error::Store)?;
    tracing::info!(id, "Created post");
    Ok(())
}

/// Delete the post named by the `id` field.
///
/// Deleting an id that is not there is still a success.
///
/// # Errors
/// Errors if the field is missing or not an integer, or if the delete fails.
#[tracing::instrument(skip(store, fields))]
pub async fn delete<M: Manager + ?Sized>(store: &M, fields: &Fields) -> Result<(), Error> {
    let id = form::require_id(fields, "id")?;
    let deleted = store.delete_by_id(id).await.map_err(Error::Store)?;
    if deleted == 0 {
        tracing::debug!(id, "No post to delete");
    } else {
        tracing::info!(id, "Deleted post");
    }
    Ok(())
}

/// Apply the mutation a request method stands for.
///
/// # Errors
/// Errors if the method is not bound to a mutation, if the form has the
/// wrong shape, or if the store call fails.
pub async fn mutate<M: Manager + ?Sized>(
    store: &M,
    method: &Method,
    fields: &Fields,
) -> Result<Intent, Error> {
    let method = effective_method(method, fields)?;
    let intent = Intent::from_method(&method)?;
    match intent {
        Intent::Create => create(store, fields).await?,
        Intent::Delete => delete(store, fields).await?,
        Intent::List => return Err(Error::UnsupportedMethod(method.to_string())),
    }
    Ok(intent)
}
