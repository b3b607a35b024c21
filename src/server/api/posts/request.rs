//! Reading the fields of a submitted form.
use actix_multipart::Multipart;
use actix_web::{error::UrlencodedError, web, HttpMessage as _, HttpRequest};
use futures_util::StreamExt as _;

use crate::posts::form::{Fields, PayloadError};

/// Largest form body accepted, in bytes. Applies to both encodings.
pub const FORM_LIMIT: usize = 16 * 1024 * 1024;

/// Url-encoded body as extracted by actix.
pub type UrlencodedForm = Result<web::Form<Vec<(String, String)>>, actix_web::Error>;

/// Turn whatever the client sent into form fields.
///
/// A url-encoded body is decoded by the [`web::Form`] extractor. When that
/// extractor rejects the content type it leaves the payload untouched, so a
/// multipart body is still there for `multipart`. A request without any
/// content type carries no fields.
///
/// # Errors
/// Errors if the body is too large, is in some other encoding, or does not
/// decode.
pub async fn read_fields(
    req: &HttpRequest,
    form: UrlencodedForm,
    multipart: Multipart,
) -> Result<Fields, PayloadError> {
    let err = match form {
        Ok(form) => return Ok(Fields::from(form.into_inner())),
        Err(err) => err,
    };
    match err.as_error::<UrlencodedError>() {
        Some(&UrlencodedError::ContentType) => {}
        Some(&UrlencodedError::Overflow { size, limit, .. }) => {
            tracing::debug!(size, limit, "Form body over limit");
            return Err(PayloadError::TooLarge);
        }
        _ => {
            tracing::debug!("Unable to decode url-encoded form: {err}");
            return Err(PayloadError::Unreadable);
        }
    }
    let content_type = req.content_type();
    if content_type.is_empty() {
        return Ok(Fields::default());
    }
    if content_type.eq_ignore_ascii_case(mime::MULTIPART_FORM_DATA.essence_str()) {
        return read_multipart(multipart).await;
    }
    Err(PayloadError::UnsupportedType(content_type.to_owned()))
}

/// Collect the text parts of a multipart body.
///
/// Parts carrying a file name are drained and dropped, which makes them
/// absent as far as [`Fields::get`] is concerned.
async fn read_multipart(mut multipart: Multipart) -> Result<Fields, PayloadError> {
    let mut pairs = Vec::new();
    let mut total = 0_usize;
    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(|err| {
            tracing::debug!("Unable to read multipart body: {err}");
            PayloadError::Unreadable
        })?;
        let name = field
            .content_disposition()
            .filter(|disposition| disposition.get_filename().is_none())
            .and_then(|disposition| disposition.get_name())
            .map(str::to_owned);
        let mut value = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| {
                tracing::debug!("Unable to read multipart field: {err}");
                PayloadError::Unreadable
            })?;
            total = total.saturating_add(chunk.len());
            if total > FORM_LIMIT {
                tracing::debug!(limit = FORM_LIMIT, "Multipart body over limit");
                return Err(PayloadError::TooLarge);
            }
            if name.is_some() {
                value.extend_from_slice(&chunk);
            }
        }
        if let Some(name) = name {
            let value = String::from_utf8(value).map_err(|_| PayloadError::Unreadable)?;
            pairs.push((name, value));
        }
    }
    Ok(Fields::from(pairs))
}
