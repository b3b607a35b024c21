//! Shape checks for submitted form fields.
//!
//! Only text fields are kept (file parts of a multipart body are dropped),
//! so a field is either a string or absent. Checks return a tagged result
//! instead of being spread through the handlers.
use derive_more::Display;

/// Fields of a submitted form, in submission order.
#[derive(Debug, Default, Clone)]
pub struct Fields {
    /// Raw name/value pairs. Names may repeat.
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for Fields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl Fields {
    /// Value of the first field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Why a form did not have the expected shape.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Required field was not submitted.
    #[display(fmt = "missing field `{}`", _0)]
    Missing(&'static str),
    /// Field was submitted but is not an integer id.
    #[display(fmt = "field `{}` is not a valid id: {:?}", _0, _1)]
    NotAnId(&'static str, String),
}

impl std::error::Error for FormError {}

/// Why a form body could not be read at all.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Body is bigger than the server accepts.
    #[display(fmt = "Form data too large")]
    TooLarge,
    /// Body is not url-encoded or multipart form data.
    #[display(fmt = "Unsupported form encoding: {}", _0)]
    UnsupportedType(String),
    /// Body claims a form encoding but does not decode as one.
    #[display(fmt = "Unreadable form data")]
    Unreadable,
}

impl std::error::Error for PayloadError {}

/// Require a text field.
///
/// Empty text is still text. Nothing is trimmed.
///
/// # Errors
/// Errors if the field is absent.
pub fn require_text<'fields>(
    fields: &'fields Fields,
    name: &'static str,
) -> Result<&'fields str, FormError> {
    fields.get(name).ok_or(FormError::Missing(name))
}

/// Require a text field holding an integer id.
///
/// Surrounding ASCII whitespace is ignored.
///
/// # Errors
/// Errors if the field is absent or does not parse as an `i64`.
pub fn require_id(fields: &Fields, name: &'static str) -> Result<i64, FormError> {
    let raw = require_text(fields, name)?;
    raw.trim_ascii()
        .parse::<i64>()
        .map_err(|_| FormError::NotAnId(name, raw.to_owned()))
}
