use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{AppError, FieldError};

/// Raw JSON object body, before stripping and validation.
pub type Payload = Map<String, Value>;

/// Confirmation body returned by every successful delete.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Blog has been deleted.")]
    pub message: String,
}

impl DeleteResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Server-managed keys that are dropped from every payload.
const ALWAYS_STRIPPED: &[&str] = &["id", "_id"];

const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

/// Check an address against the conventional `local@domain.tld` grammar.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH
        && !email.starts_with('.')
        && !email.contains("..")
        && EMAIL_RE.is_match(email)
}

/// Validation Gate over one request body.
///
/// Stripped keys are removed up front. Each check records its violation and
/// keeps going, so a rejected payload reports every broken field at once.
pub struct Gate {
    payload: Payload,
    errors: Vec<FieldError>,
}

enum Field<'a> {
    Missing,
    Text(&'a str),
    NotText,
}

impl Gate {
    pub fn new(mut payload: Payload, stripped: &[&str]) -> Self {
        for key in ALWAYS_STRIPPED.iter().chain(stripped) {
            payload.remove(*key);
        }
        Self {
            payload,
            errors: Vec::new(),
        }
    }

    fn field(&self, name: &str) -> Field<'_> {
        match self.payload.get(name) {
            None | Some(Value::Null) => Field::Missing,
            Some(Value::String(s)) => Field::Text(s.trim()),
            Some(_) => Field::NotText,
        }
    }

    fn reject(&mut self, field: &str, message: String) {
        self.errors.push(FieldError::new(field, message));
    }

    fn text(&mut self, name: &str, label: &str, min: usize, required: bool) -> Option<String> {
        let checked = match self.field(name) {
            Field::Missing if required => Err(format!("{label} is a mandatory field")),
            Field::Missing => return None,
            Field::NotText => Err(format!("{label} must be a string")),
            Field::Text(s) if s.chars().count() < min => Err(format!(
                "{label} must be at least {min} characters long"
            )),
            Field::Text(s) => Ok(s.to_string()),
        };
        checked.map_err(|msg| self.reject(name, msg)).ok()
    }

    fn email(&mut self, name: &str, label: &str, required: bool) -> Option<String> {
        let checked = match self.field(name) {
            Field::Missing if required => Err(format!("{label} is a mandatory field")),
            Field::Missing => return None,
            Field::NotText => Err(format!("{label} must be a string")),
            Field::Text(s) if !is_valid_email(s) => {
                Err(format!("{label} must be a valid email address"))
            }
            Field::Text(s) => Ok(s.to_string()),
        };
        checked.map_err(|msg| self.reject(name, msg)).ok()
    }

    /// A text field that must be present, at least `min` characters once trimmed.
    pub fn required_text(&mut self, name: &str, label: &str, min: usize) -> Option<String> {
        self.text(name, label, min, true)
    }

    /// A text field that may be absent or null, checked like [`Gate::required_text`] otherwise.
    pub fn optional_text(&mut self, name: &str, label: &str, min: usize) -> Option<String> {
        self.text(name, label, min, false)
    }

    pub fn required_email(&mut self, name: &str, label: &str) -> Option<String> {
        self.email(name, label, true)
    }

    pub fn optional_email(&mut self, name: &str, label: &str) -> Option<String> {
        self.email(name, label, false)
    }

    /// A reference to another record, given as its id string.
    pub fn required_id(&mut self, name: &str, label: &str) -> Option<Uuid> {
        let checked = match self.field(name) {
            Field::Missing => Err(format!("{label} is a mandatory field")),
            Field::Text(s) => Uuid::parse_str(s).map_err(|_| format!("{label} must be a valid id")),
            Field::NotText => Err(format!("{label} must be a valid id")),
        };
        checked.map_err(|msg| self.reject(name, msg)).ok()
    }

    /// Reject with every collected violation, or assemble the sanitized request.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, AppError> {
        if !self.errors.is_empty() {
            return Err(AppError::InvalidFields(self.errors));
        }
        build().ok_or_else(|| AppError::Internal("validated payload is incomplete".into()))
    }
}
