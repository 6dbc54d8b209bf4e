/**
 * Request Validation
 *
 * Collects field errors for a request body so the client gets every problem
 * in one `errors` array instead of only the first.
 */

use std::sync::LazyLock;

use axum::extract::{FromRequest, Request};
use axum::Json;
use chrono::NaiveDate;
use regex::Regex;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::backend::error::{BackendError, FieldError};
use crate::shared::models::parse_date;
use crate::shared::SharedError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern compiles")
});

/// Basic shape check for an email address
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// Accumulates field errors
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `msg` against `param` unless `ok`
    pub fn check(&mut self, ok: bool, param: &str, msg: &str) {
        if !ok {
            self.errors.push(FieldError::new(param, msg));
        }
    }

    /// Required non-blank text, trimmed; empty string when missing
    pub fn required(&mut self, param: &str, value: Option<&str>, msg: &str) -> String {
        let value = value.map(str::trim).unwrap_or_default();
        self.check(!value.is_empty(), param, msg);
        value.to_string()
    }

    /// Required date; `msg` when missing, a parse message when malformed
    pub fn required_date(&mut self, param: &str, value: Option<&str>, msg: &str) -> Option<NaiveDate> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => self.date(param, raw),
            None => {
                self.errors.push(FieldError::new(param, msg));
                None
            }
        }
    }

    /// Optional date; blank counts as absent
    pub fn optional_date(&mut self, param: &str, value: Option<&str>) -> Option<NaiveDate> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|raw| self.date(param, raw))
    }

    fn date(&mut self, param: &str, raw: &str) -> Option<NaiveDate> {
        match parse_date(param, raw) {
            Ok(date) => Some(date),
            Err(SharedError::ValidationError { message, .. }) => {
                self.errors.push(FieldError::new(param, message));
                None
            }
            Err(e) => {
                self.errors.push(FieldError::new(param, e.to_string()));
                None
            }
        }
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Err(Validation)` carrying every recorded error, if any
    pub fn finish(self) -> Result<(), BackendError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            tracing::warn!("Validation failed: {:?}", self.errors);
            Err(BackendError::validation(self.errors))
        }
    }
}

/// Unwrap a value a passing `Validator` guarantees is present
pub fn validated<T>(value: Option<T>, param: &str, msg: &str) -> Result<T, BackendError> {
    value.ok_or_else(|| BackendError::validation(vec![FieldError::new(param, msg)]))
}

/// JSON request body whose rejections render as a 400 `errors` array
///
/// A wrong content type or a field of the wrong JSON type never reaches the
/// handler's `Validator`, so it is reported here instead.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Parse a path identifier; anything malformed is reported as not found
pub fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::not_found(not_found))
}
