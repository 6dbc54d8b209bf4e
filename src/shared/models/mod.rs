//! Domain documents
//!
//! Each document owns its nested lists and exposes the mutations the API
//! performs on them. Handlers load a document, call one of these methods and
//! write the document back; no method here touches storage.

use chrono::{DateTime, NaiveDate};

use crate::shared::SharedError;

/// User account
pub mod user;

/// Developer profile with experience and education history
pub mod profile;

/// Feed post with likes and comments
pub mod post;

pub use user::{gravatar_url, PublicUser, User};
pub use profile::{parse_skills, Education, Experience, Profile, ProfileUpdate, Social};
pub use post::{Comment, Like, LikeError, Post};

/// Parse a calendar date sent by the client
///
/// Accepts a plain `YYYY-MM-DD` date (what HTML date inputs send) or a full
/// RFC 3339 timestamp, in which case only the date part is kept.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, SharedError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| SharedError::validation(field, format!("{} must be a valid date", field)))
}
