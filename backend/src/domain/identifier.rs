//! Parsing of raw resource identifiers.
//!
//! Use cases that accept identifiers as text reject blank or malformed
//! values before touching a repository.

use uuid::Uuid;

/// Reasons a raw identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Nothing but whitespace was supplied.
    #[error("identifier must not be empty")]
    Empty,
    /// The text is not a UUID.
    #[error("identifier '{value}' is not a valid UUID")]
    Malformed { value: String },
}

/// Parse a textual identifier into a UUID.
///
/// # Examples
/// ```
/// use commons::domain::{parse_identifier, IdentifierError};
///
/// assert!(parse_identifier("  ").is_err());
/// assert_eq!(parse_identifier(""), Err(IdentifierError::Empty));
/// ```
pub fn parse_identifier(raw: &str) -> Result<Uuid, IdentifierError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty);
    }
    Uuid::parse_str(trimmed).map_err(|_| IdentifierError::Malformed {
        value: trimmed.to_owned(),
    })
}
