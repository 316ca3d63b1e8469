//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request schemas derive [`validator::Validate`]; [`validated`] runs the
//! rules and turns the first failing field into an `invalid_request` error
//! whose details name the field in its camelCase wire form. The remaining
//! helpers parse path segments and closed vocabularies the same way.

use std::borrow::Cow;
use std::str::FromStr;

use heck::ToLowerCamelCase;
use serde_json::json;
use url::Url;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{Error, UnknownLabel};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    UnknownLabel,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::UnknownLabel => "unknown_label",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Run the schema's rules, returning it untouched when they all pass.
///
/// Fields are reported in name order so the same payload always yields the
/// same error.
pub(crate) fn validated<T: Validate>(schema: T) -> Result<T, Error> {
    match schema.validate() {
        Ok(()) => Ok(schema),
        Err(errors) => Err(first_failure(&errors)),
    }
}

fn first_failure(errors: &ValidationErrors) -> Error {
    let mut fields: Vec<(String, &ValidationError)> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, failures)| failures.first().map(|first| (field.to_string(), first)))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let Some((field, failure)) = fields.into_iter().next() else {
        return Error::invalid_request("request failed validation");
    };
    let field = camel_case(&field);
    let message = failure
        .message
        .as_ref()
        .map(|message| format!("{field} {message}"))
        .unwrap_or_else(|| format!("{field} is invalid"));
    Error::invalid_request(message.clone()).with_details(json!({
        "field": field,
        "code": failure.code,
        "message": message,
    }))
}

/// Convert a Rust field name into the camelCase key clients send.
pub(crate) fn camel_case(field: &str) -> String {
    field.to_lower_camel_case()
}

pub(crate) fn rule_failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// `validator` rule: the text is a UUID.
pub(crate) fn uuid_text(value: &str) -> Result<(), ValidationError> {
    Uuid::parse_str(value.trim())
        .map(|_| ())
        .map_err(|_| rule_failure("uuid", "must be a valid UUID"))
}

/// `validator` rule: the text has at least one non-whitespace character.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(rule_failure("blank", "must not be blank"))
    } else {
        Ok(())
    }
}

/// `validator` rule: the text is an absolute `http` or `https` URL with a
/// host.
///
/// Blank text passes; services read it as "clear this field".
pub(crate) fn web_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(rule_failure("url", "must be an http(s) URL")),
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

/// Parse a UUID from a path segment or validated payload field.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an optional UUID, treating absence as `None`.
pub(crate) fn parse_optional_uuid(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<Uuid>, Error> {
    value.map(|raw| parse_uuid(raw, field)).transpose()
}

/// Parse a member of a closed vocabulary such as a channel kind.
pub(crate) fn parse_label<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = UnknownLabel>,
{
    value.parse().map_err(|err: UnknownLabel| {
        let field = field.as_str();
        Error::invalid_request(format!("{field}: {err}")).with_details(json!({
            "field": field,
            "value": err.value(),
            "code": ErrorCode::UnknownLabel.as_str(),
        }))
    })
}

/// Parse an optional vocabulary member.
pub(crate) fn parse_optional_label<T>(value: Option<&str>, field: FieldName) -> Result<Option<T>, Error>
where
    T: FromStr<Err = UnknownLabel>,
{
    value.map(|raw| parse_label(raw, field)).transpose()
}
