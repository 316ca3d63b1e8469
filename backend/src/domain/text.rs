//! Text normalisation shared by use-case input checks.

/// Trim `raw` and require between 1 and `max_chars` characters.
///
/// The error is a human-readable message naming `field`.
pub(crate) fn required_text(field: &str, raw: &str, max_chars: usize) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.chars().count() > max_chars {
        return Err(format!("{field} must be at most {max_chars} characters"));
    }
    Ok(value.to_owned())
}

/// Trim an optional value, treating blank text as absent.
pub(crate) fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  hello ", Ok("hello".to_owned()))]
    #[case("   ", Err("name must not be empty".to_owned()))]
    #[case("abcdef", Err("name must be at most 5 characters".to_owned()))]
    fn required_text_trims_and_bounds(#[case] raw: &str, #[case] expected: Result<String, String>) {
        assert_eq!(required_text("name", raw, 5), expected);
    }

    #[rstest]
    fn blank_optional_text_is_dropped() {
        assert_eq!(optional_text(Some("  ".to_owned())), None);
        assert_eq!(optional_text(Some(" bio ".to_owned())), Some("bio".to_owned()));
        assert_eq!(optional_text(None), None);
    }
}
