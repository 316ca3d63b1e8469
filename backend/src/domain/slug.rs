//! Slug helpers shared by communities and spaces.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and single hyphens.

/// Return `true` when `value` is a valid slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Derive a slug from a display name.
///
/// Runs of characters outside `[a-z0-9]` collapse into one hyphen. Returns
/// `None` when nothing slug-worthy remains.
///
/// # Examples
/// ```
/// use commons::domain::slugify;
///
/// assert_eq!(slugify("Rust Builders' Guild").as_deref(), Some("rust-builders-guild"));
/// assert_eq!(slugify("!!!"), None);
/// ```
pub fn slugify(name: &str) -> Option<String> {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch != '\'' {
            pending_hyphen = true;
        }
    }
    (!slug.is_empty()).then_some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Design Club", "design-club")]
    #[case("  Leading and trailing  ", "leading-and-trailing")]
    #[case("C++ & Rust", "c-rust")]
    #[case("Café Society", "caf-society")]
    fn slugify_collapses_separators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("design-club", true)]
    #[case("design--club", false)]
    #[case("-design", false)]
    #[case("Design", false)]
    #[case("", false)]
    fn validates_slugs(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(input), expected);
    }

    #[rstest]
    fn derived_slugs_are_valid() {
        let slug = slugify("Weekly Q&A -- Live!").expect("slug");
        assert!(is_valid_slug(&slug));
    }
}
