//! Offset pagination shared by list operations.

/// Page size applied when a caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Window over an ordered result set.
///
/// ## Invariants
/// - `limit` is within `1..=MAX_PAGE_LIMIT`.
///
/// # Examples
/// ```
/// use commons::domain::PageRequest;
///
/// let page = PageRequest::new(500, 40);
/// assert_eq!(page.limit(), 100);
/// assert_eq!(page.offset(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl PageRequest {
    /// Build a page, clamping `limit` into the supported range.
    #[must_use]
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
            offset,
        }
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items skipped before the page starts.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Apply the window to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_page_starts_at_zero() {
        let page = PageRequest::default();
        assert_eq!((page.limit(), page.offset()), (DEFAULT_PAGE_LIMIT, 0));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(100, 100)]
    #[case(101, 100)]
    fn limit_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(PageRequest::new(requested, 0).limit(), expected);
    }

    #[rstest]
    fn slice_skips_then_takes() {
        let page = PageRequest::new(2, 3);
        assert_eq!(page.slice(1..=10), vec![4, 5]);
    }

    #[rstest]
    fn slice_past_the_end_is_empty() {
        let page = PageRequest::new(5, 50);
        assert!(page.slice(1..=10).is_empty());
    }
}
