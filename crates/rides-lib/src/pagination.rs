//! In-memory pagination over an already-fetched result set.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u64 = 10;

/// A 1-based page number and page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a page request, rejecting a zero page or limit.
    pub fn new(page: u64, limit: u64) -> Result<Self> {
        if page == 0 || limit == 0 {
            return Err(Error::InvalidPagination);
        }
        Ok(Self { page, limit })
    }

    /// Interpret raw query-string values.
    ///
    /// Absent or blank values fall back to the defaults. Anything that is not
    /// a positive integer (including `0`, negatives and decimals) is rejected.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self> {
        let page = parse_positive(page, DEFAULT_PAGE)?;
        let limit = parse_positive(limit, DEFAULT_LIMIT)?;
        Self::new(page, limit)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>, default: u64) -> Result<u64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<u64>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or(Error::InvalidPagination),
    }
}

/// Pointer to an adjacent, non-empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub page: u64,
    pub limit: u64,
}

/// One page of results with links to its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageDescriptor>,
}

/// Slice `items` into the page described by `request`.
///
/// A page past the end yields empty `results`; it is not an error.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let start = request.offset();
    let end = request.page.saturating_mul(request.limit);

    let results = if start >= total {
        Vec::new()
    } else {
        items[start as usize..end.min(total) as usize].to_vec()
    };

    let next = (end < total).then(|| PageDescriptor {
        page: request.page + 1,
        limit: request.limit,
    });
    let previous = (start > 0).then(|| PageDescriptor {
        page: request.page - 1,
        limit: request.limit,
    });

    Page {
        results,
        next,
        previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u64, limit: u64) -> PageRequest {
        PageRequest::new(page, limit).unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = PageRequest::parse(None, None).unwrap();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let req = PageRequest::parse(Some(""), Some("  ")).unwrap();
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn test_parse_explicit_values() {
        let req = PageRequest::parse(Some("3"), Some("25")).unwrap();
        assert_eq!((req.page(), req.limit()), (3, 25));
    }

    #[test]
    fn test_rejects_zero_negative_and_garbage() {
        for (p, l) in [
            (Some("0"), None),
            (None, Some("0")),
            (Some("-1"), None),
            (None, Some("-5")),
            (Some("abc"), None),
            (None, Some("1.5")),
        ] {
            assert!(
                matches!(PageRequest::parse(p, l), Err(Error::InvalidPagination)),
                "page={p:?} limit={l:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_first_page_has_next_only() {
        let items = vec![1, 2];
        let result = paginate(&items, page(1, 1));
        assert_eq!(result.results, vec![1]);
        assert_eq!(result.next, Some(PageDescriptor { page: 2, limit: 1 }));
        assert_eq!(result.previous, None);
    }

    #[test]
    fn test_last_page_has_previous_only() {
        let items = vec![1, 2];
        let result = paginate(&items, page(2, 1));
        assert_eq!(result.results, vec![2]);
        assert_eq!(result.next, None);
        assert_eq!(result.previous, Some(PageDescriptor { page: 1, limit: 1 }));
    }

    #[test]
    fn test_partial_last_page() {
        let items: Vec<u32> = (1..=25).collect();
        let result = paginate(&items, page(3, 10));
        assert_eq!(result.results, (21..=25).collect::<Vec<_>>());
        assert!(result.next.is_none());
        assert_eq!(result.previous, Some(PageDescriptor { page: 2, limit: 10 }));
    }

    #[test]
    fn test_exact_fit_has_no_next() {
        let items: Vec<u32> = (1..=10).collect();
        let result = paginate(&items, PageRequest::default());
        assert_eq!(result.results.len(), 10);
        assert!(result.next.is_none());
        assert!(result.previous.is_none());
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items = vec![1, 2, 3];
        let result = paginate(&items, page(5, 2));
        assert!(result.results.is_empty());
        assert!(result.next.is_none());
        assert_eq!(result.previous, Some(PageDescriptor { page: 4, limit: 2 }));
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let items = vec![1, 2, 3];
        let result = paginate(&items, page(u64::MAX, u64::MAX));
        assert!(result.results.is_empty());
        assert!(result.next.is_none());
    }

    #[test]
    fn test_same_request_is_idempotent() {
        let items: Vec<u32> = (1..=7).collect();
        let first = paginate(&items, page(2, 3));
        let second = paginate(&items, page(2, 3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_page_serialization_omits_absent_descriptors() {
        let result = paginate(&[1], PageRequest::default());
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"results":[1]}"#);
    }
}
