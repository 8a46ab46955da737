//! Limit policy calculation
//!
//! Derives the page size to request from the transport and the maximum
//! number of pages to fetch, given a caller's requested total-record limit
//! and/or page size. Pure arithmetic, no I/O.

use crate::error::{Error, Result};

/// Page size used when the caller specifies neither a limit nor a page size
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Hard ceiling on the per-request page size
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Resolved read plan for one streaming session
///
/// `page_limit` of `None` means the page count is unbounded and iteration
/// runs until the upstream reports no further page. `Some(0)` means the
/// session must terminate before fetching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Number of records to request per page
    pub page_size: u32,
    /// Maximum number of pages to fetch, if bounded
    pub page_limit: Option<u32>,
    /// The caller's requested total-record limit, if any
    pub limit: Option<usize>,
}

/// Compute the read plan for a requested limit and/or page size
///
/// When a non-zero limit is given and no page size is, the whole limit is
/// read with the fewest requests possible: `page_size = min(limit, 1000)`.
/// An explicit page size is clamped to the ceiling and, when a non-zero
/// limit is present, to the limit itself. The page cap is the smallest page
/// count that covers the limit at the resolved page size.
pub fn compute(limit: Option<usize>, page_size: Option<u32>) -> Result<ReadLimits> {
    if page_size == Some(0) {
        return Err(Error::invalid_argument(
            "page_size",
            "must be a positive integer",
        ));
    }

    let resolved_size = match (page_size, limit) {
        (Some(size), Some(requested)) if requested > 0 => {
            let cap = u32::try_from(requested).unwrap_or(MAX_PAGE_SIZE);
            size.min(MAX_PAGE_SIZE).min(cap)
        }
        (Some(size), _) => size.min(MAX_PAGE_SIZE),
        (None, Some(requested)) if requested > 0 => {
            u32::try_from(requested).unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE)
        }
        (None, _) => DEFAULT_PAGE_SIZE,
    };

    let page_limit = limit.map(|requested| {
        let pages = requested.div_ceil(resolved_size as usize);
        u32::try_from(pages).unwrap_or(u32::MAX)
    });

    Ok(ReadLimits {
        page_size: resolved_size,
        page_limit,
        limit,
    })
}

impl ReadLimits {
    /// Check whether the session is allowed to fetch another page after
    /// having fetched `pages_fetched` pages already
    pub fn allows_page(&self, pages_fetched: u32) -> bool {
        match self.page_limit {
            Some(max_pages) => pages_fetched < max_pages,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(None, None, DEFAULT_PAGE_SIZE, None; "all defaults")]
    #[test_case(None, Some(25), 25, None; "explicit page size only")]
    #[test_case(None, Some(5000), MAX_PAGE_SIZE, None; "page size clamped to ceiling")]
    #[test_case(Some(30), None, 30, Some(1); "limit smaller than ceiling sets page size")]
    #[test_case(Some(2500), None, MAX_PAGE_SIZE, Some(3); "large limit reads at ceiling")]
    #[test_case(Some(25), Some(10), 10, Some(3); "explicit page size under limit")]
    #[test_case(Some(30), Some(100), 30, Some(1); "page size clamped to limit")]
    #[test_case(Some(100), Some(100), 100, Some(1); "limit equals page size")]
    #[test_case(Some(101), Some(100), 100, Some(2); "one record spills a second page")]
    #[test_case(Some(0), None, DEFAULT_PAGE_SIZE, Some(0); "zero limit short circuits")]
    #[test_case(Some(0), Some(25), 25, Some(0); "zero limit keeps explicit page size")]
    fn test_compute(
        limit: Option<usize>,
        page_size: Option<u32>,
        expected_size: u32,
        expected_pages: Option<u32>,
    ) {
        let limits = compute(limit, page_size).unwrap();
        assert_eq!(limits.page_size, expected_size);
        assert_eq!(limits.page_limit, expected_pages);
        assert_eq!(limits.limit, limit);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = compute(None, Some(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));

        let err = compute(Some(10), Some(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_page_size_never_exceeds_bounds() {
        for limit in [1usize, 7, 49, 50, 51, 999, 1000, 1001, 100_000] {
            for page_size in [None, Some(1), Some(50), Some(999), Some(10_000)] {
                let limits = compute(Some(limit), page_size).unwrap();
                assert!(limits.page_size <= MAX_PAGE_SIZE);
                assert!(limits.page_size as usize <= limit.max(1));
                assert!(limits.page_size >= 1);
            }
        }
    }

    #[test]
    fn test_page_limit_covers_limit_exactly() {
        for limit in [1usize, 10, 25, 99, 100, 101, 5000] {
            for page_size in [Some(1), Some(7), Some(10), Some(100), None] {
                let limits = compute(Some(limit), page_size).unwrap();
                let pages = limits.page_limit.unwrap() as usize;
                let size = limits.page_size as usize;
                // Smallest page count whose capacity reaches the limit.
                assert!(pages * size >= limit);
                assert!((pages.saturating_sub(1)) * size < limit);
            }
        }
    }

    #[test]
    fn test_allows_page() {
        let bounded = compute(Some(25), Some(10)).unwrap();
        assert!(bounded.allows_page(0));
        assert!(bounded.allows_page(2));
        assert!(!bounded.allows_page(3));

        let unbounded = compute(None, None).unwrap();
        assert!(unbounded.allows_page(u32::MAX - 1));

        let empty = compute(Some(0), None).unwrap();
        assert!(!empty.allows_page(0));
    }
}
