//! Listing pagination
//!
//! Two policies resolve a requested page token against the page count:
//!
//! | token            | `Strict` (index listing) | `Lenient` (context data) |
//! |------------------|--------------------------|--------------------------|
//! | absent           | 1                        | 1                        |
//! | `last`           | last page                | 1                        |
//! | `1..=num_pages`  | that page                | that page                |
//! | other number     | 404                      | last page                |
//! | not a number     | 404                      | 1                        |

use crate::errors::{AppError, NotFound, Result};
use serde::Serialize;
use std::num::IntErrorKind;

/// The `page` query parameter as requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageToken {
    Absent,
    Last,
    Number(i64),
    Malformed(String),
}

impl PageToken {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return PageToken::Absent;
        };

        let trimmed = raw.trim();
        if trimmed == "last" {
            return PageToken::Last;
        }

        match trimmed.parse::<i64>() {
            Ok(n) => PageToken::Number(n),
            // Still a number, just far outside any page range
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => PageToken::Number(i64::MAX),
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => PageToken::Number(i64::MIN),
            Err(_) => PageToken::Malformed(raw.to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            PageToken::Absent => String::new(),
            PageToken::Last => "last".to_string(),
            PageToken::Number(n) => n.to_string(),
            PageToken::Malformed(raw) => raw.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationPolicy {
    /// Invalid or out-of-range pages are a 404
    Strict,
    /// Non-numeric tokens (`last` included) fall back to page 1, out-of-range
    /// numbers to the last page
    Lenient,
}

impl PaginationPolicy {
    /// Resolve a token to a 1-based page number
    pub fn resolve(&self, token: &PageToken, num_pages: u64) -> Result<u64> {
        let in_range = |n: i64| n >= 1 && (n as u64) <= num_pages;

        match (self, token) {
            (_, PageToken::Absent) => Ok(1),
            (PaginationPolicy::Strict, PageToken::Last) => Ok(num_pages),
            (PaginationPolicy::Lenient, PageToken::Last) => Ok(1),
            (_, PageToken::Number(n)) if in_range(*n) => Ok(*n as u64),
            (PaginationPolicy::Lenient, PageToken::Number(_)) => Ok(num_pages),
            (PaginationPolicy::Lenient, PageToken::Malformed(_)) => Ok(1),
            (PaginationPolicy::Strict, token) => Err(AppError::NotFound(NotFound::PageOutOfRange {
                page: token.describe(),
            })),
        }
    }
}

/// Page arithmetic over a known item count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: u64,
    total: u64,
}

impl Paginator {
    pub fn new(per_page: u64, total: u64) -> Self {
        Self {
            per_page: per_page.max(1),
            total,
        }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// An empty listing still has one (empty) page
    pub fn num_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// Zero-based offset of the first item on `number`
    pub fn offset(&self, number: u64) -> u64 {
        number.saturating_sub(1) * self.per_page
    }

    pub fn resolve(&self, policy: PaginationPolicy, token: &PageToken) -> Result<u64> {
        policy.resolve(token, self.num_pages())
    }

    pub fn page<T>(&self, number: u64, items: Vec<T>) -> Page<T> {
        Page {
            number,
            num_pages: self.num_pages(),
            items,
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub number: u64,
    pub num_pages: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then_some(self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn is_paginated(&self) -> bool {
        self.num_pages > 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(PageToken::parse(None), PageToken::Absent);
        assert_eq!(PageToken::parse(Some("2")), PageToken::Number(2));
        assert_eq!(PageToken::parse(Some(" 3 ")), PageToken::Number(3));
        assert_eq!(PageToken::parse(Some("-1")), PageToken::Number(-1));
        assert_eq!(PageToken::parse(Some("last")), PageToken::Last);
        assert_eq!(
            PageToken::parse(Some("obviouslynotanumber")),
            PageToken::Malformed("obviouslynotanumber".to_string())
        );
        assert_eq!(
            PageToken::parse(Some("99999999999999999999999")),
            PageToken::Number(i64::MAX)
        );
    }

    #[test]
    fn test_num_pages() {
        assert_eq!(Paginator::new(2, 0).num_pages(), 1);
        assert_eq!(Paginator::new(2, 1).num_pages(), 1);
        assert_eq!(Paginator::new(2, 6).num_pages(), 3);
        assert_eq!(Paginator::new(2, 7).num_pages(), 4);
        assert_eq!(Paginator::new(2, 7).offset(3), 4);
    }

    #[test]
    fn test_strict_policy() {
        let strict = PaginationPolicy::Strict;
        assert_eq!(strict.resolve(&PageToken::Absent, 3).unwrap(), 1);
        assert_eq!(strict.resolve(&PageToken::Number(2), 3).unwrap(), 2);
        assert_eq!(strict.resolve(&PageToken::Last, 3).unwrap(), 3);

        for token in [
            PageToken::Number(999),
            PageToken::Number(0),
            PageToken::Number(-1),
            PageToken::Malformed("obviouslynotanumber".into()),
        ] {
            let err = strict.resolve(&token, 3).unwrap_err();
            assert!(matches!(err, AppError::NotFound(NotFound::PageOutOfRange { .. })));
        }
    }

    #[test]
    fn test_lenient_policy() {
        let lenient = PaginationPolicy::Lenient;
        assert_eq!(lenient.resolve(&PageToken::Absent, 3).unwrap(), 1);
        assert_eq!(lenient.resolve(&PageToken::Number(2), 3).unwrap(), 2);
        assert_eq!(lenient.resolve(&PageToken::Number(999), 3).unwrap(), 3);
        assert_eq!(lenient.resolve(&PageToken::Number(0), 3).unwrap(), 3);
        assert_eq!(
            lenient.resolve(&PageToken::Malformed("x".into()), 3).unwrap(),
            1
        );
        assert_eq!(lenient.resolve(&PageToken::Last, 3).unwrap(), 1);
    }

    #[test]
    fn test_empty_listing_has_page_one() {
        let paginator = Paginator::new(2, 0);
        assert_eq!(paginator.resolve(PaginationPolicy::Strict, &PageToken::Number(1)).unwrap(), 1);
        assert!(paginator.resolve(PaginationPolicy::Strict, &PageToken::Number(2)).is_err());
    }

    #[test]
    fn test_page_navigation() {
        let paginator = Paginator::new(2, 6);
        let page = paginator.page(2, vec!["c", "d"]);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.next_page_number(), Some(3));
        assert_eq!(page.previous_page_number(), Some(1));
        assert!(page.is_paginated());
        assert_eq!(page.len(), 2);

        let last = paginator.page(3, vec!["e", "f"]);
        assert!(!last.has_next());
        assert_eq!(last.next_page_number(), None);

        let single = Paginator::new(2, 1).page(1, vec!["a"]);
        assert!(!single.is_paginated());
        assert_eq!(single.previous_page_number(), None);
    }

    #[test]
    fn test_page_serializes_for_context() {
        let page = Paginator::new(2, 3).page(2, vec!["c"]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["number"], 2);
        assert_eq!(json["num_pages"], 2);
        assert_eq!(json["items"][0], "c");
    }
}
