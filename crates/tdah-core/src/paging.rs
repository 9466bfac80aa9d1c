//! Directory listing parameters and page arithmetic.
//!
//! `DirectoryQuery::parse` turns raw query-string values into a validated
//! request. Everything the database layer receives from here is either a
//! number or a whitelisted `FilterField`.

use serde::{Deserialize, Serialize};

use crate::enums::FilterField;
use crate::errors::CoreError;

/// Page size used when the caller does not send one.
pub const DEFAULT_PAGE_SIZE: u32 = 16;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Case folding applied to stored `*_folded` columns and to filter needles.
///
/// Both sides must go through this one function; SQLite's `LOWER()` only
/// folds ASCII and would miss names like "Ángel".
#[must_use]
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Configurable bounds for page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PagingLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Case-insensitive substring filter on one whitelisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFilter {
    pub field: FilterField,
    /// Already passed through [`fold_case`].
    pub needle: String,
}

/// A validated scoped-listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    /// 1-indexed.
    pub page: u32,
    pub page_size: u32,
    pub filter: Option<StudentFilter>,
}

impl DirectoryQuery {
    /// Validate raw query-string values.
    ///
    /// Empty strings count as absent. `filter_by` is checked against the
    /// whitelist whenever it is present, even if `query` is empty; an empty
    /// `query` then means "no filter".
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an unknown filter field, a
    /// non-numeric or zero page, or a page size outside `1..=max_page_size`.
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        filter_by: Option<&str>,
        query: Option<&str>,
        limits: PagingLimits,
    ) -> Result<Self, CoreError> {
        let field = match non_empty(filter_by) {
            Some(raw) => Some(raw.parse::<FilterField>()?),
            None => None,
        };

        let page = match non_empty(page) {
            Some(raw) => parse_positive(raw, "page")?,
            None => 1,
        };

        let page_size = match non_empty(page_size) {
            Some(raw) => parse_positive(raw, "page_size")?,
            None => limits.default_page_size,
        };
        if page_size > limits.max_page_size {
            return Err(CoreError::validation(format!(
                "page_size must be at most {}",
                limits.max_page_size
            )));
        }

        let filter = match (field, non_empty(query)) {
            (Some(field), Some(q)) => Some(StudentFilter {
                field,
                needle: fold_case(q),
            }),
            _ => None,
        };

        Ok(Self {
            page,
            page_size,
            filter,
        })
    }

    /// Row offset of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

/// `ceil(count / page_size)`; zero when nothing matched.
#[must_use]
pub const fn total_pages(count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size as u64)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_positive(raw: &str, name: &str) -> Result<u32, CoreError> {
    match raw.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CoreError::validation(format!(
            "{name} must be a positive integer"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        filter_by: Option<&str>,
        query: Option<&str>,
    ) -> Result<DirectoryQuery, CoreError> {
        DirectoryQuery::parse(page, page_size, filter_by, query, PagingLimits::default())
    }

    #[test]
    fn defaults_when_nothing_given() {
        let q = parse(None, None, None, None).unwrap();
        assert_eq!(
            q,
            DirectoryQuery {
                page: 1,
                page_size: 16,
                filter: None
            }
        );
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn empty_strings_are_absent() {
        let q = parse(Some(""), Some(" "), Some(""), Some("")).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, 16);
        assert!(q.filter.is_none());
    }

    #[test]
    fn offset_is_page_minus_one_times_size() {
        let q = parse(Some("3"), Some("10"), None, None).unwrap();
        assert_eq!(q.offset(), 20);
    }

    #[test]
    fn filter_needle_is_lowercased() {
        let q = parse(None, None, Some("curso"), Some("5A")).unwrap();
        assert_eq!(
            q.filter,
            Some(StudentFilter {
                field: FilterField::Course,
                needle: "5a".into()
            })
        );
    }

    #[test]
    fn filter_needle_folds_accented_capitals() {
        let q = parse(None, None, Some("nombre"), Some("ÁNGEL")).unwrap();
        assert_eq!(q.filter.unwrap().needle, "ángel");
    }

    #[test]
    fn empty_query_means_no_filter() {
        let q = parse(None, None, Some("nombre"), Some("")).unwrap();
        assert!(q.filter.is_none());
    }

    #[test]
    fn bad_field_rejected_even_without_query() {
        assert!(matches!(
            parse(None, None, Some("email"), None),
            Err(CoreError::Validation(_))
        ));
    }

    #[rstest]
    #[case(Some("0"), None)]
    #[case(Some("-1"), None)]
    #[case(Some("abc"), None)]
    #[case(None, Some("0"))]
    #[case(None, Some("x"))]
    #[case(None, Some("101"))]
    fn invalid_paging_rejected(#[case] page: Option<&str>, #[case] page_size: Option<&str>) {
        assert!(matches!(
            parse(page, page_size, None, None),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn custom_limits_apply() {
        let limits = PagingLimits {
            default_page_size: 5,
            max_page_size: 8,
        };
        let q = DirectoryQuery::parse(None, None, None, None, limits).unwrap();
        assert_eq!(q.page_size, 5);
        assert!(DirectoryQuery::parse(None, Some("9"), None, None, limits).is_err());
    }

    #[rstest]
    #[case(0, 16, 0)]
    #[case(1, 16, 1)]
    #[case(16, 16, 1)]
    #[case(17, 16, 2)]
    #[case(100, 7, 15)]
    fn total_pages_is_ceiling(#[case] count: u64, #[case] size: u32, #[case] expected: u64) {
        assert_eq!(total_pages(count, size), expected);
    }
}
