//! Page-range expressions such as `"1-3,7,9-10"`.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Resolve a page-range expression against a document of `total` pages.
///
/// `None` or a blank expression selects every page. Tokens are separated by
/// commas and are either a single 1-based page number or an inclusive `a-b`
/// range. Pages outside `1..=total` are dropped, descending ranges select
/// nothing, and the result is sorted and free of duplicates.
///
/// # Errors
///
/// Returns [`Error::InvalidPageRange`] if a token is not a number or range.
pub fn parse_page_range(expr: Option<&str>, total: usize) -> Result<Vec<usize>> {
    let expr = match expr.map(str::trim) {
        None | Some("") => return Ok((1..=total).collect()),
        Some(e) => e,
    };

    let mut pages = BTreeSet::new();
    for token in expr.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (start, end) = match token.split_once('-') {
            Some((a, b)) => (parse_number(a, token)?, parse_number(b, token)?),
            None => {
                let n = parse_number(token, token)?;
                (n, n)
            }
        };

        let start = start.max(1);
        let end = end.min(total);
        pages.extend(start..=end);
    }

    Ok(pages.into_iter().collect())
}

fn parse_number(s: &str, token: &str) -> Result<usize> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidPageRange(format!("{token:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_missing_selects_all() {
        assert_eq!(parse_page_range(None, 5).unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(parse_page_range(Some(""), 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_page_range(Some("  "), 2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn single_pages_and_ranges() {
        assert_eq!(parse_page_range(Some("3"), 10).unwrap(), vec![3]);
        assert_eq!(parse_page_range(Some("2-5"), 10).unwrap(), vec![2, 3, 4, 5]);
        assert_eq!(
            parse_page_range(Some("1-3,7,9-10"), 10).unwrap(),
            vec![1, 2, 3, 7, 9, 10]
        );
        assert_eq!(parse_page_range(Some(" 2 - 3 , 5 "), 10).unwrap(), vec![2, 3, 5]);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        assert_eq!(parse_page_range(Some("1-100"), 5).unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(parse_page_range(Some("0,1,2"), 5).unwrap(), vec![1, 2]);
        assert!(parse_page_range(Some("8"), 5).unwrap().is_empty());
    }

    #[test]
    fn duplicates_removed_and_sorted() {
        assert_eq!(parse_page_range(Some("1,1,2,2"), 5).unwrap(), vec![1, 2]);
        assert_eq!(parse_page_range(Some("4,1-2,2"), 5).unwrap(), vec![1, 2, 4]);
    }

    #[test]
    fn descending_range_selects_nothing() {
        assert!(parse_page_range(Some("5-3"), 10).unwrap().is_empty());
    }

    #[test]
    fn empty_document_selects_nothing() {
        assert!(parse_page_range(None, 0).unwrap().is_empty());
        assert!(parse_page_range(Some("1-3"), 0).unwrap().is_empty());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(matches!(
            parse_page_range(Some("1,abc"), 5),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(matches!(
            parse_page_range(Some("x-2"), 5),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(matches!(
            parse_page_range(Some("-2"), 5),
            Err(Error::InvalidPageRange(_))
        ));
    }
}
