//! List helpers shared by every resource view: case-insensitive search over the
//! loaded page, status filtering, and page clamping.

/// Rows whose searchable text contains `query`, ignoring case. A blank query
/// keeps everything.
pub fn filter_rows<'a, T, F>(rows: &'a [T], query: &str, text: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<&str>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            text(row)
                .into_iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Whether `value` passes a status filter; an empty filter or `"all"` passes all.
pub fn matches_status(filter: &str, value: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || filter.eq_ignore_ascii_case("all") || filter.eq_ignore_ascii_case(value)
}

/// Number of pages for `total` items, never zero.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Clamp a 1-based page number into range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice of `rows` on 1-based `page`.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return rows;
    }
    let page = clamp_page(page, page_count(rows.len(), page_size));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(rows.len());
    &rows[start.min(rows.len())..end]
}

/// "Showing 11–20 of 42" style range for a server page.
pub fn showing_range(page: u32, limit: u32, total: u64, on_page: usize) -> (u64, u64) {
    if on_page == 0 {
        return (0, 0);
    }
    let start = u64::from(page.saturating_sub(1)) * u64::from(limit) + 1;
    let end = (start + on_page as u64 - 1).min(total.max(on_page as u64));
    (start, end)
}

/// Page numbers to render, with `None` for an ellipsis.
pub fn page_window(current: usize, total_pages: usize) -> Vec<Option<usize>> {
    let total_pages = total_pages.max(1);
    let current = clamp_page(current, total_pages);
    if total_pages <= 7 {
        return (1..=total_pages).map(Some).collect();
    }
    let mut pages = vec![Some(1)];
    let lo = current.saturating_sub(1).max(2);
    let hi = (current + 1).min(total_pages - 1);
    if lo > 2 {
        pages.push(None);
    }
    pages.extend((lo..=hi).map(Some));
    if hi < total_pages - 1 {
        pages.push(None);
    }
    pages.push(Some(total_pages));
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        email: &'static str,
    }

    const ROWS: [Row; 3] = [
        Row {
            name: "Ada Lovelace",
            email: "ada@campus.edu",
        },
        Row {
            name: "Alan Turing",
            email: "alan@campus.edu",
        },
        Row {
            name: "Grace Hopper",
            email: "grace@navy.mil",
        },
    ];

    #[test]
    fn test_filter_is_case_insensitive() {
        let hits = filter_rows(&ROWS, "TURING", |r| vec![r.name, r.email]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alan Turing");

        let hits = filter_rows(&ROWS, "campus", |r| vec![r.name, r.email]);
        assert_eq!(hits.len(), 2);

        assert_eq!(filter_rows(&ROWS, "   ", |r| vec![r.name]).len(), 3);
    }

    #[test]
    fn test_status_filter() {
        assert!(matches_status("", "active"));
        assert!(matches_status("all", "banned"));
        assert!(matches_status("Active", "active"));
        assert!(!matches_status("suspended", "active"));
    }

    #[test]
    fn test_pages_clamp() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(21, 10), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);

        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
        assert_eq!(paginate(&items, 99, 10), &[21, 22, 23, 24, 25]);
        assert_eq!(paginate(&items, 0, 10).len(), 10);
        assert!(paginate(&Vec::<u32>::new(), 1, 10).is_empty());
    }

    #[test]
    fn test_showing_range() {
        assert_eq!(showing_range(2, 10, 42, 10), (11, 20));
        assert_eq!(showing_range(5, 10, 42, 2), (41, 42));
        assert_eq!(showing_range(1, 10, 0, 0), (0, 0));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(2, 3), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            page_window(5, 10),
            vec![Some(1), None, Some(4), Some(5), Some(6), None, Some(10)]
        );
        assert_eq!(
            page_window(1, 10),
            vec![Some(1), Some(2), None, Some(10)]
        );
    }
}
