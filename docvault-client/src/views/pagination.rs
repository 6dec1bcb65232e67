//! Row windows for dashboard tables

/// Rows shown while a table is collapsed
pub const COLLAPSED_ROWS: usize = 5;

/// First [`COLLAPSED_ROWS`] rows, or everything once "show more" is on.
pub fn visible<T>(rows: &[T], show_more: bool) -> &[T] {
    if show_more {
        rows
    } else {
        &rows[..rows.len().min(COLLAPSED_ROWS)]
    }
}

/// 1-based page of `per_page` rows; out-of-range pages are empty.
pub fn page<T>(rows: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(rows.len());
    &rows[start..end]
}

pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total.div_ceil(per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_view_shows_first_five() {
        let rows: Vec<u32> = (1..=8).collect();
        assert_eq!(visible(&rows, false), [1, 2, 3, 4, 5]);
        assert_eq!(visible(&rows, true).len(), 8);
        assert_eq!(visible(&rows[..3], false), [1, 2, 3]);
    }

    #[test]
    fn pages_split_rows() {
        let rows: Vec<u32> = (1..=7).collect();
        assert_eq!(page(&rows, 1, 3), [1, 2, 3]);
        assert_eq!(page(&rows, 3, 3), [7]);
        assert!(page(&rows, 4, 3).is_empty());
        assert!(page(&rows, 0, 3).is_empty());
        assert_eq!(page_count(rows.len(), 3), 3);
        assert_eq!(page_count(0, 3), 0);
    }
}
