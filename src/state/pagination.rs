/// The bounded strip of page numbers shown under the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// At most five consecutive page numbers around the current page.
    pub pages: Vec<u32>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

const MAX_VISIBLE_PAGES: u32 = 5;

/// Compute the visible window for (current, total). Returns None when
/// there are no pages at all, which suppresses the control entirely.
pub fn page_window(current: u32, total_pages: u32) -> Option<PageWindow> {
    if total_pages == 0 {
        return None;
    }

    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end == total_pages {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }

    Some(PageWindow {
        pages: (start..=end).collect(),
        prev_enabled: current > 1,
        next_enabled: current < total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_near_the_end_shifts_back() {
        let window = page_window(9, 10).unwrap();
        assert_eq!(window.pages, vec![6, 7, 8, 9, 10]);
        assert!(window.prev_enabled);
        assert!(window.next_enabled);
    }

    #[test]
    fn short_range_shows_everything() {
        let window = page_window(2, 3).unwrap();
        assert_eq!(window.pages, vec![1, 2, 3]);
    }

    #[test]
    fn no_pages_means_no_window() {
        assert_eq!(page_window(1, 0), None);
    }

    #[test]
    fn boundaries_disable_prev_and_next() {
        let first = page_window(1, 10).unwrap();
        assert!(!first.prev_enabled);
        assert!(first.next_enabled);
        assert_eq!(first.pages, vec![1, 2, 3, 4, 5]);

        let last = page_window(10, 10).unwrap();
        assert!(last.prev_enabled);
        assert!(!last.next_enabled);
        assert_eq!(last.pages, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn single_page_disables_both() {
        let window = page_window(1, 1).unwrap();
        assert_eq!(window.pages, vec![1]);
        assert!(!window.prev_enabled);
        assert!(!window.next_enabled);
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        let window = page_window(99, 4).unwrap();
        assert_eq!(window.pages, vec![1, 2, 3, 4]);
        assert!(!window.next_enabled);
    }
}
