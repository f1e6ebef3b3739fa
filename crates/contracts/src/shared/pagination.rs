//! Page-number window for pagination controls.

/// Default number of neighbours shown on each side of the current page.
pub const DEFAULT_WINDOW_RADIUS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Everything the pagination control needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationModel {
    pub current: usize,
    pub total_pages: usize,
    pub links: Vec<PageLink>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationModel {
    pub fn prev_page(&self) -> Option<usize> {
        self.prev_enabled.then(|| self.current - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        self.next_enabled.then(|| self.current + 1)
    }
}

/// Page links for `current` (1-based) out of `total` pages.
///
/// Shows `current ± radius`, always keeps the first and last page, and puts an
/// ellipsis where the distance between a boundary page and the window is 2 or more.
/// Returns nothing for `total <= 1`.
pub fn page_links(current: usize, total: usize, radius: usize) -> Vec<PageLink> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let start = current.saturating_sub(radius).max(1);
    let end = (current + radius).min(total);

    let page = |number: usize| PageLink::Page {
        number,
        current: number == current,
    };

    let mut links = Vec::with_capacity(end - start + 5);
    if start > 1 {
        links.push(page(1));
        if start - 1 >= 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links.extend((start..=end).map(page));
    if end < total {
        if total - end >= 2 {
            links.push(PageLink::Ellipsis);
        }
        links.push(page(total));
    }
    links
}

/// `None` when there is at most one page: no control is rendered at all.
pub fn pagination_model(current: usize, total_pages: usize, radius: usize) -> Option<PaginationModel> {
    if total_pages <= 1 {
        return None;
    }
    let current = current.clamp(1, total_pages);
    Some(PaginationModel {
        current,
        total_pages,
        links: page_links(current, total_pages, radius),
        prev_enabled: current > 1,
        next_enabled: current < total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(links: &[PageLink]) -> String {
        links
            .iter()
            .map(|l| match l {
                PageLink::Page { number, current: true } => format!("[{}]", number),
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Ellipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn middle_page_has_both_ellipses() {
        assert_eq!(render(&page_links(5, 10, 2)), "1 … 3 4 [5] 6 7 … 10");
    }

    #[test]
    fn edges_collapse_into_window() {
        assert_eq!(render(&page_links(1, 10, 2)), "[1] 2 3 … 10");
        assert_eq!(render(&page_links(10, 10, 2)), "1 … 8 9 [10]");
    }

    #[test]
    fn adjacent_boundary_gets_no_ellipsis() {
        assert_eq!(render(&page_links(4, 10, 2)), "1 2 3 [4] 5 6 … 10");
        assert_eq!(render(&page_links(2, 3, 2)), "1 [2] 3");
    }

    #[test]
    fn single_page_renders_nothing() {
        assert!(page_links(1, 1, 2).is_empty());
        assert!(page_links(1, 0, 2).is_empty());
        assert!(pagination_model(1, 1, 2).is_none());
        assert!(pagination_model(1, 0, 2).is_none());
    }

    #[test]
    fn prev_and_next_disabled_at_bounds() {
        let first = pagination_model(1, 3, 2).unwrap();
        assert!(!first.prev_enabled);
        assert!(first.next_enabled);
        assert_eq!(first.prev_page(), None);
        assert_eq!(first.next_page(), Some(2));

        let last = pagination_model(3, 3, 2).unwrap();
        assert!(last.prev_enabled);
        assert!(!last.next_enabled);
        assert_eq!(last.prev_page(), Some(2));
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        let model = pagination_model(9, 3, 2).unwrap();
        assert_eq!(model.current, 3);
        assert_eq!(render(&model.links), "1 2 [3]");
    }
}
