//! Page slicing for result lists

/// One page of a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// Total number of pages, at least 1
    pub total_pages: usize,
    /// Total number of items across all pages
    pub total_count: usize,
    /// Page actually shown, after clamping (1-based)
    pub page: usize,
    /// Page size used for slicing
    pub page_size: usize,
}

impl<T> Page<'_, T> {
    /// 1-based position of the first item on this page within the full list
    #[inline]
    #[must_use]
    pub fn first_ordinal(&self) -> usize {
        (self.page - 1) * self.page_size + 1
    }

    /// Check if the requested page differed from the one shown
    #[inline]
    #[must_use]
    pub fn was_clamped(&self, requested: usize) -> bool {
        requested != self.page
    }
}

/// Slice `items` into the requested 1-based `page`
///
/// `total_pages` is `ceil(len / page_size)` and never less than 1, so an
/// empty list has one empty page. `page` is clamped into
/// `[1, total_pages]`; a zero `page_size` is treated as 1.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(total_count);
    let end = (start + page_size).min(total_count);

    Page {
        items: &items[start..end],
        total_pages,
        total_count,
        page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn empty_list_has_one_page() {
        let page = paginate::<u8>(&[], 1, 10);
        assert!(page.items.is_empty());
        assert_eq!((page.total_pages, page.total_count, page.page), (1, 0, 1));
    }

    #[test]
    fn last_partial_page() {
        let items = numbers(23);
        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, &[21, 22, 23]);
        assert_eq!((page.total_pages, page.total_count, page.page), (3, 23, 3));
        assert_eq!(page.first_ordinal(), 21);
    }

    #[test]
    fn page_past_end_is_clamped() {
        let items = numbers(23);
        let page = paginate(&items, 99, 10);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 3);
        assert!(page.was_clamped(99));
    }

    #[test]
    fn page_zero_is_clamped_to_first() {
        let items = numbers(23);
        let page = paginate(&items, 0, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, &numbers(10)[..]);
    }

    #[test]
    fn exact_multiple() {
        let items = numbers(20);
        let page = paginate(&items, 2, 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 10);
        assert!(!page.was_clamped(2));
    }

    #[test]
    fn zero_page_size_treated_as_one() {
        let items = numbers(3);
        let page = paginate(&items, 2, 0);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, &[2]);
    }
}
