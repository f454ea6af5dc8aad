/// One page of a result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number, clamped into range
    pub number: usize,
    pub total_pages: usize,
    /// Offset of `items[0]` within the full list
    pub offset: usize,
}

impl<T> Page<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// "current/total", as shown in the panel footer
    pub fn label(&self) -> String {
        format!("{}/{}", self.number, self.total_pages)
    }
}

/// Number of pages needed for `len` items (always at least 1)
pub fn total_pages(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// Slice out page `page` (1-based). Out-of-range pages are clamped.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = total_pages(items.len(), per_page);
    let number = page.clamp(1, total_pages);
    let offset = (number - 1) * per_page;
    let end = (offset + per_page).min(items.len());

    Page { items: &items[offset.min(end)..end], number, total_pages, offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_basic() {
        let items: Vec<u32> = (0..25).collect();

        let page = paginate(&items, 1, 10);
        assert_eq!(page.items, &items[0..10]);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_prev());
        assert!(page.has_next());
        assert_eq!(page.label(), "1/3");

        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, &items[20..25]);
        assert_eq!(page.offset, 20);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_clamps_page() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(paginate(&items, 0, 10).number, 1);
        assert_eq!(paginate(&items, 99, 2).number, 3);
        assert_eq!(paginate(&items, 99, 2).items, &[4]);
    }

    #[test]
    fn test_paginate_empty() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.label(), "1/1");
    }

    #[test]
    fn test_zero_per_page_treated_as_one() {
        let items = [1, 2, 3];
        assert_eq!(total_pages(items.len(), 0), 3);
        assert_eq!(paginate(&items, 2, 0).items, &[2]);
    }
}
