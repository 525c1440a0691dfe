//! L4 Atomic Layer: Pure page/index arithmetic
//!
//! Maps between slide indices and pages for both navigation granularities.
//! Every function tolerates `total == 0` and treats a page size of zero as one.

use std::ops::Range;

use crate::config::Granularity;

use super::ports::Dot;

/// Number of pages for `total` slides
#[inline]
pub fn page_count(total: usize, page_size: usize, granularity: Granularity) -> usize {
    match granularity {
        Granularity::Page => total.div_ceil(page_size.max(1)),
        Granularity::Slide => total,
    }
}

/// Largest base index that still shows a full page
#[inline]
pub fn max_base_index(total: usize, page_size: usize) -> usize {
    total.saturating_sub(page_size.max(1))
}

/// Base slide index shown for `page` (page is clamped first)
///
/// Page granularity clamps the last page back so it stays full, which makes
/// it overlap the previous page when `total` is not a multiple of the page
/// size (7 slides, size 3: pages start at 0, 3, 4).
pub fn base_index_for_page(
    page: usize,
    total: usize,
    page_size: usize,
    granularity: Granularity,
) -> usize {
    let pages = page_count(total, page_size, granularity);
    if pages == 0 {
        return 0;
    }
    let page = page.min(pages - 1);
    match granularity {
        Granularity::Page => (page * page_size.max(1)).min(max_base_index(total, page_size)),
        Granularity::Slide => page,
    }
}

/// Page that `index` belongs to
///
/// Rounds up so a clamped last-page index maps back to the last page.
pub fn page_of_index(
    index: usize,
    total: usize,
    page_size: usize,
    granularity: Granularity,
) -> usize {
    let pages = page_count(total, page_size, granularity);
    if pages == 0 {
        return 0;
    }
    let page = match granularity {
        Granularity::Page => index.div_ceil(page_size.max(1)),
        Granularity::Slide => index,
    };
    page.min(pages - 1)
}

/// Track translation (percent of the track) for a base index
#[inline]
pub fn offset_percent(index: usize, page_size: usize) -> f64 {
    -(index as f64) * (100.0 / page_size.max(1) as f64)
}

/// Positions within the active sequence that are on screen
#[inline]
pub fn visible_range(index: usize, total: usize, page_size: usize) -> Range<usize> {
    let start = index.min(total);
    let end = (index + page_size.max(1)).min(total);
    start..end
}

/// Pagination dots, one per page, capped at `max_dots`
pub fn build_dots(pages: usize, label_template: &str, max_dots: Option<usize>) -> Vec<Dot> {
    let count = max_dots.map_or(pages, |max| pages.min(max));
    (0..count)
        .map(|page| Dot {
            page,
            label: label_template.replace("{n}", &(page + 1).to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(7, 3, Granularity::Page), 3);
        assert_eq!(page_count(6, 3, Granularity::Page), 2);
        assert_eq!(page_count(2, 3, Granularity::Page), 1);
        assert_eq!(page_count(0, 3, Granularity::Page), 0);
        assert_eq!(page_count(5, 3, Granularity::Slide), 5);
    }

    #[test]
    fn test_last_page_clamps_to_full_page() {
        assert_eq!(base_index_for_page(0, 7, 3, Granularity::Page), 0);
        assert_eq!(base_index_for_page(1, 7, 3, Granularity::Page), 3);
        assert_eq!(base_index_for_page(2, 7, 3, Granularity::Page), 4);
        // Out of range pages clamp to the last page
        assert_eq!(base_index_for_page(9, 7, 3, Granularity::Page), 4);
    }

    #[test]
    fn test_page_of_index_inverts_base_index() {
        for total in 1..12 {
            for size in 1..5 {
                let pages = page_count(total, size, Granularity::Page);
                for page in 0..pages {
                    let index = base_index_for_page(page, total, size, Granularity::Page);
                    assert_eq!(
                        page_of_index(index, total, size, Granularity::Page),
                        page,
                        "total={} size={} page={}",
                        total,
                        size,
                        page
                    );
                }
            }
        }
    }

    #[test]
    fn test_page_size_larger_than_total() {
        assert_eq!(page_count(2, 3, Granularity::Page), 1);
        assert_eq!(base_index_for_page(0, 2, 3, Granularity::Page), 0);
        assert_eq!(visible_range(0, 2, 3), 0..2);
    }

    #[test]
    fn test_offset_percent() {
        assert_eq!(offset_percent(0, 3), 0.0);
        assert!((offset_percent(3, 3) + 100.0).abs() < 1e-9);
        assert!((offset_percent(4, 2) + 200.0).abs() < 1e-9);
        assert!((offset_percent(2, 1) + 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_dots() {
        let dots = build_dots(3, "Go to slide {n}", None);
        assert_eq!(dots.len(), 3);
        assert_eq!(dots[2].page, 2);
        assert_eq!(dots[2].label, "Go to slide 3");

        let capped = build_dots(5, "Go to testimonial {n}", Some(3));
        assert_eq!(capped.len(), 3);
        assert_eq!(capped[0].label, "Go to testimonial 1");
    }
}
