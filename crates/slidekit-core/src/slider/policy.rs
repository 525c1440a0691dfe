//! L4 Atomic Layer: Wrap policy for next/prev stepping
//!
//! Both granularities step in page space. With slide granularity a page is a
//! single slide, so this reduces to modulo arithmetic over slides; with page
//! granularity the wrap only happens when crossing the first/last page.

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Target page for one step from `page`
///
/// Returns `None` when there is nowhere to go: no pages, or an end was hit
/// with looping disabled.
pub fn step_page(page: usize, pages: usize, direction: Direction, looping: bool) -> Option<usize> {
    if pages == 0 {
        return None;
    }
    let page = page.min(pages - 1);
    match direction {
        Direction::Forward if page + 1 < pages => Some(page + 1),
        Direction::Forward => looping.then_some(0),
        Direction::Backward if page > 0 => Some(page - 1),
        Direction::Backward => looping.then_some(pages - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_within_range() {
        assert_eq!(step_page(0, 3, Direction::Forward, true), Some(1));
        assert_eq!(step_page(2, 3, Direction::Backward, false), Some(1));
    }

    #[test]
    fn test_wrap_at_ends() {
        assert_eq!(step_page(2, 3, Direction::Forward, true), Some(0));
        assert_eq!(step_page(0, 3, Direction::Backward, true), Some(2));
    }

    #[test]
    fn test_clamp_at_ends_without_loop() {
        assert_eq!(step_page(2, 3, Direction::Forward, false), None);
        assert_eq!(step_page(0, 3, Direction::Backward, false), None);
    }

    #[test]
    fn test_single_page_wraps_to_itself() {
        assert_eq!(step_page(0, 1, Direction::Forward, true), Some(0));
        assert_eq!(step_page(0, 1, Direction::Backward, true), Some(0));
        assert_eq!(step_page(0, 0, Direction::Forward, true), None);
    }
}
