/// Results requested per remote page.
pub const PAGE_SIZE: usize = 10;
/// Highest page the remote API serves.
pub const MAX_PAGE: u32 = 50;
pub const MIN_PAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

impl PageDirection {
    pub fn delta(&self) -> i64 {
        match self {
            PageDirection::Prev => -1,
            PageDirection::Next => 1,
        }
    }
}

pub fn clamp_page(page: i64) -> u32 {
    page.clamp(MIN_PAGE as i64, MAX_PAGE as i64) as u32
}

pub fn next_page(current: u32, direction: PageDirection) -> u32 {
    clamp_page(current as i64 + direction.delta())
}

pub fn has_prev_page(current: u32) -> bool {
    current > MIN_PAGE
}

/// Estimate only: the API reports no totals, so a short page is taken to
/// mean the end of the results. A full last page still reports `true`.
pub fn has_next_page(current: u32, result_count: usize, page_size: usize) -> bool {
    current < MAX_PAGE && result_count >= page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_bounds() {
        assert_eq!(next_page(1, PageDirection::Prev), 1);
        assert_eq!(next_page(50, PageDirection::Next), 50);
        assert_eq!(next_page(1, PageDirection::Next), 2);
        assert_eq!(next_page(50, PageDirection::Prev), 49);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(-3), 1);
        assert_eq!(clamp_page(0), 1);
        assert_eq!(clamp_page(17), 17);
        assert_eq!(clamp_page(51), 50);
    }

    #[test]
    fn test_has_next_page_heuristic() {
        assert!(has_next_page(1, 10, PAGE_SIZE));
        assert!(!has_next_page(1, 9, PAGE_SIZE));
        assert!(!has_next_page(1, 0, PAGE_SIZE));
        assert!(!has_next_page(50, 10, PAGE_SIZE));
    }

    #[test]
    fn test_has_prev_page() {
        assert!(!has_prev_page(1));
        assert!(has_prev_page(2));
    }
}
