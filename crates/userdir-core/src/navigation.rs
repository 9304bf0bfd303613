pub fn can_go_prev(page: usize) -> bool {
    page > 1
}

pub fn can_go_next(page: usize, total_pages: usize) -> bool {
    page < total_pages
}

/// Moves `page` by `delta`, clamped to `[1, max(total_pages, 1)]`.
pub fn step_page(page: usize, delta: i64, total_pages: usize) -> usize {
    let last = total_pages.max(1) as i64;
    let target = (page as i64).saturating_add(delta);
    target.clamp(1, last) as usize
}
