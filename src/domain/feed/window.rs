//! Page window arithmetic and total-count estimation.

/// Zero-based offset of the first row on `page_number` (pages start at 1)
pub fn page_offset(page_number: u32, page_size: u32) -> u64 {
    u64::from(page_number.max(1) - 1) * u64::from(page_size)
}

/// Total row count for the collection after fetching one page.
///
/// An exact count from the store wins. Otherwise a full page implies at
/// least one more row (`page_number * page_size + 1`), while a short page is
/// the end of the collection (`offset + returned`). The asymmetry is what
/// drives `has_more`.
pub fn estimate_total_count(
    page_number: u32,
    page_size: u32,
    returned: usize,
    exact_count: Option<u64>,
) -> u64 {
    if let Some(count) = exact_count {
        return count;
    }

    if returned >= page_size as usize {
        u64::from(page_number.max(1)) * u64::from(page_size) + 1
    } else {
        page_offset(page_number, page_size) + returned as u64
    }
}

pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
