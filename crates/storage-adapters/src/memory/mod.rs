//! In-memory document store backed by `DashMap`.

mod accounts;
mod journals;
mod posts;
mod therapists;

pub use accounts::MemoryAccountRepo;
pub use journals::MemoryJournalRepo;
pub use posts::MemoryPostRepo;
pub use therapists::MemoryTherapistRepo;

use domains::{Page, PageRequest};

/// Slices an already-filtered, already-sorted result set into one page.
pub(crate) fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let window = items
        .into_iter()
        .skip(page.offset())
        .take(page.per_page() as usize)
        .collect();
    Page::new(window, total, page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_slices_and_counts() {
        let req = PageRequest::new(2, 3).unwrap();
        let page = paginate((0..8).collect::<Vec<_>>(), req);
        assert_eq!(page.items, vec![3, 4, 5]);
        assert_eq!(page.total_items, 8);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next && page.has_prev);
    }

    #[test]
    fn paginate_past_the_end_is_empty() {
        let page = paginate(vec![1, 2], PageRequest::new(5, 10).unwrap());
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 2);
    }
}
