//! Property tests for in-memory paging arithmetic.

use proptest::prelude::*;

use catalog_api::{PageRequest, PagedList};

proptest! {
    #[test]
    fn page_never_exceeds_limit(total in 0usize..300, page in 1u64..40, size in 1u64..120) {
        let request = PageRequest::new(page, size).unwrap();
        let list = PagedList::from_items(0..total, &request).unwrap();

        prop_assert!(list.len() as u64 <= size);
        prop_assert_eq!(list.meta.page_size, size);
        prop_assert_eq!(list.meta.total_count, total as u64);
        prop_assert_eq!(list.meta.has_previous, page > 1);
        prop_assert_eq!(list.meta.has_next, page < list.meta.total_pages);
    }

    #[test]
    fn pages_cover_source_in_order(total in 0usize..200, size in 1u64..60) {
        let first = PageRequest::new(1, size).unwrap();
        let total_pages = PagedList::from_items(0..total, &first).unwrap().meta.total_pages;

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            let request = PageRequest::new(page, size).unwrap();
            let list = PagedList::from_items(0..total, &request).unwrap();
            prop_assert!(!list.is_empty());
            seen.extend(list);
        }

        prop_assert_eq!(seen, (0..total).collect::<Vec<_>>());
    }

    #[test]
    fn total_pages_is_ceiling(total in 0u64..1_000_000, size in 1u64..5_000) {
        let request = PageRequest::new(1, size).unwrap();
        let meta = catalog_api::PageMetadata::new(total, &request);

        prop_assert_eq!(meta.page_size, size);
        prop_assert_eq!(meta.total_pages, (total + size - 1) / size);
        prop_assert!(meta.total_pages * size >= total);
        prop_assert!(meta.total_pages == 0 || (meta.total_pages - 1) * size < total);
    }
}

#[test]
fn huge_page_number_is_empty_not_overflow() {
    let request = PageRequest::new(u64::MAX, 50).unwrap();
    let list = PagedList::from_items(0..10, &request).unwrap();

    assert!(list.is_empty());
    assert_eq!(list.meta.total_count, 10);
    assert!(!list.meta.has_next);
}
