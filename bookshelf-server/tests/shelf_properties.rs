//! Property tests for shelf invariants

use std::collections::HashSet;

use proptest::prelude::*;

use bookshelf_server::models::{BookFilter, BookInput};
use bookshelf_server::{Shelf, StoreError};

fn input(name: String, page_count: u32, read_page: u32) -> BookInput {
    BookInput {
        name: Some(name),
        page_count: Some(page_count),
        read_page: Some(read_page),
        reading: Some(false),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn finished_tracks_last_page(page_count in 0u32..2000, read_page in 0u32..2000) {
        prop_assume!(read_page <= page_count);
        let mut shelf = Shelf::new();
        let id = shelf.create(input("Dicoding".into(), page_count, read_page)).unwrap();

        let book = shelf.get(id.as_str()).unwrap();
        prop_assert_eq!(book.finished, read_page == page_count);
    }

    #[test]
    fn overread_is_always_rejected(page_count in 0u32..2000, extra in 1u32..500, name in ".*") {
        let mut shelf = Shelf::new();
        let result = shelf.create(input(name, page_count, page_count + extra));
        prop_assert!(matches!(result, Err(StoreError::Validation(_))));
        prop_assert!(shelf.is_empty());
    }

    #[test]
    fn update_keeps_finished_consistent(
        first in (0u32..500, 0u32..500),
        second in (0u32..500, 0u32..500),
    ) {
        let mut shelf = Shelf::new();
        let (pc, rp) = (first.0.max(first.1), first.0.min(first.1));
        let id = shelf.create(input("Dicoding".into(), pc, rp)).unwrap();
        let before = shelf.get(id.as_str()).unwrap().clone();

        let (pc2, rp2) = second;
        let outcome = shelf
            .update(id.as_str(), input("Dicoding".into(), pc2, rp2))
            .map(|book| book.finished);
        match outcome {
            Ok(finished) => {
                prop_assert!(rp2 <= pc2);
                prop_assert_eq!(finished, rp2 == pc2);
            }
            Err(_) => {
                prop_assert!(rp2 > pc2);
                prop_assert_eq!(shelf.get(id.as_str()).unwrap(), &before);
            }
        }
    }

    #[test]
    fn ids_are_unique_and_listing_is_ordered(names in prop::collection::vec("[a-z]{1,8}", 1..40)) {
        let mut shelf = Shelf::new();
        let ids: Vec<_> = names
            .iter()
            .map(|name| shelf.create(input(name.clone(), 10, 0)).unwrap())
            .collect();

        let unique: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());

        let listed = shelf.list(&BookFilter::default()).unwrap();
        let listed_ids: Vec<_> = listed.into_iter().map(|b| b.id).collect();
        prop_assert_eq!(listed_ids, ids);
    }
}
