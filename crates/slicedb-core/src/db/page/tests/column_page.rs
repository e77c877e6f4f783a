use crate::{
    db::{
        column::ColumnBound,
        direction::Direction,
        page::{ColumnPage, PageError},
        store::StoreError,
    },
    test_support::{FaultyStore, LetterStore, ScriptedStore, keys, letter_store, numeric_store},
};

type LetterPage<'a> = ColumnPage<'a, LetterStore>;

fn page_keys(page: &LetterPage<'_>) -> Vec<&'static str> {
    keys(&page.columns().expect("fetch should succeed"))
}

fn offset_of(page: &LetterPage<'_>) -> Option<&'static str> {
    page.offset().expect("fetch should succeed").copied()
}

// Follow next_page from `page` to the end, collecting each page's offset.
fn forward_offsets(page: LetterPage<'_>) -> Vec<&'static str> {
    let mut offsets = Vec::new();
    let mut current = Some(page);
    while let Some(page) = current {
        offsets.extend(offset_of(&page));
        current = page.next_page().expect("fetch should succeed");
    }

    offsets
}

fn backward_offsets(page: LetterPage<'_>) -> Vec<&'static str> {
    let mut offsets = Vec::new();
    let mut current = Some(page);
    while let Some(page) = current {
        offsets.extend(offset_of(&page));
        current = page.prev_page().expect("fetch should succeed");
    }

    offsets
}

fn last_page_of(store: &LetterStore, page_size: usize) -> LetterPage<'_> {
    let mut page = ColumnPage::first(store, "xyz", page_size).expect("valid page size");
    while let Some(next) = page.next_page().expect("fetch should succeed") {
        page = next;
    }

    page
}

#[test]
fn first_page_holds_the_leading_columns() {
    let store = letter_store();
    let page = ColumnPage::first(&store, "xyz", 3).expect("valid page size");

    assert_eq!(page_keys(&page), vec!["a", "b", "c"]);
    assert_eq!(offset_of(&page), Some("a"));
    assert!(page.is_first().expect("fetch"));
    assert!(!page.is_last().expect("fetch"));
    assert!(!page.is_reverse());
    assert_eq!(page.page_size(), 3);
    assert_eq!(page.bound(), &ColumnBound::Start);
}

#[test]
fn forward_walk_visits_every_page_offset() {
    let store = letter_store();
    let first = ColumnPage::first(&store, "xyz", 3).expect("valid page size");

    assert_eq!(forward_offsets(first), vec!["a", "d", "g"]);
}

#[test]
fn backward_walk_from_the_last_forward_page() {
    let store = letter_store();
    let last = last_page_of(&store, 3);
    assert_eq!(page_keys(&last), vec!["g", "h"]);

    assert_eq!(backward_offsets(last), vec!["g", "g", "d"]);
}

#[test]
fn backward_pages_hold_the_columns_before_their_offset() {
    let store = letter_store();
    let last = last_page_of(&store, 3);

    let previous = last.prev_page().expect("fetch").expect("page before g");
    assert!(previous.is_reverse());
    assert_eq!(page_keys(&previous), vec!["d", "e", "f"]);
    assert!(!previous.is_first().expect("fetch"));

    let first = previous.prev_page().expect("fetch").expect("page before d");
    assert_eq!(page_keys(&first), vec!["a", "b", "c"]);
    assert!(first.is_first().expect("fetch"));
    assert!(first.prev_page().expect("fetch").is_none());
}

#[test]
fn page_count_for_page_sizes_dividing_the_row() {
    let store = letter_store();

    for (page_size, expected) in [(2, 4), (4, 2), (8, 1)] {
        let first = ColumnPage::first(&store, "xyz", page_size).expect("valid page size");
        assert_eq!(forward_offsets(first).len(), expected, "page size {page_size}");
    }
}

#[test]
fn previous_page_near_the_row_start_is_short() {
    let store = letter_store();
    let page = ColumnPage::at(&store, "xyz", 3, "b").expect("valid page size");
    assert_eq!(page_keys(&page), vec!["b", "c", "d"]);

    let previous = page.prev_page().expect("fetch").expect("page before b");

    assert_eq!(page_keys(&previous), vec!["a"]);
    assert!(previous.is_first().expect("fetch"));
}

#[test]
fn next_after_previous_returns_to_the_same_offset() {
    let store = letter_store();
    let first = ColumnPage::first(&store, "xyz", 3).expect("valid page size");

    let second = first.next_page().expect("fetch").expect("second page");
    let back = second.prev_page().expect("fetch").expect("page before d");
    let again = back.next_page().expect("fetch").expect("page at d");

    assert_eq!(offset_of(&second), Some("d"));
    assert_eq!(offset_of(&again), Some("d"));
    assert_eq!(page_keys(&again), page_keys(&second));
    assert!(!again.is_reverse());
}

#[test]
fn last_forward_page_has_no_next_page() {
    let store = letter_store();
    let first = ColumnPage::first(&store, "xyz", 6).expect("valid page size");

    let second = first.next_page().expect("fetch").expect("second page");

    assert_eq!(page_keys(&second), vec!["g", "h"]);
    assert!(second.is_last().expect("fetch"));
    assert!(second.next_page().expect("fetch").is_none());
}

#[test]
fn full_last_page_does_not_repeat_a_column() {
    let store = letter_store();
    let first = ColumnPage::first(&store, "the_row", 6).expect("valid page size");

    let second = first.next_page().expect("fetch").expect("second page");

    assert_eq!(page_keys(&first), vec!["a", "b", "c", "d", "e", "f"]);
    assert_eq!(page_keys(&second), vec!["g"]);
}

#[test]
fn row_end_page_aligns_to_the_last_column() {
    let store = letter_store();
    let last = ColumnPage::last(&store, "xyz", 3).expect("valid page size");

    assert_eq!(page_keys(&last), vec!["f", "g", "h"]);
    assert_eq!(offset_of(&last), None);
    assert!(last.is_last().expect("fetch"));
    assert!(last.next_page().expect("fetch").is_none());

    let previous = last.prev_page().expect("fetch").expect("page before f");
    assert_eq!(page_keys(&previous), vec!["c", "d", "e"]);

    let first = previous.prev_page().expect("fetch").expect("page before c");
    assert_eq!(page_keys(&first), vec!["a", "b"]);
    assert!(first.is_first().expect("fetch"));
}

#[test]
fn page_size_larger_than_the_row() {
    let store = letter_store();
    let page = ColumnPage::first(&store, "SHORTROW", 100).expect("valid page size");

    assert_eq!(page_keys(&page), vec!["A", "B"]);
    assert!(page.is_first().expect("fetch"));
    assert!(page.is_last().expect("fetch"));
    assert!(page.next_page().expect("fetch").is_none());
    assert!(page.prev_page().expect("fetch").is_none());
}

#[test]
fn missing_row_is_a_single_empty_page() {
    let store = letter_store();
    let page = ColumnPage::first(&store, "nope", 3).expect("valid page size");

    assert!(page.columns().expect("fetch").is_empty());
    assert_eq!(offset_of(&page), None);
    assert!(page.is_last().expect("fetch"));
    assert!(page.next_page().expect("fetch").is_none());
}

#[test]
fn zero_page_size_is_rejected() {
    let store = letter_store();

    let err = ColumnPage::first(&store, "xyz", 0).err();
    assert_eq!(err, Some(PageError::InvalidPageSize { page_size: 0 }));

    let err = ColumnPage::at(&store, "xyz", 0, "c").err();
    assert_eq!(err, Some(PageError::InvalidPageSize { page_size: 0 }));
}

#[test]
fn slice_is_fetched_once_per_page() {
    let store = ScriptedStore::new().answer(
        ColumnBound::Start,
        5,
        Direction::Asc,
        &[("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)],
    );
    let page = ColumnPage::first(&store, "the_row", 3).expect("valid page size");

    assert_eq!(keys(&page.columns().expect("fetch")), vec!["a", "b", "c"]);
    assert!(!page.is_last().expect("fetch"));
    assert_eq!(page.offset().expect("fetch"), Some(&"a"));

    assert_eq!(store.requests(), vec![(ColumnBound::Start, 5, Direction::Asc)]);
}

#[test]
fn store_failure_surfaces_and_the_page_can_retry() {
    let store = FaultyStore::new(letter_store()).failing_on(0, StoreError::timeout("slow node"));
    let page = ColumnPage::first(&store, "xyz", 3).expect("valid page size");

    let err = page.columns().expect_err("first fetch fails");
    assert_eq!(err, PageError::Store(StoreError::timeout("slow node")));

    assert_eq!(keys(&page.columns().expect("retry succeeds")), vec!["a", "b", "c"]);
    assert_eq!(store.calls(), 2);
}

#[test]
fn reverse_page_at_a_key_past_the_row_end() {
    let store = numeric_store(10);
    let page = ColumnPage::before(&store, 0, 3, 100).expect("valid page size");

    assert_eq!(keys(&page.columns().expect("fetch")), vec![7, 8, 9]);
    assert!(!page.is_first().expect("fetch"));
    assert!(!page.is_last().expect("fetch"));

    let previous = page.prev_page().expect("fetch").expect("page before 7");
    assert_eq!(keys(&previous.columns().expect("fetch")), vec![4, 5, 6]);

    let forward = previous.next_page().expect("fetch").expect("page at 7");
    assert_eq!(keys(&forward.columns().expect("fetch")), vec![7, 8, 9]);

    // nothing at or after the absent offset
    let beyond = page.next_page().expect("fetch").expect("page at 100");
    assert!(beyond.columns().expect("fetch").is_empty());
    assert!(beyond.is_last().expect("fetch"));
}

#[test]
fn reverse_page_at_an_absent_key_near_the_row_start() {
    let store = letter_store();
    let page = ColumnPage::before(&store, "xyz", 3, "bb").expect("valid page size");

    assert_eq!(page_keys(&page), vec!["a", "b"]);
    assert!(page.is_first().expect("fetch"));
    assert!(page.prev_page().expect("fetch").is_none());
}
