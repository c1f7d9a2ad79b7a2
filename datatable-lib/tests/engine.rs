//! Tests for the table engine: sorting, filtering and pagination.

use chrono::DateTime;
use chrono::Utc;
use datatable_lib::model::{Record, Value};
use datatable_lib::{Column, Direction, TableEngine};

fn people() -> Vec<Record> {
    vec![
        Record::new().set("id", 1i64).set("name", "Charlie"),
        Record::new().set("id", 2i64).set("name", "Alice"),
        Record::new().set("id", 3i64).set("name", "Bob"),
    ]
}

fn name_columns() -> Vec<Column<Record>> {
    vec![
        Column::new("id").sortable(),
        Column::new("name").sortable().filterable(),
    ]
}

fn names(rows: &[&Record]) -> Vec<String> {
    rows.iter()
        .map(|r| r.get_string("name").unwrap().unwrap_or_default().to_string())
        .collect()
}

fn ids(rows: &[&Record]) -> Vec<i64> {
    rows.iter().map(|r| r.get_int("id").unwrap().unwrap()).collect()
}

#[test]
fn test_sort_by_name_then_reverse() {
    let mut engine = TableEngine::new(people(), name_columns());

    engine.handle_sort("name");
    assert_eq!(names(&engine.filtered_and_sorted_data()), ["Alice", "Bob", "Charlie"]);

    engine.handle_sort("name");
    assert_eq!(names(&engine.filtered_and_sorted_data()), ["Charlie", "Bob", "Alice"]);
}

#[test]
fn test_sort_by_accessor_date_ignores_lexical_order() {
    let data = vec![
        Record::new()
            .set("id", 1i64)
            .set("details", Record::new().set("date", "2024-03-05T09:00:00Z")),
        Record::new()
            .set("id", 2i64)
            .set("details", Record::new().set("date", "2023-12-25T18:30:00+05:00")),
        Record::new()
            .set("id", 3i64)
            .set("details", Record::new().set("date", "2024-01-10T00:00:00-08:00")),
    ];
    let due = Column::new("details.date").sortable().accessor(|r: &Record| {
        let parsed = r
            .get_record("details")
            .ok()
            .flatten()
            .and_then(|d| d.get_string("date").ok().flatten())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Value::from(parsed)
    });
    let mut engine = TableEngine::new(data, vec![due]);

    engine.handle_sort("details.date");
    assert_eq!(ids(&engine.filtered_and_sorted_data()), [2, 3, 1]);

    engine.handle_sort("details.date");
    assert_eq!(ids(&engine.filtered_and_sorted_data()), [1, 3, 2]);
}

#[test]
fn test_filter_resets_page_and_shrinks_totals() {
    let mut engine = TableEngine::new(people(), name_columns()).with_items_per_page(1);
    assert_eq!(engine.total_pages(), 3);

    engine.handle_page_change(2);
    engine.handle_filter("name", "a");

    assert_eq!(engine.current_page(), 1);
    assert_eq!(engine.total_items(), 2);
    assert_eq!(engine.total_pages(), 2);
    assert_eq!(names(&engine.filtered_and_sorted_data()), ["Charlie", "Alice"]);
}

#[test]
fn test_pagination_indices() {
    let mut engine = TableEngine::new(people(), name_columns()).with_items_per_page(2);

    assert_eq!(engine.paginated_data().len(), 2);
    assert_eq!(engine.start_index(), 1);
    assert_eq!(engine.end_index(), 2);

    engine.handle_page_change(2);
    assert_eq!(names(&engine.paginated_data()), ["Bob"]);
    assert_eq!(engine.start_index(), 3);
    assert_eq!(engine.end_index(), 3);

    engine.handle_filter("name", "bob");
    assert_eq!(engine.total_pages(), 1);
    assert_eq!(engine.current_page(), 1);
    assert_eq!(names(&engine.paginated_data()), ["Bob"]);
}

#[test]
fn test_sort_toggle_three_times() {
    let mut engine = TableEngine::new(people(), name_columns());
    engine.handle_sort("id");
    let first = engine.state().sort_direction;
    engine.handle_sort("id");
    assert_eq!(engine.state().sort_direction, first.toggle());
    engine.handle_sort("id");
    assert_eq!(engine.state().sort_direction, first);
}

#[test]
fn test_filter_result_is_subsequence_of_input() {
    let data: Vec<Record> = ["Anna", "Ben", "Hannah", "Joanna", "Zed", "anita"]
        .iter()
        .enumerate()
        .map(|(i, n)| Record::new().set("id", i as i64).set("name", *n))
        .collect();
    let mut engine = TableEngine::new(data, name_columns());

    for needle in ["an", "AN", "", "  ", "z", "nope", "a"] {
        engine.handle_filter("name", needle);
        let filtered = engine.filtered_and_sorted_data();
        let mut source = engine.data().iter();
        for row in &filtered {
            assert!(
                source.any(|candidate| std::ptr::eq(candidate, *row)),
                "filter {:?} produced a row out of input order",
                needle
            );
        }
    }
}

#[test]
fn test_blank_filter_keeps_everything() {
    let mut engine = TableEngine::new(people(), name_columns());
    engine.handle_filter("name", "   ");
    assert_eq!(engine.total_items(), 3);
}

#[test]
fn test_filters_combine_with_and() {
    let data = vec![
        Record::new().set("name", "Alice").set("status", "booked"),
        Record::new().set("name", "Alina").set("status", "lead"),
        Record::new().set("name", "Bob").set("status", "booked"),
    ];
    let columns = vec![Column::new("name"), Column::new("status")];
    let mut engine = TableEngine::new(data, columns);

    engine.handle_filter("name", "ali");
    engine.handle_filter("status", "BOOK");
    assert_eq!(names(&engine.filtered_and_sorted_data()), ["Alice"]);
}

#[test]
fn test_filter_on_nested_path_and_numbers() {
    let data = vec![
        Record::new().set("name", "A").set("details", Record::new().set("score", 120i64)),
        Record::new().set("name", "B").set("details", Record::new().set("score", 45i64)),
        Record::new().set("name", "C"),
    ];
    let columns = vec![Column::new("name"), Column::new("details.score")];
    let mut engine = TableEngine::new(data, columns);

    engine.handle_filter("details.score", "12");
    assert_eq!(names(&engine.filtered_and_sorted_data()), ["A"]);
}

#[test]
fn test_filter_change_always_resets_page() {
    let mut engine = TableEngine::new(people(), name_columns()).with_items_per_page(1);
    for (page, needle) in [(2, "a"), (3, ""), (5, "zzz")] {
        engine.handle_page_change(page);
        engine.handle_filter("name", needle);
        assert_eq!(engine.current_page(), 1);
    }
}

#[test]
fn test_pages_cover_all_rows_once() {
    let data: Vec<Record> = (0..23i64)
        .map(|i| Record::new().set("id", i).set("name", format!("client {}", i % 7)))
        .collect();
    let mut engine = TableEngine::new(data, name_columns()).with_items_per_page(5);
    engine.handle_sort("name");
    engine.handle_filter("name", "client");

    let expected = ids(&engine.filtered_and_sorted_data());
    let mut collected = Vec::new();
    for page in 1..=engine.total_pages() {
        engine.handle_page_change(page);
        collected.extend(ids(&engine.paginated_data()));
    }
    assert_eq!(engine.total_pages(), 5);
    assert_eq!(collected, expected);
}

#[test]
fn test_missing_values_sort_last_both_directions() {
    let data = vec![
        Record::new().set("id", 1i64).set("score", 5i64),
        Record::new().set("id", 2i64),
        Record::new().set("id", 3i64).set("score", 9i64),
        Record::new().set("id", 4i64).set("score", Value::Null),
        Record::new().set("id", 5i64).set("score", 1i64),
    ];
    let mut engine = TableEngine::new(data, vec![Column::new("id"), Column::new("score").sortable()]);

    engine.handle_sort("score");
    assert_eq!(ids(&engine.filtered_and_sorted_data()), [5, 1, 3, 2, 4]);

    engine.handle_sort("score");
    assert_eq!(engine.state().sort_direction, Direction::Desc);
    assert_eq!(ids(&engine.filtered_and_sorted_data()), [3, 1, 5, 2, 4]);
}

#[test]
fn test_reset_filters_is_idempotent() {
    let mut engine = TableEngine::new(people(), name_columns()).with_items_per_page(1);
    engine.handle_filter("name", "b");
    engine.handle_page_change(3);

    engine.reset_filters();
    let once = engine.state().clone();
    engine.reset_filters();

    assert_eq!(engine.state(), &once);
    assert!(engine.state().filters.is_empty());
    assert_eq!(engine.current_page(), 1);
}

#[test]
fn test_equal_keys_keep_input_order() {
    let data = vec![
        Record::new().set("id", 1i64).set("stage", "Lead"),
        Record::new().set("id", 2i64).set("stage", "booked"),
        Record::new().set("id", 3i64).set("stage", "lead"),
        Record::new().set("id", 4i64).set("stage", "Booked"),
    ];
    let mut engine = TableEngine::new(data, vec![Column::new("id"), Column::new("stage")]);

    engine.handle_sort("stage");
    assert_eq!(ids(&engine.filtered_and_sorted_data()), [2, 4, 1, 3]);

    engine.handle_sort("stage");
    assert_eq!(ids(&engine.filtered_and_sorted_data()), [1, 3, 2, 4]);
}

#[test]
fn test_sort_mixed_date_strings_and_booleans() {
    let data = vec![
        Record::new().set("id", 1i64).set("when", "2024-02-01").set("paid", true),
        Record::new().set("id", 2i64).set("when", "2023-11-30T10:00:00Z").set("paid", false),
        Record::new().set("id", 3i64).set("when", "2024-01-15 08:00:00").set("paid", true),
    ];
    let columns = vec![Column::new("id"), Column::new("when"), Column::new("paid")];
    let mut engine = TableEngine::new(data, columns);

    engine.handle_sort("when");
    assert_eq!(ids(&engine.filtered_and_sorted_data()), [2, 3, 1]);

    engine.handle_sort("paid");
    assert_eq!(ids(&engine.filtered_and_sorted_data()), [2, 1, 3]);
}

#[test]
fn test_sort_does_not_reorder_input() {
    let mut engine = TableEngine::new(people(), name_columns());
    engine.handle_sort("name");
    let _ = engine.filtered_and_sorted_data();
    assert_eq!(ids(&engine.data().iter().collect::<Vec<_>>()), [1, 2, 3]);
}

#[test]
fn test_empty_result_keeps_page() {
    let mut engine = TableEngine::new(people(), name_columns()).with_items_per_page(1);
    engine.handle_filter("name", "zzz");
    engine.handle_page_change(2);

    assert_eq!(engine.total_items(), 0);
    assert_eq!(engine.total_pages(), 0);
    assert_eq!(engine.current_page(), 2);
    assert!(engine.paginated_data().is_empty());
}

#[test]
fn test_huge_page_number_is_empty() {
    let mut engine = TableEngine::new(people(), name_columns()).with_items_per_page(2);
    engine.handle_page_change(usize::MAX);

    assert!(engine.paginated_data().is_empty());
    assert_eq!(engine.start_index(), usize::MAX);
    assert_eq!(engine.end_index(), 3);
    assert_eq!(engine.total_pages(), 2);
}

#[test]
fn test_page_size_change_resets_page() {
    let mut engine = TableEngine::new(people(), name_columns()).with_items_per_page(1);
    engine.handle_page_change(3);
    engine.set_items_per_page(2);
    assert_eq!(engine.current_page(), 1);
    assert_eq!(engine.total_pages(), 2);

    engine.set_items_per_page(0);
    assert_eq!(engine.items_per_page(), 1);
}

#[test]
fn test_refreshing_data_keeps_state() {
    let mut engine = TableEngine::new(people(), name_columns());
    engine.handle_sort("name");
    engine.handle_filter("name", "o");

    let mut refreshed = people();
    refreshed.push(Record::new().set("id", 4i64).set("name", "Olivia"));
    engine.set_data(refreshed);

    assert_eq!(names(&engine.filtered_and_sorted_data()), ["Bob", "Olivia"]);
}

#[test]
fn test_search_and_clear() {
    let mut engine = TableEngine::new(people(), name_columns()).with_items_per_page(1);
    engine.handle_page_change(2);
    engine.handle_search("li");
    assert_eq!(engine.current_page(), 1);
    assert_eq!(names(&engine.filtered_and_sorted_data()), ["Charlie", "Alice"]);

    engine.clear_search();
    assert_eq!(engine.total_items(), 3);
}

#[test]
fn test_resolve_value_uses_column() {
    let engine = TableEngine::new(people(), name_columns());
    let row = &engine.data()[1];
    let column = engine.column("name").unwrap();
    assert_eq!(engine.resolve_value(row, column).as_deref(), Some(&Value::from("Alice")));
    assert!(engine.column("missing").is_none());
}
