//! Property-based tests for opsdeck-audit
//!
//! These tests verify properties that should hold across all inputs.

use opsdeck_audit::{
    filter_records, sort_records, to_csv, visible_page_numbers, ExportColumn, FilterCriteria,
    LogRecord, PageMarker, Paginator, SortDirection,
};
use proptest::prelude::*;

/// Strategy for timestamps: mostly valid, some duplicates, some garbage
fn timestamp_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (20u32..=26, 0u32..24).prop_map(|(day, hour)| format!("2023-10-{:02}T{:02}:00:00Z", day, hour)),
        1 => Just("not a date".to_string()),
        1 => Just(String::new()),
    ]
}

fn record_strategy() -> impl Strategy<Value = LogRecord> {
    (
        timestamp_strategy(),
        prop::sample::select(vec!["Login", "Failed Login Attempt", "Deleted User", "Export"]),
        prop::sample::select(vec!["alice", "bob", "carol"]),
        prop::option::of(prop::sample::select(vec!["Success", "Failed", "Pending"])),
        prop::option::of("[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}"),
    )
        .prop_map(|(timestamp, action, user, status, ip)| {
            let mut record = LogRecord::new("", timestamp, action)
                .with_user(user, format!("{}@corp.example", user));
            record.status = status.map(str::to_string);
            record.ip = ip;
            record
        })
}

/// Records with ids equal to their input position
fn records_strategy() -> impl Strategy<Value = Vec<LogRecord>> {
    prop::collection::vec(record_strategy(), 0..40).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, mut record)| {
                record.id = format!("evt_{}", i);
                record
            })
            .collect()
    })
}

fn position(record: &LogRecord) -> usize {
    record.id.trim_start_matches("evt_").parse().unwrap()
}

// ============================================================================
// Property 1: Filter dimensions commute
// ============================================================================

proptest! {
    #[test]
    fn prop_filter_dimensions_commute(
        records in records_strategy(),
        query in prop::sample::select(vec!["", "login", "ALICE", "10.", "corp"]),
        action in prop::sample::select(vec!["All", "Login", "Deleted User"]),
        status in prop::sample::select(vec!["All", "Success", "Failed"]),
        date_from in prop::sample::select(vec!["", "2023-10-22"]),
        date_to in prop::sample::select(vec!["", "2023-10-24"]),
    ) {
        let combined = FilterCriteria::new()
            .with_query(query)
            .with_action(action)
            .with_status(status)
            .with_date_from(date_from)
            .with_date_to(date_to);

        let dims = [
            FilterCriteria::new().with_query(query),
            FilterCriteria::new().with_action(action),
            FilterCriteria::new().with_status(status),
            FilterCriteria::new().with_date_from(date_from).with_date_to(date_to),
        ];

        let forward = dims.iter().fold(records.clone(), |acc, c| filter_records(&acc, c));
        let backward = dims.iter().rev().fold(records.clone(), |acc, c| filter_records(&acc, c));
        let all_at_once = filter_records(&records, &combined);

        prop_assert_eq!(&forward, &all_at_once);
        prop_assert_eq!(&backward, &all_at_once);
    }
}

// ============================================================================
// Property 2: Sorting is stable in both directions
// ============================================================================

proptest! {
    #[test]
    fn prop_sort_is_stable(records in records_strategy(), ascending in any::<bool>()) {
        let direction = if ascending { SortDirection::Ascending } else { SortDirection::Descending };
        let mut sorted = records.clone();
        sort_records(&mut sorted, direction);

        prop_assert_eq!(sorted.len(), records.len());
        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.parsed_timestamp() == b.parsed_timestamp() {
                prop_assert!(position(a) < position(b), "tie reordered: {} before {}", a.id, b.id);
            } else if direction == SortDirection::Descending {
                prop_assert!(a.parsed_timestamp() > b.parsed_timestamp());
            } else {
                prop_assert!(a.parsed_timestamp() < b.parsed_timestamp());
            }
        }
    }
}

// ============================================================================
// Property 3: Pagination clamps and is idempotent
// ============================================================================

proptest! {
    #[test]
    fn prop_paginate_clamps_into_range(
        len in 0usize..60,
        page_size in 1usize..12,
        requested in 0usize..10_000,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let paginator = Paginator::new(page_size).unwrap();

        let page = paginator.paginate(&items, requested);
        prop_assert!(page.total_pages >= 1);
        prop_assert!(page.page_number >= 1 && page.page_number <= page.total_pages);
        prop_assert_eq!(page.total_pages, std::cmp::max(1, len.div_ceil(page_size)));
        prop_assert!(page.items.len() <= page_size);

        prop_assert_eq!(&page, &paginator.paginate(&items, requested));
    }

    #[test]
    fn prop_pages_cover_collection_exactly_once(len in 0usize..60, page_size in 1usize..12) {
        let items: Vec<usize> = (0..len).collect();
        let paginator = Paginator::new(page_size).unwrap();
        let total = paginator.total_pages(len);

        let rejoined: Vec<usize> = (1..=total)
            .flat_map(|n| paginator.paginate(&items, n).items)
            .collect();
        prop_assert_eq!(rejoined, items);
    }
}

// ============================================================================
// Property 4: Page-number windows always include first, last and neighbours
// ============================================================================

proptest! {
    #[test]
    fn prop_visible_pages_include_anchors(
        total in 1usize..50,
        current in 0usize..60,
        window in 0usize..8,
    ) {
        let markers = visible_page_numbers(current, total, window);
        let pages: Vec<usize> = markers
            .iter()
            .filter_map(|m| match m {
                PageMarker::Page(n) => Some(*n),
                PageMarker::Ellipsis => None,
            })
            .collect();
        let current = current.clamp(1, total);

        prop_assert!(pages.contains(&1));
        prop_assert!(pages.contains(&total));
        prop_assert!(pages.contains(&current));
        if current > 1 {
            prop_assert!(pages.contains(&(current - 1)));
        }
        if current < total {
            prop_assert!(pages.contains(&(current + 1)));
        }
        prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(markers.first() != Some(&PageMarker::Ellipsis));
        prop_assert!(markers.last() != Some(&PageMarker::Ellipsis));
    }
}

// ============================================================================
// Property 5: CSV escaping doubles quotes and quotes every field
// ============================================================================

proptest! {
    #[test]
    fn prop_csv_field_quoting(details in "[a-zA-Z \"]{0,30}") {
        let record = LogRecord::new("evt_0", "2023-10-24T10:00:00Z", "Note").with_details(details.clone());

        let csv = to_csv(&[record], &[ExportColumn::Details]).unwrap();
        let expected = format!("\"Details\"\n\"{}\"", details.replace('"', "\"\""));
        prop_assert_eq!(csv, expected);
    }
}
