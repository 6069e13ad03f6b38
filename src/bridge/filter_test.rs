use crate::bridge::filter::CardFilter;
use crate::deck::Card;
use serde_json::json;

fn cards() -> Vec<Card> {
    serde_json::from_value(json!([
        {"id": 1, "title": "Fix login BUG", "archived": false},
        {"id": 2, "title": "Write docs", "description": "mention the bug tracker", "archived": true},
        {"id": 3, "title": "Release", "done": "2025-02-01T10:00:00+00:00"},
        {"id": 4, "title": "Plan sprint", "description": null}
    ]))
    .unwrap()
}

fn ids(cards: &[Card]) -> Vec<u64> {
    cards.iter().map(|card| card.id).collect()
}

#[test]
fn empty_filter_returns_everything_unchanged() {
    let filter = CardFilter::default();
    assert!(filter.is_empty());
    assert_eq!(filter.apply(cards()), cards());
}

#[test]
fn search_is_case_insensitive_on_title_and_description() {
    let filter = CardFilter {
        search: Some("bug".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(cards())), vec![1, 2]);
}

#[test]
fn search_equals_manual_restriction() {
    let needle = "S";
    let filter = CardFilter {
        search: Some(needle.to_string()),
        ..Default::default()
    };
    let expected: Vec<u64> = cards()
        .into_iter()
        .filter(|card| {
            card.title().to_lowercase().contains("s")
                || card
                    .description()
                    .is_some_and(|d| d.to_lowercase().contains("s"))
        })
        .map(|card| card.id)
        .collect();
    assert_eq!(ids(&filter.apply(cards())), expected);
}

#[test]
fn archived_filter_is_exact_match() {
    let archived = CardFilter {
        archived: Some(true),
        ..Default::default()
    };
    assert_eq!(ids(&archived.apply(cards())), vec![2]);

    let active = CardFilter {
        archived: Some(false),
        ..Default::default()
    };
    assert_eq!(ids(&active.apply(cards())), vec![1, 3, 4]);
}

#[test]
fn done_filter_treats_timestamp_as_done() {
    let done = CardFilter {
        done: Some(true),
        ..Default::default()
    };
    assert_eq!(ids(&done.apply(cards())), vec![3]);
}

#[test]
fn filters_combine() {
    let filter = CardFilter {
        search: Some("bug".to_string()),
        archived: Some(false),
        done: Some(false),
    };
    assert_eq!(ids(&filter.apply(cards())), vec![1]);
}
