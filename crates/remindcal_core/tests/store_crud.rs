use chrono::NaiveDate;
use remindcal_core::{parse_date, ReminderStore, StoreError};

fn date(value: &str) -> NaiveDate {
    parse_date(value).unwrap()
}

#[test]
fn add_appends_text_as_last_element() {
    let mut store = ReminderStore::new();
    store.add(date("2025-06-01"), "Doctor appointment").unwrap();
    store.add(date("2025-06-01"), "Pay rent").unwrap();

    let reminders = store.get(date("2025-06-01"));
    assert_eq!(reminders.last().map(String::as_str), Some("Pay rent"));
    assert_eq!(reminders.len(), 2);
}

#[test]
fn add_blank_text_is_a_noop() {
    let mut store = ReminderStore::new();
    store.add(date("2025-06-01"), "Existing").unwrap();

    assert_eq!(store.add(date("2025-06-01"), ""), Err(StoreError::EmptyText));
    assert_eq!(
        store.add(date("2025-06-01"), "   \t "),
        Err(StoreError::EmptyText)
    );
    assert_eq!(store.add(date("2025-06-02"), " "), Err(StoreError::EmptyText));

    assert_eq!(store.get(date("2025-06-01")), ["Existing"]);
    assert!(store.get(date("2025-06-02")).is_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn get_unknown_date_returns_empty() {
    let store = ReminderStore::new();
    assert!(store.get(date("2030-01-01")).is_empty());
}

#[test]
fn edit_replaces_in_place_and_keeps_other_positions() {
    let mut store = ReminderStore::new();
    let day = date("2025-03-10");
    store.add(day, "first").unwrap();
    store.add(day, "second").unwrap();
    store.add(day, "third").unwrap();

    store.edit(day, 2, "  middle  ").unwrap();
    assert_eq!(store.get(day), ["first", "middle", "third"]);
}

#[test]
fn edit_new_year_scenario() {
    let mut store = ReminderStore::new();
    let day = date("2025-01-01");
    store.add(day, "New Year").unwrap();

    store.edit(day, 1, "New Year Party").unwrap();
    assert_eq!(store.get(day), ["New Year Party"]);
}

#[test]
fn edit_rejects_bad_requests_without_mutation() {
    let mut store = ReminderStore::new();
    let day = date("2025-01-01");
    store.add(day, "one").unwrap();
    store.add(day, "two").unwrap();
    let before = store.clone();

    assert_eq!(
        store.edit(day, 3, "three"),
        Err(StoreError::IndexOutOfRange {
            date: day,
            index: 3,
            len: 2
        })
    );
    assert!(matches!(
        store.edit(day, 0, "zero"),
        Err(StoreError::IndexOutOfRange { index: 0, .. })
    ));
    assert_eq!(store.edit(day, 1, "   "), Err(StoreError::EmptyText));
    assert_eq!(
        store.edit(date("2025-01-02"), 1, "missing"),
        Err(StoreError::NoReminders(date("2025-01-02")))
    );

    assert_eq!(store, before);
}

#[test]
fn remove_returns_text_and_shifts_later_entries() {
    let mut store = ReminderStore::new();
    let day = date("2025-05-05");
    store.add(day, "a").unwrap();
    store.add(day, "b").unwrap();
    store.add(day, "c").unwrap();

    assert_eq!(store.remove(day, 1).unwrap(), "a");
    assert_eq!(store.get(day), ["b", "c"]);
    assert_eq!(store.get(day).len(), 2);
}

#[test]
fn removing_last_reminder_deletes_the_date_key() {
    let mut store = ReminderStore::new();
    let day = date("2025-05-05");
    store.add(day, "only").unwrap();
    store.add(date("2025-05-06"), "other").unwrap();

    assert_eq!(store.remove(day, 1).unwrap(), "only");
    assert!(store.get(day).is_empty());
    assert!(!store.dates().any(|key| key == "2025-05-05"));
    assert!(!store.entries().contains_key("2025-05-05"));
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_on_empty_store_reports_no_reminders() {
    let mut store = ReminderStore::new();
    let err = store.remove(date("2025-01-01"), 1).unwrap_err();

    assert_eq!(err, StoreError::NoReminders(date("2025-01-01")));
    assert!(err.to_string().contains("no reminders found"));
    assert!(store.is_empty());
}

#[test]
fn remove_out_of_range_leaves_store_unchanged() {
    let mut store = ReminderStore::new();
    let day = date("2025-01-01");
    store.add(day, "one").unwrap();

    assert!(matches!(
        store.remove(day, 2),
        Err(StoreError::IndexOutOfRange { len: 1, .. })
    ));
    assert_eq!(store.get(day), ["one"]);
}
