//! Date-keyed reminder store.
//!
//! # Responsibility
//! - Own the in-memory `date -> reminders` mapping.
//! - Provide CRUD, range browsing and keyword search over reminders.
//!
//! # Invariants
//! - A date key present in the mapping always has at least one reminder.
//! - Keys are canonical `YYYY-MM-DD` strings.
//! - Reminders are stored trimmed and never empty.
//! - A failed operation leaves the mapping untouched.

pub mod persist;

use crate::model::date::{days_in_month, format_date, parse_date, MAX_YEAR, MIN_YEAR};
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store queries and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Reminder text is blank after trimming.
    EmptyText,
    /// No reminders exist on the requested date.
    NoReminders(NaiveDate),
    /// 1-based reminder index outside `1..=len`.
    IndexOutOfRange {
        date: NaiveDate,
        index: usize,
        len: usize,
    },
    /// Month outside `1..=12`.
    InvalidMonth(u32),
    /// Year outside the supported calendar range.
    InvalidYear(i32),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "reminder text cannot be empty"),
            Self::NoReminders(date) => {
                write!(f, "no reminders found on {}", format_date(*date))
            }
            Self::IndexOutOfRange { date, index, len } => write!(
                f,
                "invalid reminder number {index} for {}; expected 1..={len}",
                format_date(*date)
            ),
            Self::InvalidMonth(month) => {
                write!(f, "month must be between 1 and 12, got {month}")
            }
            Self::InvalidYear(year) => {
                write!(f, "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}")
            }
        }
    }
}

impl Error for StoreError {}

/// One calendar day paired with its reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayReminders<'a> {
    pub date: NaiveDate,
    /// Empty when the day has no reminders.
    pub reminders: &'a [String],
}

/// Single keyword search match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Canonical date key.
    pub date: String,
    /// 1-based position within the date's reminders.
    pub index: usize,
    pub text: String,
}

/// In-memory reminder mapping, serialized verbatim as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReminderStore {
    entries: BTreeMap<String, Vec<String>>,
}

impl ReminderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from raw persisted entries.
    ///
    /// Hydrated state is brought in line with the store invariants:
    /// - keys that are not canonical `YYYY-MM-DD` dates are dropped;
    /// - reminders are trimmed and blank ones dropped;
    /// - dates left without reminders are dropped.
    pub fn from_entries(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut bad_keys = 0usize;
        let mut blank_reminders = 0usize;
        let mut empty_dates = 0usize;
        let mut entries = BTreeMap::new();

        for (key, reminders) in raw {
            if !is_canonical_key(&key) {
                bad_keys += 1;
                continue;
            }
            let before = reminders.len();
            let reminders = reminders
                .iter()
                .map(|text| text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>();
            blank_reminders += before - reminders.len();
            if reminders.is_empty() {
                empty_dates += 1;
                continue;
            }
            entries.insert(key, reminders);
        }

        if bad_keys + blank_reminders + empty_dates > 0 {
            warn!(
                "event=store_hydrate module=store status=pruned bad_keys={bad_keys} blank_reminders={blank_reminders} empty_dates={empty_dates}"
            );
        }
        Self { entries }
    }

    /// Read-only view of the full mapping.
    pub fn entries(&self) -> &BTreeMap<String, Vec<String>> {
        &self.entries
    }

    /// Number of dates holding reminders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total reminders across all dates.
    pub fn reminder_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Date keys in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Appends a reminder to `date` and returns its 1-based position.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank; the store is unchanged.
    pub fn add(&mut self, date: NaiveDate, text: &str) -> StoreResult<usize> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }

        let reminders = self.entries.entry(format_date(date)).or_default();
        reminders.push(text.to_string());
        debug!(
            "event=reminder_add module=store status=ok position={}",
            reminders.len()
        );
        Ok(reminders.len())
    }

    /// Returns reminders for an exact date, empty when none exist.
    pub fn get(&self, date: NaiveDate) -> &[String] {
        self.entries
            .get(&format_date(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns `n_days` consecutive days starting at `start` (inclusive).
    ///
    /// The walk stops after 9999-12-31, so fewer than `n_days` entries come
    /// back when the range would leave the supported calendar.
    pub fn get_range(&self, start: NaiveDate, n_days: usize) -> Vec<DayReminders<'_>> {
        start
            .iter_days()
            .take(n_days)
            .take_while(|date| date.year() <= MAX_YEAR)
            .map(|date| self.day(date))
            .collect()
    }

    /// Returns every day of the given month in order.
    ///
    /// # Errors
    /// - `InvalidMonth` when `month` is outside `1..=12`.
    /// - `InvalidYear` when `year` is outside `1..=9999`.
    pub fn get_month(&self, year: i32, month: u32) -> StoreResult<Vec<DayReminders<'_>>> {
        if !(1..=12).contains(&month) {
            return Err(StoreError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(StoreError::InvalidYear(year));
        }
        let first =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(StoreError::InvalidYear(year))?;
        let days = days_in_month(year, month).ok_or(StoreError::InvalidMonth(month))?;
        Ok(self.get_range(first, days as usize))
    }

    /// Checks that `index` (1-based) addresses an existing reminder on `date`.
    ///
    /// Lets interactive callers reject a bad choice before asking for more
    /// input. Never mutates.
    pub fn check_index(&self, date: NaiveDate, index: usize) -> StoreResult<()> {
        let reminders = self
            .entries
            .get(&format_date(date))
            .filter(|reminders| !reminders.is_empty())
            .ok_or(StoreError::NoReminders(date))?;
        if index == 0 || index > reminders.len() {
            return Err(StoreError::IndexOutOfRange {
                date,
                index,
                len: reminders.len(),
            });
        }
        Ok(())
    }

    /// Replaces the reminder at 1-based `index`, keeping all other positions.
    ///
    /// # Errors
    /// - `NoReminders` when the date has no entry.
    /// - `IndexOutOfRange` when `index` is outside `1..=len`.
    /// - `EmptyText` when `new_text` is blank.
    pub fn edit(&mut self, date: NaiveDate, index: usize, new_text: &str) -> StoreResult<()> {
        self.check_index(date, index)?;
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(StoreError::EmptyText);
        }

        if let Some(slot) = self
            .entries
            .get_mut(&format_date(date))
            .and_then(|reminders| reminders.get_mut(index - 1))
        {
            *slot = new_text.to_string();
        }
        debug!("event=reminder_edit module=store status=ok index={index}");
        Ok(())
    }

    /// Removes the reminder at 1-based `index` and returns its text.
    ///
    /// The date key is deleted once its last reminder is removed.
    ///
    /// # Errors
    /// - `NoReminders` when the date has no entry.
    /// - `IndexOutOfRange` when `index` is outside `1..=len`.
    pub fn remove(&mut self, date: NaiveDate, index: usize) -> StoreResult<String> {
        self.check_index(date, index)?;
        let key = format_date(date);
        let Some(reminders) = self.entries.get_mut(&key) else {
            return Err(StoreError::NoReminders(date));
        };

        let removed = reminders.remove(index - 1);
        let remaining = reminders.len();
        if remaining == 0 {
            self.entries.remove(&key);
        }
        debug!(
            "event=reminder_remove module=store status=ok index={index} remaining={remaining}"
        );
        Ok(removed)
    }

    /// Case-insensitive substring search across every reminder.
    ///
    /// Dates are visited chronologically and indexes ascend within a date.
    /// An empty keyword matches nothing; trimming is left to the caller.
    pub fn search(&self, keyword: &str) -> Vec<SearchHit> {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let needle = needle.as_str();

        self.entries
            .iter()
            .flat_map(|(date, reminders)| {
                reminders
                    .iter()
                    .enumerate()
                    .filter(move |(_, text)| text.to_lowercase().contains(needle))
                    .map(move |(idx, text)| SearchHit {
                        date: date.clone(),
                        index: idx + 1,
                        text: text.clone(),
                    })
            })
            .collect()
    }

    fn day(&self, date: NaiveDate) -> DayReminders<'_> {
        DayReminders {
            date,
            reminders: self.get(date),
        }
    }
}

fn is_canonical_key(key: &str) -> bool {
    parse_date(key).map(format_date).is_ok_and(|canonical| canonical == key)
}

#[cfg(test)]
mod tests {
    use super::{ReminderStore, StoreError};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_trims_text_and_returns_position() {
        let mut store = ReminderStore::new();
        assert_eq!(store.add(date(2025, 6, 1), "  Pay rent  ").unwrap(), 1);
        assert_eq!(store.add(date(2025, 6, 1), "Call mom").unwrap(), 2);
        assert_eq!(store.get(date(2025, 6, 1)), ["Pay rent", "Call mom"]);
    }

    #[test]
    fn from_entries_drops_empty_lists() {
        let mut entries = BTreeMap::new();
        entries.insert("2025-01-01".to_string(), Vec::new());
        entries.insert("2025-01-02".to_string(), vec!["keep".to_string()]);

        let store = ReminderStore::from_entries(entries);
        assert_eq!(store.dates().collect::<Vec<_>>(), vec!["2025-01-02"]);
    }

    #[test]
    fn check_index_rejects_zero_and_missing_dates() {
        let mut store = ReminderStore::new();
        assert_eq!(
            store.check_index(date(2025, 1, 1), 1),
            Err(StoreError::NoReminders(date(2025, 1, 1)))
        );

        store.add(date(2025, 1, 1), "one").unwrap();
        assert!(matches!(
            store.check_index(date(2025, 1, 1), 0),
            Err(StoreError::IndexOutOfRange { index: 0, len: 1, .. })
        ));
        assert!(store.check_index(date(2025, 1, 1), 1).is_ok());
    }

    #[test]
    fn reminder_count_sums_all_dates() {
        let mut store = ReminderStore::new();
        store.add(date(2025, 1, 1), "a").unwrap();
        store.add(date(2025, 1, 1), "b").unwrap();
        store.add(date(2025, 1, 2), "c").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.reminder_count(), 3);
    }
}
