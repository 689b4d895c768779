//! Core domain logic for remindcal.
//! This crate is the single source of truth for reminder store invariants.

pub mod logging;
pub mod model;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date::{
    days_in_month, format_date, month_name, parse_date, parse_year_month, DateParseError,
    MonthParseError,
};
pub use store::persist::{
    load_store, save_store, LoadStatus, LoadedStore, PersistError, PersistResult,
};
pub use store::{DayReminders, ReminderStore, SearchHit, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
