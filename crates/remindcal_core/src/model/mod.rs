//! Calendar value types and input validation.
//!
//! # Responsibility
//! - Turn raw user input into validated calendar values.
//! - Keep the canonical `YYYY-MM-DD` key format in one place.
//!
//! # Invariants
//! - Every date accepted here is a real Gregorian date.
//! - Validation never performs I/O; callers decide whether to re-prompt.

pub mod date;
