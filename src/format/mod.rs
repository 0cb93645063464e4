//! Formatting helpers for strings, lists and dates.
//!
//! - [`format_indexed`], [`starts_with_at`], [`ends_with_at`] and their
//!   case-insensitive variants
//! - [`remove_empty_entries`], [`push_range`], [`copy_to`]
//! - [`DateFormat`] (`to_string_format`, `is_leap_year`), [`add_days`]

mod date;
mod list;
mod string;

pub use date::{DateFormat, add_days, is_leap_year};
pub use list::{copy_to, push_range, remove_empty_entries};
pub use string::{
    ends_with_at, ends_with_ignore_case, format_indexed, starts_with_at,
    starts_with_ignore_case,
};
