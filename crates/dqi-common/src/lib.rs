//! Shared utilities for the study quality snapshot crates.
//!
//! Cell values arrive as Polars `AnyValue`s from every tabular source; the
//! helpers here turn them into the strings and counts the normalizers need.

pub mod values;

pub use values::{any_to_count, any_to_string_non_empty, format_numeric};
