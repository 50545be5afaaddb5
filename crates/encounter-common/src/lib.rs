//! Shared helpers for the encounter crates.
//!
//! Mostly cell-level conversions for loosely typed Polars DataFrames.

pub mod polars;

pub use polars::{cell_text, column_text_values, format_numeric, parse_f64};
