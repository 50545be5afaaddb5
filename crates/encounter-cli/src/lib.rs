//! CLI library components for the encounter processor.

pub mod logging;
pub mod preview;

pub use preview::{encounter_cells, preview_table, resolve_output_path};
