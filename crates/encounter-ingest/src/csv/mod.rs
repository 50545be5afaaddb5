//! CSV reading utilities.

mod reader;

pub use reader::{read_csv_bytes, validate_dataframe_shape, validate_encoding};
