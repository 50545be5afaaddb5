pub mod columns;
pub mod encounter;
pub mod error;
pub mod questions;

pub use columns::{OUTPUT_COLUMNS, RawColumn};
pub use encounter::{ChangeFlag, EncounterRow, format_form_date};
pub use error::{ModelError, Result};
pub use questions::{QuestionField, QuestionMap, load_question_map};
