mod field;
pub mod keymap;
mod state;
mod types;

pub use types::{App, FieldId, Outcome, Selection, SelectorDefaults, SelectorEvent};
