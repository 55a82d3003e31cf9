//! Formatting entities and formatters
//!
//! A layout is a [`TextFormatter`]: an ordered list of [`Value`]s, some of
//! them literals and some of them [`FormattingEntity`]s evaluated against the
//! entry being written.

pub mod entities;
pub mod entity;
pub mod file_name;
pub mod text_formatter;
pub mod value;

pub use entities::{CallingSite, EntryJson, EvalCounter, EventTime, FormattedTime, LevelName, Message};
pub use entity::{evaluate, EvalContext, FormattingEntity};
pub use file_name::FileNameFormatter;
pub use text_formatter::{TextFormatter, TextFormatterBuilder};
pub use value::{Value, DEFAULT_TIME_FORMAT};
