//! Presentation helpers: sizes, timestamps, localized text, plain-text output.

mod formatter;
mod i18n;
mod size;
mod time;

pub use formatter::{format_backups, format_listing, format_tree, FormatOptions, SummarizedEntry};
pub use i18n::{Locale, Message};
pub use size::format_bytes;
pub use time::{format_date, format_modified, format_relative};
