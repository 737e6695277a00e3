//! Care event to notification mapping and presentation helpers.

pub mod formatter;
pub mod time_ago;

pub use formatter::NotificationFormatter;
