pub mod format;

pub use format::{format_currency, format_percent, format_signed_currency};
