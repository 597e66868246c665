pub mod client;
pub mod models;

pub use client::SlackNotifier;
pub use models::SlackError;
