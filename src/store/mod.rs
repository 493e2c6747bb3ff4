//! SQLite persistence: the two Enron tables and the fixed analytical reports.

pub mod db;
pub mod reports;

pub use db::MailStore;
