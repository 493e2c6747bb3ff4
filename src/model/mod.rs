//! Core data model types: recognized header fields, raw header maps, and
//! normalized mail records.

pub mod header;
pub mod mail;
