//! `enronscan` — Enron-style mail dump ingestion and reporting.
//!
//! This crate provides the core library for extracting header metadata from
//! plain-text mail files, normalizing it into records, persisting them into
//! SQLite, and running the standard analytical reports.

pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod parser;
pub mod store;
