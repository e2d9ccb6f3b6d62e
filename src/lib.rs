//! Core library for the `csvreq` CLI.
//!
//! The binary reads a CSV file, renders one HTTP request per data row from
//! URL, header and body templates, and sends them through a fixed pool of
//! workers under a shared rate limit. The modules here are the building
//! blocks it is assembled from; the command-line application is the primary
//! interface and library APIs may change with it.
pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod input;
pub mod report;
pub mod request;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
