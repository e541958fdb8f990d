//! Hashkit command line interface
//!
//! Layered configuration, output formatting, progress rendering and error
//! classification used by the `hashkit` binary.

pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod terminal;
