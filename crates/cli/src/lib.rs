//! `agrolytics` driver: reads record files, runs the analytics core, prints JSON.
//!
//! Stands in for the request handlers that normally call the core in-process.

pub mod cli;
pub mod commands;
pub mod input;

pub use cli::{Cli, Command};
pub use commands::run;
