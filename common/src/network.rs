//! Address helpers for the scanner.

pub mod subnet;
