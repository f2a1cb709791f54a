//! CLI utilities for variantctl
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Status messages and error reports

#![warn(missing_docs)]

pub mod output;
