//! Core utilities for variantctl
//!
//! This crate provides shared functionality used by the resolver and the CLI:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based tool configuration (`.variantctl.toml`)
//! - **Validation**: Fluent field validators for build descriptors
//!
//! # Example
//!
//! ```rust,no_run
//! use variantctl_core::config::Config;
//!
//! let config = Config::load(None).expect("config should load");
//! println!("descriptor: {}", config.schema.general.descriptor);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};
