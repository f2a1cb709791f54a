//! Configuration loading and schema definitions
//!
//! Tool-level settings for variantctl (`.variantctl.toml`): where the
//! build descriptor lives, resolution policy, and logging.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
