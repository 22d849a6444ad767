//! Shared helpers used by the store crates and the bootstrap binary.
//!
//! - `utils::logging`: tracing subscriber setup
//! - `utils::fs`: backing-file existence checks
//! - `utils::time`: timestamp rendering for display
//! - `env`: data file provisioning at startup

pub mod env;
pub mod utils;
