//! Pytircy compiler version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time. Prefer this constant over repeating
//! `env!("CARGO_PKG_VERSION")` in multiple places.

/// The Pytircy compiler version string (for example, `1.0.1`).
pub const PYTIRCY_VERSION: &str = env!("CARGO_PKG_VERSION");
