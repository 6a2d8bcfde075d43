//! Shared test utilities for the grid resampler workspace.
//!
//! This crate provides:
//! - Synthetic grid generators with predictable values
//! - Validity mask patterns
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod generators;

pub use generators::*;
