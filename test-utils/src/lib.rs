//! Shared test utilities for input-toolbox.
//!
//! This crate provides:
//! - Proptest generators for keys, SQL tokens, datetimes and patterns
//! - Configuration fixtures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;
