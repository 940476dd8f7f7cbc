//! Common utilities module
//!
//! This module contains shared utilities used across the relief pipeline.

pub mod error;

pub use error::{ReliefError, Result};
