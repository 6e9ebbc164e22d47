//! Core types and traits for the portfolio tracker.
//!
//! This crate provides the foundational building blocks including:
//! - Portfolio, credential, and snapshot types
//! - The update-schedule configuration
//! - Locale-aware numeric and clock-time parsers
//! - Core traits for summary sources and user notification

pub mod error;
pub mod parsers;
pub mod traits;
pub mod types;

pub use error::{ApiError, PollError};
pub use traits::*;
pub use types::*;
