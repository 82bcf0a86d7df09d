//! Prelude module for jalali_date crate.
//!
//! Re-exports the derive_more macros used across the crate.

pub use derive_more::Display;
