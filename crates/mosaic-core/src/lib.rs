//! Core types, options, and error definitions for the Mosaic grid engine.
//!
//! This crate provides the foundational types shared by the layout crate:
//! - Widget geometry in grid-cell units
//! - Grid options and device classification
//! - Error types

pub mod errors;
pub mod options;
pub mod types;

pub use errors::*;
pub use options::*;
pub use types::*;
