//! Core value types for cosmology computations.
//!
//! This module defines the parameter set every engine is built from and the
//! elementwise abstraction that lets one function serve both scalar and
//! batched inputs.

pub mod elementwise;
pub mod params;

pub use elementwise::Elementwise;
pub use params::{CosmologyParams, TableSpec};
