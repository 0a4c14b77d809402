//! Burst Core - Foundational types for the Burst effects library
//!
//! This crate provides the types that all other Burst crates depend on:
//! - `NodeId` - Stable scene node identifiers
//! - `Transform`, `Vec3` - Spatial types
//! - `Color` - RGB colors with hex parsing
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{BurstError, Result};
pub use id::NodeId;
pub use types::{Color, Transform, Vec3};
