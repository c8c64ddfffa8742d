//! # Thicket Common
//!
//! Common types shared across the Thicket subsystems:
//! - Geometry primitives (vectors, axis-aligned rectangles)
//! - ID types (`EntityId`)
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod geometry;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::geometry::*;
    pub use crate::ids::*;
}

pub use prelude::*;
