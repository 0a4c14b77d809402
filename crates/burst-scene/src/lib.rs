//! Burst Scene - node hierarchy with stable IDs
//!
//! This crate wraps hecs with stable node identifiers, parent/child links
//! and world-space transform queries. Nodes carry a local `Transform`, a
//! visibility flag, and optionally a `Mesh`.

mod graph;
mod mesh;
mod node;

pub use graph::SceneGraph;
pub use mesh::{Geometry, Material, Mesh};
pub use node::NodeInfo;
