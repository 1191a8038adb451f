//! Spatial indexing for proximity queries.

pub mod octree;

pub use octree::{Octree, OctreeConfig};
