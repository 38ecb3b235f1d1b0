//! Geometric primitives and spatial indexing.

mod bbox;
mod grid;
mod sphere;

pub use bbox::BoundingBox;
pub use grid::{best_grid_size, CellPos, GridEntry, StaticGrid3};
pub use sphere::Sphere;
