//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

/// An axis-aligned box in 3D.
///
/// A box built with [`BoundingBox::empty`] has `min > max` on every axis and
/// is null until a point is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// The null box.
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// A box with the given corners.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all `points`.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.add(p);
        }
        bb
    }

    /// Whether no point was ever added.
    pub fn is_null(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Grow the box to contain `p`.
    pub fn add(&mut self, p: &Point3<f64>) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// Grow the box by `delta` on every side.
    pub fn inflate(&mut self, delta: f64) {
        self.min -= Vector3::repeat(delta);
        self.max += Vector3::repeat(delta);
    }

    /// Extent along each axis. Zero for a null box.
    pub fn size(&self) -> Vector3<f64> {
        if self.is_null() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Length of the diagonal. Zero for a null box.
    pub fn diagonal(&self) -> f64 {
        self.size().norm()
    }

    /// Center of the box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether `p` lies inside the box, boundary included.
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }
}
