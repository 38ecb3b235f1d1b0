//! Sphere primitive.

use nalgebra::Point3;

use super::bbox::BoundingBox;

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3<f64>,
    /// Radius of the sphere.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Point3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether `p` lies inside the sphere, boundary included.
    #[inline]
    pub fn is_inside(&self, p: &Point3<f64>) -> bool {
        (p - self.center).norm_squared() <= self.radius * self.radius
    }

    /// Signed distance from `p` to the sphere surface; negative inside.
    #[inline]
    pub fn dist(&self, p: &Point3<f64>) -> f64 {
        (p - self.center).norm() - self.radius
    }

    /// Bounding box of the sphere.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::new(self.center, self.center);
        bb.inflate(self.radius);
        bb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_and_dist() {
        let s = Sphere::new(Point3::new(1.0, 0.0, 0.0), 2.0);
        assert!(s.is_inside(&Point3::new(3.0, 0.0, 0.0)));
        assert!(!s.is_inside(&Point3::new(3.5, 0.0, 0.0)));
        assert_eq!(s.dist(&Point3::new(1.0, 0.0, 5.0)), 3.0);
        assert_eq!(s.dist(&Point3::new(1.0, 0.0, 0.0)), -2.0);
        assert_eq!(s.bounding_box().diagonal(), (48.0f64).sqrt());
    }
}
