#![warn(missing_docs)]

//! Math types for anchor frames.
//!
//! nalgebra aliases shared by the anchor crates, rigid transforms with an
//! axis-angle decomposition, a least-squares rigid fit, a linear tolerance
//! and perpendicular-vector construction.

use nalgebra::{Unit, Vector3};

mod error;
mod fit;
mod perpendicular;
mod rigid;

pub use error::{MathError, Result};
pub use fit::fit_rigid;
pub use perpendicular::{perpendicular, DivisorRule, Perpendicular};
pub use rigid::{AxisAngle, RigidTransform};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D parameter space.
pub type Point2 = nalgebra::Point2<f64>;

/// Distance below which two positions count as the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
}

impl Tolerance {
    /// 1e-6 mm.
    pub const DEFAULT: Self = Self { linear: 1e-6 };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
