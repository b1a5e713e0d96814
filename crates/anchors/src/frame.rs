//! Oriented local frames: an origin with two orthonormal directions.

use anchors_math::{Point3, RigidTransform, Vec3};

use crate::{AnchorError, Result};

/// Default bound on `| |u| - 1 |`, `| |v| - 1 |` and `|u·v|`.
pub const DEFAULT_ORTHOGONALITY_TOLERANCE: f64 = 1e-6;

/// An anchor frame `(p, u, v)`.
///
/// `u` is the primary direction (the outward normal for face anchors) and
/// `v` a secondary direction orthogonal to it. Both are unit length; this
/// is checked on construction, so every `Frame` in circulation is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    p: Point3,
    u: Vec3,
    v: Vec3,
}

impl Frame {
    /// Build a frame, validating it against the default tolerance.
    pub fn new(p: Point3, u: Vec3, v: Vec3) -> Result<Self> {
        Self::with_tolerance(p, u, v, DEFAULT_ORTHOGONALITY_TOLERANCE)
    }

    /// Build a frame, validating unit length and orthogonality within `tol`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for non-finite components, `DegenerateInput` if `u`
    /// or `v` is not unit length or they are not orthogonal.
    pub fn with_tolerance(p: Point3, u: Vec3, v: Vec3, tol: f64) -> Result<Self> {
        if p.coords.iter().chain(u.iter()).chain(v.iter()).any(|c| !c.is_finite()) {
            return Err(AnchorError::InvalidInput(format!(
                "non-finite frame component: p={:?} u={:?} v={:?}",
                p.coords, u, v
            )));
        }
        for (name, d) in [("u", &u), ("v", &v)] {
            if (d.norm() - 1.0).abs() > tol {
                return Err(AnchorError::DegenerateInput(format!(
                    "{} is not a unit vector (|{}| = {})",
                    name,
                    name,
                    d.norm()
                )));
            }
        }
        let dot = u.dot(&v);
        if dot.abs() > tol {
            return Err(AnchorError::DegenerateInput(format!(
                "u and v are not orthogonal (u·v = {})",
                dot
            )));
        }
        Ok(Self { p, u, v })
    }

    /// Origin.
    pub fn p(&self) -> Point3 {
        self.p
    }

    /// Primary direction.
    pub fn u(&self) -> Vec3 {
        self.u
    }

    /// Secondary direction.
    pub fn v(&self) -> Vec3 {
        self.v
    }

    /// Third axis `u × v`, completing a right-handed basis.
    pub fn w(&self) -> Vec3 {
        self.u.cross(&self.v)
    }

    /// The three points `p`, `p + u`, `p + v`.
    pub fn landmarks(&self) -> [Point3; 3] {
        [self.p, self.p + self.u, self.p + self.v]
    }

    /// The frame moved by a rigid motion.
    ///
    /// Rigid motions preserve length and orthogonality, so no revalidation
    /// is needed.
    pub fn transformed(&self, t: &RigidTransform) -> Self {
        Self {
            p: t.apply_point(&self.p),
            u: t.apply_vec(&self.u),
            v: t.apply_vec(&self.v),
        }
    }

    /// Whether two frames agree component-wise within `tol`.
    pub fn approx_eq(&self, other: &Frame, tol: f64) -> bool {
        (self.p - other.p).norm() <= tol
            && (self.u - other.u).norm() <= tol
            && (self.v - other.v).norm() <= tol
    }
}
