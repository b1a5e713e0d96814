//! Rigid transforms (rotation + translation) and their axis-angle form.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Rotation3};

use crate::{Dir3, Point3, Vec3};

/// Below this `|skew(R)|` (= 2 sin θ) the axis is recovered from the
/// symmetric part of `R` instead of the skew part.
const SKEW_EPS: f64 = 1e-6;

/// A rotation as a unit axis and an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    /// Rotation axis. Arbitrary (+Z) when `angle` is zero.
    pub axis: Dir3,
    /// Rotation angle in `[0, π]`.
    pub angle: f64,
}

impl AxisAngle {
    /// The zero rotation, reported about +Z.
    pub fn identity() -> Self {
        Self {
            axis: Vec3::z_axis(),
            angle: 0.0,
        }
    }

    /// Rotation matrix for this axis and angle.
    pub fn to_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&self.axis, self.angle)
    }
}

/// A proper rigid motion: `x ↦ R·x + t` with `R` orthonormal, `det R = +1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// Rotation part.
    pub rotation: Rotation3<f64>,
    /// Translation part (the image of the origin).
    pub translation: Vec3,
}

impl RigidTransform {
    /// The identity motion.
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
            translation: Vec3::zeros(),
        }
    }

    /// Build from a rotation and a translation.
    pub fn new(rotation: Rotation3<f64>, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Build from an axis-angle rotation and a translation.
    pub fn from_axis_angle(rotation: &AxisAngle, translation: Vec3) -> Self {
        Self::new(rotation.to_rotation(), translation)
    }

    /// A pure translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(Rotation3::identity(), translation)
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.rotation * p + self.translation
    }

    /// Transform a direction vector (rotation only).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.rotation * v
    }

    /// Rotate a unit direction.
    pub fn apply_dir(&self, d: &Dir3) -> Dir3 {
        self.rotation * *d
    }

    /// The inverse motion `x ↦ Rᵀ·(x - t)`.
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            rotation,
            translation: -(rotation * self.translation),
        }
    }

    /// Compose: apply `other` first, then `self`.
    pub fn then(&self, other: &RigidTransform) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// Axis-angle decomposition of the rotation part.
    ///
    /// The angle is `atan2(|skew|/2, (tr R - 1)/2)`, which stays accurate
    /// near both 0 and π. Near π the skew part vanishes, so the axis is
    /// taken from the dominant column of `R + I = 2·a·aᵀ (θ = π)`, with its
    /// sign matched to whatever skew part remains.
    pub fn axis_angle(&self) -> AxisAngle {
        let m = self.rotation.matrix();
        let skew = Vec3::new(
            m[(2, 1)] - m[(1, 2)],
            m[(0, 2)] - m[(2, 0)],
            m[(1, 0)] - m[(0, 1)],
        );
        let sin2 = skew.norm();
        let angle = sin2.atan2(m.trace() - 1.0);

        if sin2 > SKEW_EPS {
            return AxisAngle {
                axis: Dir3::new_normalize(skew),
                angle,
            };
        }
        if angle < PI / 2.0 {
            return AxisAngle {
                axis: Vec3::z_axis(),
                angle,
            };
        }

        let sym = m + Matrix3::identity();
        let mut best = sym.column(0).into_owned();
        for j in 1..3 {
            let col = sym.column(j).into_owned();
            if col.norm_squared() > best.norm_squared() {
                best = col;
            }
        }
        if best.dot(&skew) < 0.0 {
            best = -best;
        }
        AxisAngle {
            axis: Dir3::new_normalize(best),
            angle,
        }
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn axis(x: f64, y: f64, z: f64) -> Dir3 {
        Dir3::new_normalize(Vec3::new(x, y, z))
    }

    #[test]
    fn test_identity_decomposes_to_zero_angle() {
        let aa = RigidTransform::identity().axis_angle();
        assert_eq!(aa.angle, 0.0);
        assert_eq!(aa.axis, Vec3::z_axis());
    }

    #[test]
    fn test_axis_angle_round_trip() {
        for (a, angle) in [
            (axis(1.0, 0.0, 0.0), 0.3),
            (axis(0.0, 1.0, 1.0), FRAC_PI_2),
            (axis(-1.0, 2.0, 0.5), 2.5),
            (axis(0.2, -0.4, 1.0), PI - 1e-3),
        ] {
            let t = RigidTransform::from_axis_angle(&AxisAngle { axis: a, angle }, Vec3::zeros());
            let aa = t.axis_angle();
            assert!((aa.angle - angle).abs() < 1e-9, "{} vs {}", aa.angle, angle);
            assert_relative_eq!(aa.axis.into_inner(), a.into_inner(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_half_turn_axis_recovered() {
        let a = axis(1.0, 1.0, 0.0);
        let t = RigidTransform::from_axis_angle(&AxisAngle { axis: a, angle: PI }, Vec3::zeros());
        let aa = t.axis_angle();
        assert!((aa.angle - PI).abs() < 1e-12);
        // at exactly π both signs describe the same rotation
        assert!((aa.axis.dot(a.as_ref()).abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_undoes_motion() {
        let t = RigidTransform::from_axis_angle(
            &AxisAngle {
                axis: axis(0.3, 0.1, -1.0),
                angle: 1.1,
            },
            Vec3::new(4.0, -2.0, 9.0),
        );
        let p = Point3::new(1.0, 2.0, 3.0);
        let back = t.inverse().apply_point(&t.apply_point(&p));
        assert_relative_eq!(back, p, epsilon = 1e-12);
        let id = t.then(&t.inverse());
        assert!(id.axis_angle().angle < 1e-12);
        assert!(id.translation.norm() < 1e-12);
    }

    #[test]
    fn test_translation_leaves_directions_alone() {
        let t = RigidTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(2.0, 2.0, 3.0), epsilon = 1e-12);
        let d = axis(0.0, 1.0, 1.0);
        assert_eq!(t.apply_dir(&d), d);
        assert_eq!(t.axis_angle().angle, 0.0);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let t = RigidTransform::from_axis_angle(
            &AxisAngle {
                axis: axis(0.0, 0.0, 1.0),
                angle: FRAC_PI_2,
            },
            Vec3::new(1.0, 2.0, 3.0),
        );
        let p = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 3.0, 3.0), epsilon = 1e-12);
        let d = t.apply_dir(&Vec3::x_axis());
        assert_relative_eq!(d.into_inner(), Vec3::y(), epsilon = 1e-12);
    }
}
