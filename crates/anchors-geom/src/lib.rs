#![warn(missing_docs)]

//! Geometry queries for anchor derivation.
//!
//! Surfaces and curves are trait objects so a [`Face`] or [`Edge`] can carry
//! any analytic kind. Only the kinds anchors attach to are modelled: planes
//! and cylinders, lines, circles and helices. A [`Shape`] resolves host-style
//! sub-element names such as `Face3` or `Edge1`.

use std::any::Any;
use std::f64::consts::PI;

use anchors_math::{perpendicular, Dir3, Point2, Point3, RigidTransform, Vec3};

mod element;
mod shape;

pub use element::{Edge, ElementKind, Face, FaceLike, SubElement, Vertex, Wire};
pub use shape::Shape;

/// In-plane axes `(x, y)` for a unit normal `n`, with `x × y = n`.
///
/// `x` is the unit perpendicular that anchors with the default divisor
/// rule use for their `v` vector.
fn in_plane_axes(n: &Dir3) -> anchors_math::Result<(Dir3, Dir3)> {
    let x = Dir3::new_unchecked(perpendicular(n.as_slice())?);
    let y = Dir3::new_normalize(n.cross(x.as_ref()));
    Ok((x, y))
}

// =============================================================================
// Surfaces
// =============================================================================

/// Surface kinds, for logging and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Infinite plane.
    Plane,
    /// Cylinder of infinite extent along its axis.
    Cylinder,
}

/// A parametric surface in 3D space.
pub trait Surface: Send + Sync + std::fmt::Debug {
    /// Point at parameter `(u, v)`.
    fn evaluate(&self, uv: Point2) -> Point3;

    /// Unit normal at parameter `(u, v)`.
    fn normal(&self, uv: Point2) -> Dir3;

    /// Which kind of surface this is.
    fn kind(&self) -> SurfaceKind;

    /// Clone into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Surface>;

    /// The same surface after the rigid motion `t`.
    fn moved(&self, t: &RigidTransform) -> Box<dyn Surface>;
}

impl Clone for Box<dyn Surface> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// `P(u, v) = origin + u·x_dir + v·y_dir`, normal `x_dir × y_dir`.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Point at `(0, 0)`.
    pub origin: Point3,
    /// Unit u direction.
    pub x_dir: Dir3,
    /// Unit v direction.
    pub y_dir: Dir3,
    /// Unit normal.
    pub normal_dir: Dir3,
}

impl Plane {
    /// Plane through `origin` spanned by two orthogonal, not necessarily
    /// unit, directions.
    pub fn new(origin: Point3, x_dir: Vec3, y_dir: Vec3) -> Self {
        Self {
            origin,
            x_dir: Dir3::new_normalize(x_dir),
            y_dir: Dir3::new_normalize(y_dir),
            normal_dir: Dir3::new_normalize(x_dir.cross(&y_dir)),
        }
    }

    /// Plane through `origin` with the given normal.
    ///
    /// # Errors
    ///
    /// `DegenerateInput` if `normal` is zero or has no representable
    /// perpendicular.
    pub fn from_normal(origin: Point3, normal: Vec3) -> anchors_math::Result<Self> {
        let scale = normal.amax();
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(anchors_math::MathError::DegenerateInput(format!(
                "plane normal {:?} has no direction",
                normal
            )));
        }
        let n = Dir3::new_normalize(normal / scale);
        let (x_dir, y_dir) = in_plane_axes(&n)?;
        Ok(Self {
            origin,
            x_dir,
            y_dir,
            normal_dir: n,
        })
    }

    /// XY plane at the origin.
    pub fn xy() -> Self {
        Self::new(Point3::origin(), Vec3::x(), Vec3::y())
    }
}

impl Surface for Plane {
    fn evaluate(&self, uv: Point2) -> Point3 {
        self.origin + uv.x * self.x_dir.as_ref() + uv.y * self.y_dir.as_ref()
    }

    fn normal(&self, _uv: Point2) -> Dir3 {
        self.normal_dir
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Plane
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn moved(&self, t: &RigidTransform) -> Box<dyn Surface> {
        Box::new(Plane {
            origin: t.apply_point(&self.origin),
            x_dir: t.apply_dir(&self.x_dir),
            y_dir: t.apply_dir(&self.y_dir),
            normal_dir: t.apply_dir(&self.normal_dir),
        })
    }
}

/// `P(u, v) = center + radius·(cos u·ref_dir + sin u·(axis × ref_dir)) + v·axis`.
///
/// `u` is the angle in `[0, 2π)`, `v` the height along the axis.
#[derive(Debug, Clone)]
pub struct CylinderSurface {
    /// Axis point at `v = 0`.
    pub center: Point3,
    /// Unit axis direction.
    pub axis: Dir3,
    /// Unit direction of `u = 0`, perpendicular to the axis.
    pub ref_dir: Dir3,
    /// Radius.
    pub radius: f64,
}

impl CylinderSurface {
    /// Cylinder about +Z through the origin.
    pub fn new(radius: f64) -> Self {
        Self {
            center: Point3::origin(),
            axis: Vec3::z_axis(),
            ref_dir: Vec3::x_axis(),
            radius,
        }
    }

    fn radial(&self, u: f64) -> Vec3 {
        let (sin_u, cos_u) = u.sin_cos();
        cos_u * self.ref_dir.as_ref() + sin_u * self.axis.cross(self.ref_dir.as_ref())
    }
}

impl Surface for CylinderSurface {
    fn evaluate(&self, uv: Point2) -> Point3 {
        self.center + self.radius * self.radial(uv.x) + uv.y * self.axis.as_ref()
    }

    fn normal(&self, uv: Point2) -> Dir3 {
        Dir3::new_normalize(self.radial(uv.x))
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Cylinder
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn moved(&self, t: &RigidTransform) -> Box<dyn Surface> {
        Box::new(CylinderSurface {
            center: t.apply_point(&self.center),
            axis: t.apply_dir(&self.axis),
            ref_dir: t.apply_dir(&self.ref_dir),
            radius: self.radius,
        })
    }
}

// =============================================================================
// Curves
// =============================================================================

/// Curve kinds. Frame derivation dispatches on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight line.
    Line,
    /// Circle.
    Circle,
    /// Circular helix.
    Helix,
}

/// A parametric curve in 3D space.
pub trait Curve3d: Send + Sync + std::fmt::Debug {
    /// Point at parameter `t`.
    fn evaluate(&self, t: f64) -> Point3;

    /// Natural parameter interval `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Which kind of curve this is.
    fn kind(&self) -> CurveKind;

    /// Clone into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Curve3d>;

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// The same curve after the rigid motion `t`.
    fn moved(&self, t: &RigidTransform) -> Box<dyn Curve3d>;
}

impl Clone for Box<dyn Curve3d> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// `P(t) = origin + t·direction`; the natural domain `[0, 1]` is a segment.
#[derive(Debug, Clone)]
pub struct Line3d {
    /// Point at `t = 0`.
    pub origin: Point3,
    /// Displacement from `t = 0` to `t = 1`.
    pub direction: Vec3,
}

impl Line3d {
    /// Segment from `start` (`t = 0`) to `end` (`t = 1`).
    pub fn from_points(start: Point3, end: Point3) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }
}

impl Curve3d for Line3d {
    fn evaluate(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Line
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn moved(&self, t: &RigidTransform) -> Box<dyn Curve3d> {
        Box::new(Line3d {
            origin: t.apply_point(&self.origin),
            direction: t.apply_vec(&self.direction),
        })
    }
}

/// `P(t) = center + radius·(cos t·x_dir + sin t·y_dir)`, `t ∈ [0, 2π)`.
#[derive(Debug, Clone)]
pub struct Circle3d {
    /// Center.
    pub center: Point3,
    /// Radius.
    pub radius: f64,
    /// Unit direction of `t = 0`.
    pub x_dir: Dir3,
    /// Unit direction of `t = π/2`.
    pub y_dir: Dir3,
    /// `x_dir × y_dir`.
    pub normal: Dir3,
}

impl Circle3d {
    /// Circle in the plane `z = center.z`, counter-clockwise about +Z.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius,
            x_dir: Vec3::x_axis(),
            y_dir: Vec3::y_axis(),
            normal: Vec3::z_axis(),
        }
    }

    /// Circle counter-clockwise about `normal`.
    ///
    /// # Errors
    ///
    /// `DegenerateInput` if `normal` is zero or has no representable
    /// perpendicular.
    pub fn with_normal(center: Point3, radius: f64, normal: Vec3) -> anchors_math::Result<Self> {
        let plane = Plane::from_normal(center, normal)?;
        Ok(Self {
            center,
            radius,
            x_dir: plane.x_dir,
            y_dir: plane.y_dir,
            normal: plane.normal_dir,
        })
    }
}

impl Curve3d for Circle3d {
    fn evaluate(&self, t: f64) -> Point3 {
        let (sin_t, cos_t) = t.sin_cos();
        self.center + self.radius * (cos_t * self.x_dir.as_ref() + sin_t * self.y_dir.as_ref())
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 2.0 * PI)
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Circle
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn moved(&self, t: &RigidTransform) -> Box<dyn Curve3d> {
        Box::new(Circle3d {
            center: t.apply_point(&self.center),
            radius: self.radius,
            x_dir: t.apply_dir(&self.x_dir),
            y_dir: t.apply_dir(&self.y_dir),
            normal: t.apply_dir(&self.normal),
        })
    }
}

/// A circular helix over `t ∈ [0, 1]`:
///
/// ```text
/// P(t) = center + radius·(cos 2πnt·ref_dir + sin 2πnt·(axis × ref_dir)) + height·t·axis
/// ```
///
/// with `n` the number of turns.
#[derive(Debug, Clone)]
pub struct Helix {
    /// Axis point at `t = 0`.
    pub center: Point3,
    /// Unit axis direction.
    pub axis: Dir3,
    /// Unit direction of the start point from the axis.
    pub ref_dir: Dir3,
    /// Radius.
    pub radius: f64,
    /// Rise over the whole curve.
    pub height: f64,
    /// Number of turns.
    pub turns: f64,
}

impl Helix {
    /// Helix about +Z starting at `(radius, 0, 0)`.
    pub fn new(radius: f64, height: f64, turns: f64) -> Self {
        Self {
            center: Point3::origin(),
            axis: Vec3::z_axis(),
            ref_dir: Vec3::x_axis(),
            radius,
            height,
            turns,
        }
    }
}

impl Curve3d for Helix {
    fn evaluate(&self, t: f64) -> Point3 {
        let (sin_a, cos_a) = (2.0 * PI * self.turns * t).sin_cos();
        let radial = cos_a * self.ref_dir.as_ref() + sin_a * self.axis.cross(self.ref_dir.as_ref());
        self.center + self.radius * radial + self.height * t * self.axis.as_ref()
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Helix
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn moved(&self, t: &RigidTransform) -> Box<dyn Curve3d> {
        Box::new(Helix {
            center: t.apply_point(&self.center),
            axis: t.apply_dir(&self.axis),
            ref_dir: t.apply_dir(&self.ref_dir),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchors_math::{AxisAngle, MathError};

    fn quarter_turn_about_x() -> RigidTransform {
        RigidTransform::from_axis_angle(
            &AxisAngle {
                axis: Vec3::x_axis(),
                angle: PI / 2.0,
            },
            Vec3::zeros(),
        )
    }

    #[test]
    fn test_plane_evaluate() {
        let pt = Plane::xy().evaluate(Point2::new(3.0, 4.0));
        assert!((pt - Point3::new(3.0, 4.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_plane_from_normal_matches_anchor_axis() {
        let p = Plane::from_normal(Point3::origin(), Vec3::new(0.0, 0.0, 3.0)).unwrap();
        let n = p.x_dir.cross(p.y_dir.as_ref());
        assert!((n - p.normal_dir.into_inner()).norm() < 1e-12);
        assert!((p.normal_dir.z - 1.0).abs() < 1e-12);
        let v = perpendicular(&[0.0, 0.0, 3.0]).unwrap();
        assert!((p.x_dir.into_inner() - v).norm() < 1e-15);
    }

    #[test]
    fn test_plane_from_zero_normal_fails() {
        assert!(matches!(
            Plane::from_normal(Point3::origin(), Vec3::zeros()),
            Err(MathError::DegenerateInput(_))
        ));
        assert!(Circle3d::with_normal(Point3::origin(), 1.0, Vec3::zeros()).is_err());
    }

    #[test]
    fn test_cylinder_evaluate() {
        let c = CylinderSurface::new(5.0);
        let pt = c.evaluate(Point2::new(0.0, 0.0));
        assert!((pt - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-12);
        let pt = c.evaluate(Point2::new(PI / 2.0, 3.0));
        assert!((pt - Point3::new(0.0, 5.0, 3.0)).norm() < 1e-12);
        assert_eq!(c.kind(), SurfaceKind::Cylinder);
    }

    #[test]
    fn test_circle3d() {
        let circle = Circle3d::new(Point3::origin(), 5.0);
        assert!((circle.evaluate(0.0) - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((circle.evaluate(PI / 2.0) - Point3::new(0.0, 5.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_circle_with_normal_frame() {
        let c = Circle3d::with_normal(Point3::origin(), 2.0, Vec3::new(1.0, 1.0, 0.0)).unwrap();
        let n = c.x_dir.cross(c.y_dir.as_ref());
        assert!((n - c.normal.into_inner()).norm() < 1e-12);
        assert!(c.x_dir.dot(c.normal.as_ref()).abs() < 1e-15);
    }

    #[test]
    fn test_moved_circle_keeps_radius() {
        let c = Circle3d::new(Point3::origin(), 2.0);
        let moved = c.moved(&quarter_turn_about_x());
        let moved = moved.as_any().downcast_ref::<Circle3d>().unwrap();
        // +Z rotated a quarter turn about X is -Y
        assert!((moved.normal.y + 1.0).abs() < 1e-12);
        assert!((moved.radius - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_helix_ends() {
        let h = Helix::new(3.0, 10.0, 2.0);
        assert!((h.evaluate(0.0) - Point3::new(3.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((h.evaluate(1.0) - Point3::new(3.0, 0.0, 10.0)).norm() < 1e-10);
        assert_eq!(h.kind(), CurveKind::Helix);

        let moved = h.moved(&RigidTransform::from_translation(Vec3::new(0.0, 0.0, -10.0)));
        assert!((moved.evaluate(1.0) - Point3::new(3.0, 0.0, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_plane_moved() {
        let p = Plane::xy().moved(&RigidTransform::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        let pt = p.evaluate(Point2::new(1.0, 2.0));
        assert!((pt - Point3::new(1.0, 2.0, 5.0)).norm() < 1e-12);
        assert_eq!(p.kind(), SurfaceKind::Plane);
    }

    #[test]
    fn test_cylinder_moved() {
        let c = CylinderSurface::new(5.0).moved(&quarter_turn_about_x());
        // the axis +Z turns into -Y
        let pt = c.evaluate(Point2::new(0.0, 2.0));
        assert!((pt - Point3::new(5.0, -2.0, 0.0)).norm() < 1e-10);
    }
}
