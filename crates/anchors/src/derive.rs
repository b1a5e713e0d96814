//! Deriving anchor frames from shape sub-elements.
//!
//! A face yields the point and outward normal at the midpoint of its
//! parameter range; the secondary direction is a perpendicular of the
//! normal. A full circular edge is treated as the planar disc it bounds.
//! Every other sub-element is rejected: there is no default frame.

use anchors_geom::{CurveKind, Edge, FaceLike, Shape, SubElement};
use anchors_math::Point2;

use crate::{AnchorError, AnchorSettings, Frame, Result};

/// Frame at the parametric midpoint of a face.
///
/// `p` is the point there, `u` the normal and `v` the deterministic unit
/// perpendicular of `u` under the configured divisor rule.
pub fn frame_from_face(face: &dyn FaceLike, settings: &AnchorSettings) -> Result<Frame> {
    let ((u0, u1), (v0, v1)) = face.parameter_range();
    let mid = Point2::new((u0 + u1) / 2.0, (v0 + v1) / 2.0);
    let p = face.value_at(mid);
    let u = face.normal_at(mid).into_inner();
    let v = settings.perpendicular().of(u.as_slice())?;
    Frame::with_tolerance(p, u, v, settings.orthogonality_tolerance)
}

/// Frame of the disc bounded by a full circular edge.
///
/// `p` is the circle centre and `u` the circle normal.
pub fn frame_from_circular_edge(edge: &Edge, settings: &AnchorSettings) -> Result<Frame> {
    match edge.kind() {
        CurveKind::Circle => {}
        CurveKind::Line => return Err(AnchorError::NotSupported("a linear edge".into())),
        CurveKind::Helix => return Err(AnchorError::NotSupported("a helical edge".into())),
    }
    let face = edge
        .as_virtual_face(&settings.tolerance())
        .ok_or_else(|| AnchorError::NotSupported("an open circular arc".into()))?;
    frame_from_face(&face, settings)
}

/// Frame of any sub-element, dispatching on its kind.
pub fn derive_frame(element: SubElement<'_>, settings: &AnchorSettings) -> Result<Frame> {
    tracing::debug!("deriving anchor frame from {}", element.kind());
    match element {
        SubElement::Face(face) => {
            tracing::debug!("face surface kind: {:?}", face.surface.kind());
            frame_from_face(face, settings)
        }
        SubElement::Edge(edge) => {
            tracing::debug!("edge curve kind: {:?}", edge.kind());
            frame_from_circular_edge(edge, settings)
        }
        SubElement::Wire(_) => Err(AnchorError::NotSupported("a wire".into())),
        SubElement::Vertex(_) => Err(AnchorError::NotSupported("a vertex".into())),
    }
}

/// Frame of the sub-element of `shape` called `element` (`Face3`, `Edge1`...).
pub fn derive_named(shape: &Shape, element: &str, settings: &AnchorSettings) -> Result<Frame> {
    let sub = shape
        .element(element)
        .ok_or_else(|| AnchorError::UnknownElement {
            shape: shape.name.clone(),
            element: element.to_string(),
        })?;
    derive_frame(sub, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchors_geom::{Circle3d, Face, Helix, Line3d, Plane};
    use anchors_math::{DivisorRule, Point3, Vec3};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    fn settings() -> AnchorSettings {
        AnchorSettings::default()
    }

    #[test]
    fn test_cube_top_face() {
        let cube = Shape::cube("Box", 10.0, 10.0, 10.0);
        let f = derive_named(&cube, "Face2", &settings()).unwrap();
        assert_relative_eq!(f.p(), Point3::new(5.0, 5.0, 10.0), epsilon = 1e-12);
        assert_relative_eq!(f.u(), Vec3::z(), epsilon = 1e-12);
        // perpendicular of +Z with the z divisor
        assert_relative_eq!(f.v(), Vec3::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_face_derivation_is_idempotent() {
        let cube = Shape::cube("Box", 3.0, 4.0, 5.0);
        for i in 1..=6 {
            let name = format!("Face{}", i);
            let a = derive_named(&cube, &name, &settings()).unwrap();
            let b = derive_named(&cube, &name, &settings()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_divisor_rule_changes_v_only() {
        let face = Face::new(
            Box::new(Plane::from_normal(Point3::origin(), Vec3::new(10.0, 0.0, 1e-3)).unwrap()),
            (-1.0, 1.0),
            (-1.0, 1.0),
        );
        let last = frame_from_face(&face, &settings()).unwrap();
        let largest = frame_from_face(
            &face,
            &AnchorSettings {
                divisor_rule: DivisorRule::LargestMagnitude,
                ..settings()
            },
        )
        .unwrap();
        assert_relative_eq!(last.p(), largest.p(), epsilon = 1e-12);
        assert_relative_eq!(last.u(), largest.u(), epsilon = 1e-12);
        assert!((last.v() - largest.v()).norm() > 0.1);
    }

    #[test]
    fn test_cylinder_lateral_face() {
        let cyl = Shape::cylinder("Cylinder", 2.0, 6.0);
        let f = derive_named(&cyl, "Face1", &settings()).unwrap();
        // midpoint u = π is the -X side at half height
        assert_relative_eq!(f.p(), Point3::new(-2.0, 0.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(f.u(), -Vec3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_circular_edge_uses_centre_and_normal() {
        let cyl = Shape::cylinder("Cylinder", 2.0, 6.0);
        let f = derive_named(&cyl, "Edge1", &settings()).unwrap();
        assert_relative_eq!(f.p(), Point3::new(0.0, 0.0, 6.0), epsilon = 1e-12);
        assert_relative_eq!(f.u(), Vec3::z(), epsilon = 1e-12);

        let tilted = Edge::full(Box::new(Circle3d::with_normal(
            Point3::new(1.0, 1.0, 1.0),
            0.5,
            Vec3::new(1.0, 0.0, 1.0),
        )
        .unwrap()));
        let f = frame_from_circular_edge(&tilted, &settings()).unwrap();
        assert_relative_eq!(f.p(), Point3::new(1.0, 1.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(
            f.u(),
            Vec3::new(1.0, 0.0, 1.0).normalize(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_nearly_closed_edge_uses_linear_tolerance() {
        let edge = Edge::new(
            Box::new(Circle3d::new(Point3::new(0.0, 0.0, 2.0), 1.0)),
            (0.0, 2.0 * PI - 1e-5),
        );
        assert!(matches!(
            frame_from_circular_edge(&edge, &settings()),
            Err(AnchorError::NotSupported(_))
        ));
        let loose = AnchorSettings {
            linear_tolerance: 1e-3,
            ..settings()
        };
        let f = frame_from_circular_edge(&edge, &loose).unwrap();
        assert_relative_eq!(f.p(), Point3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(f.u(), Vec3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_unsupported_elements() {
        let cyl = Shape::cylinder("Cylinder", 2.0, 6.0);
        for name in ["Edge2", "Wire1", "Vertex1"] {
            let err = derive_named(&cyl, name, &settings()).unwrap_err();
            assert!(matches!(err, AnchorError::NotSupported(_)), "{}: {}", name, err);
        }

        let arc = Edge::new(Box::new(Circle3d::new(Point3::origin(), 1.0)), (0.0, PI));
        assert!(matches!(
            frame_from_circular_edge(&arc, &settings()),
            Err(AnchorError::NotSupported(_))
        ));

        let helix = Edge::full(Box::new(Helix::new(1.0, 4.0, 2.0)));
        assert!(matches!(
            derive_frame(SubElement::Edge(&helix), &settings()),
            Err(AnchorError::NotSupported(_))
        ));

        let line = Edge::full(Box::new(Line3d::from_points(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
        )));
        let err = frame_from_circular_edge(&line, &settings()).unwrap_err();
        assert_eq!(err.to_string(), "cannot derive an anchor frame from a linear edge");
    }

    #[test]
    fn test_unknown_element() {
        let cube = Shape::cube("Box", 1.0, 1.0, 1.0);
        for name in ["Face7", "Face0", "Solid1", ""] {
            match derive_named(&cube, name, &settings()) {
                Err(AnchorError::UnknownElement { shape, element }) => {
                    assert_eq!(shape, "Box");
                    assert_eq!(element, name);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }
}
