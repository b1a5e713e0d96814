//! Named shapes with addressable sub-elements.
//!
//! Sub-elements are addressed the way CAD hosts name them: a kind prefix
//! followed by a 1-based index (`Face1`, `Edge12`, `Vertex3`).

use std::f64::consts::PI;

use anchors_math::{Point3, RigidTransform, Vec3};

use crate::{Circle3d, CylinderSurface, Edge, ElementKind, Face, Line3d, Plane, SubElement, Vertex, Wire};

/// A solid described by its bounded sub-elements.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    /// Name of the solid, used as the parent reference of its anchors.
    pub name: String,
    /// Faces, addressed as `Face1..`.
    pub faces: Vec<Face>,
    /// Edges, addressed as `Edge1..`.
    pub edges: Vec<Edge>,
    /// Wires, addressed as `Wire1..`.
    pub wires: Vec<Wire>,
    /// Vertices, addressed as `Vertex1..`.
    pub vertices: Vec<Vertex>,
}

/// Split `Face3` into its kind and 0-based index.
fn parse_element_name(name: &str) -> Option<(ElementKind, usize)> {
    ElementKind::ALL.iter().find_map(|&kind| {
        let digits = name.strip_prefix(kind.prefix())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index: usize = digits.parse().ok()?;
        index.checked_sub(1).map(|i| (kind, i))
    })
}

impl Shape {
    /// An empty shape.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a sub-element by its host-style name.
    ///
    /// Returns `None` for malformed names, index 0, or indices past the end.
    pub fn element(&self, name: &str) -> Option<SubElement<'_>> {
        let (kind, i) = parse_element_name(name)?;
        match kind {
            ElementKind::Face => self.faces.get(i).map(SubElement::Face),
            ElementKind::Edge => self.edges.get(i).map(SubElement::Edge),
            ElementKind::Wire => self.wires.get(i).map(SubElement::Wire),
            ElementKind::Vertex => self.vertices.get(i).map(SubElement::Vertex),
        }
    }

    /// Append a face and return its name.
    pub fn add_face(&mut self, face: Face) -> String {
        self.faces.push(face);
        format!("{}{}", ElementKind::Face, self.faces.len())
    }

    /// Append an edge and return its name.
    pub fn add_edge(&mut self, edge: Edge) -> String {
        self.edges.push(edge);
        format!("{}{}", ElementKind::Edge, self.edges.len())
    }

    /// Append a wire and return its name.
    pub fn add_wire(&mut self, wire: Wire) -> String {
        self.wires.push(wire);
        format!("{}{}", ElementKind::Wire, self.wires.len())
    }

    /// Append a vertex and return its name.
    pub fn add_vertex(&mut self, vertex: Vertex) -> String {
        self.vertices.push(vertex);
        format!("{}{}", ElementKind::Vertex, self.vertices.len())
    }

    /// A copy of this shape with every sub-element moved by `t`.
    pub fn transformed(&self, t: &RigidTransform) -> Self {
        Self {
            name: self.name.clone(),
            faces: self.faces.iter().map(|f| f.transformed(t)).collect(),
            edges: self.edges.iter().map(|e| e.transformed(t)).collect(),
            wires: self
                .wires
                .iter()
                .map(|w| Wire::new(w.edges.iter().map(|e| e.transformed(t)).collect()))
                .collect(),
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex::new(t.apply_point(&v.point)))
                .collect(),
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Axis-aligned box with one corner at the origin and the opposite
    /// corner at `(sx, sy, sz)`.
    ///
    /// Faces: bottom, top, front (y=0), back, left (x=0), right; all
    /// normals point outward. Edges: the four bottom edges, the four top
    /// edges, then the four verticals. One wire per face.
    pub fn cube(name: impl Into<String>, sx: f64, sy: f64, sz: f64) -> Self {
        let mut shape = Self::new(name);
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(sx, 0.0, 0.0),
            Point3::new(sx, sy, 0.0),
            Point3::new(0.0, sy, 0.0),
            Point3::new(0.0, 0.0, sz),
            Point3::new(sx, 0.0, sz),
            Point3::new(sx, sy, sz),
            Point3::new(0.0, sy, sz),
        ];
        for p in corners {
            shape.add_vertex(Vertex::new(p));
        }

        let line = |a: usize, b: usize| {
            Edge::full(Box::new(Line3d::from_points(corners[a], corners[b])))
        };
        for (a, b) in [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ] {
            shape.add_edge(line(a, b));
        }

        // (loop corners, plane origin, x_dir, y_dir); x_dir × y_dir is outward
        let face_defs: [([usize; 4], Point3, Vec3, Vec3); 6] = [
            ([0, 3, 2, 1], corners[0], Vec3::y(), Vec3::x()),
            ([4, 5, 6, 7], corners[4], Vec3::x(), Vec3::y()),
            ([0, 1, 5, 4], corners[0], Vec3::x(), Vec3::z()),
            ([2, 3, 7, 6], corners[3], Vec3::z(), Vec3::x()),
            ([0, 4, 7, 3], corners[0], Vec3::z(), Vec3::y()),
            ([1, 2, 6, 5], corners[1], Vec3::y(), Vec3::z()),
        ];
        let size = Vec3::new(sx, sy, sz);
        for (verts, origin, x_dir, y_dir) in face_defs {
            let face = Face::new(
                Box::new(Plane::new(origin, x_dir, y_dir)),
                (0.0, x_dir.dot(&size)),
                (0.0, y_dir.dot(&size)),
            );
            shape.add_face(face);
            let edges = (0..4).map(|j| line(verts[j], verts[(j + 1) % 4])).collect();
            shape.add_wire(Wire::new(edges));
        }
        shape
    }

    /// Cylinder of radius `r` and height `h` standing on the XY plane,
    /// axis along +Z.
    ///
    /// Faces: lateral, top disc, bottom disc. Edges: top circle, seam
    /// line, bottom circle. Wires: lateral boundary, top, bottom.
    pub fn cylinder(name: impl Into<String>, r: f64, h: f64) -> Self {
        let mut shape = Self::new(name);

        shape.add_face(Face::new(
            Box::new(CylinderSurface::new(r)),
            (0.0, 2.0 * PI),
            (0.0, h),
        ));
        shape.add_face(Face::new(
            Box::new(Plane::new(Point3::new(0.0, 0.0, h), Vec3::x(), Vec3::y())),
            (-r, r),
            (-r, r),
        ));
        shape.add_face(Face::new(
            Box::new(Plane::new(Point3::origin(), Vec3::y(), Vec3::x())),
            (-r, r),
            (-r, r),
        ));

        let top = Edge::full(Box::new(Circle3d::new(Point3::new(0.0, 0.0, h), r)));
        let seam = Edge::full(Box::new(Line3d::from_points(
            Point3::new(r, 0.0, 0.0),
            Point3::new(r, 0.0, h),
        )));
        let bottom = Edge::full(Box::new(Circle3d::new(Point3::origin(), r)));
        shape.add_edge(top.clone());
        shape.add_edge(seam.clone());
        shape.add_edge(bottom.clone());

        shape.add_wire(Wire::new(vec![
            top.clone(),
            seam.clone(),
            bottom.clone(),
            seam,
        ]));
        shape.add_wire(Wire::new(vec![top]));
        shape.add_wire(Wire::new(vec![bottom]));

        shape.add_vertex(Vertex::new(Point3::new(r, 0.0, h)));
        shape.add_vertex(Vertex::new(Point3::new(r, 0.0, 0.0)));
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CurveKind, FaceLike};
    use anchors_math::{Dir3, Point2};

    fn face_center(face: &Face) -> (Point3, Dir3) {
        let ((u0, u1), (v0, v1)) = face.parameter_range();
        let uv = Point2::new((u0 + u1) / 2.0, (v0 + v1) / 2.0);
        (face.value_at(uv), face.normal_at(uv))
    }

    #[test]
    fn test_parse_element_names() {
        assert_eq!(parse_element_name("Face1"), Some((ElementKind::Face, 0)));
        assert_eq!(parse_element_name("Edge12"), Some((ElementKind::Edge, 11)));
        assert_eq!(parse_element_name("Vertex3"), Some((ElementKind::Vertex, 2)));
        assert_eq!(parse_element_name("Face0"), None);
        assert_eq!(parse_element_name("Face"), None);
        assert_eq!(parse_element_name("Face+1"), None);
        assert_eq!(parse_element_name("Solid1"), None);
    }

    #[test]
    fn test_cube_counts() {
        let cube = Shape::cube("Box", 10.0, 20.0, 30.0);
        assert_eq!(cube.faces.len(), 6);
        assert_eq!(cube.edges.len(), 12);
        assert_eq!(cube.wires.len(), 6);
        assert_eq!(cube.vertices.len(), 8);
        assert!(cube.element("Face6").is_some());
        assert!(cube.element("Face7").is_none());
        assert!(cube.element("Edge12").is_some());
    }

    #[test]
    fn test_cube_face_normals_point_outward() {
        let cube = Shape::cube("Box", 10.0, 20.0, 30.0);
        let box_center = Point3::new(5.0, 10.0, 15.0);
        let expected_centers = [
            Point3::new(5.0, 10.0, 0.0),
            Point3::new(5.0, 10.0, 30.0),
            Point3::new(5.0, 0.0, 15.0),
            Point3::new(5.0, 20.0, 15.0),
            Point3::new(0.0, 10.0, 15.0),
            Point3::new(10.0, 10.0, 15.0),
        ];
        for (face, expected) in cube.faces.iter().zip(expected_centers) {
            let (p, n) = face_center(face);
            assert!((p - expected).norm() < 1e-12, "{:?} vs {:?}", p, expected);
            assert!((p - box_center).dot(n.as_ref()) > 0.0);
        }
    }

    #[test]
    fn test_cylinder_elements() {
        let cyl = Shape::cylinder("Cylinder", 2.0, 5.0);
        let (top, n) = face_center(&cyl.faces[1]);
        assert!((top - Point3::new(0.0, 0.0, 5.0)).norm() < 1e-12);
        assert!((n.as_ref().z - 1.0).abs() < 1e-12);
        let (bottom, n) = face_center(&cyl.faces[2]);
        assert!(bottom.coords.norm() < 1e-12);
        assert!((n.as_ref().z + 1.0).abs() < 1e-12);

        match cyl.element("Edge1") {
            Some(SubElement::Edge(e)) => assert_eq!(e.kind(), CurveKind::Circle),
            other => panic!("unexpected {:?}", other),
        }
        match cyl.element("Edge2") {
            Some(SubElement::Edge(e)) => assert_eq!(e.kind(), CurveKind::Line),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_transformed_moves_everything() {
        let cube = Shape::cube("Box", 1.0, 1.0, 1.0);
        let moved = cube.transformed(&RigidTransform::from_translation(Vec3::new(0.0, 0.0, 10.0)));
        assert_eq!(moved.name, "Box");
        assert!((moved.vertices[0].point.z - 10.0).abs() < 1e-12);
        let (p, _) = face_center(&moved.faces[0]);
        assert!((p.z - 10.0).abs() < 1e-12);
        let (start, _) = moved.edges[0].endpoints();
        assert!((start.z - 10.0).abs() < 1e-12);
    }
}
