//! Bounded sub-elements of a shape: faces, edges, wires and vertices.

use std::fmt;

use anchors_math::{Dir3, Point2, Point3, RigidTransform, Tolerance};

use crate::{Circle3d, Curve3d, CurveKind, Plane, Surface};

/// Point and normal queries on a parametric face patch.
pub trait FaceLike {
    /// Parameter bounds as `((u_min, u_max), (v_min, v_max))`.
    fn parameter_range(&self) -> ((f64, f64), (f64, f64));

    /// Point on the face at `(u, v)`.
    fn value_at(&self, uv: Point2) -> Point3;

    /// Outward unit normal at `(u, v)`.
    fn normal_at(&self, uv: Point2) -> Dir3;
}

// =============================================================================
// Face
// =============================================================================

/// A surface trimmed to a rectangular parameter range.
#[derive(Debug, Clone)]
pub struct Face {
    /// Underlying surface.
    pub surface: Box<dyn Surface>,
    /// Bounds of the u parameter.
    pub u_range: (f64, f64),
    /// Bounds of the v parameter.
    pub v_range: (f64, f64),
    /// Whether the face normal is opposite to the surface normal.
    pub reversed: bool,
}

impl Face {
    /// Trim `surface` to the given parameter ranges, keeping its orientation.
    pub fn new(surface: Box<dyn Surface>, u_range: (f64, f64), v_range: (f64, f64)) -> Self {
        Self {
            surface,
            u_range,
            v_range,
            reversed: false,
        }
    }

    /// The same patch with its normal flipped.
    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    /// The same patch after the rigid motion `t`.
    pub fn transformed(&self, t: &RigidTransform) -> Self {
        Self {
            surface: self.surface.moved(t),
            u_range: self.u_range,
            v_range: self.v_range,
            reversed: self.reversed,
        }
    }
}

impl FaceLike for Face {
    fn parameter_range(&self) -> ((f64, f64), (f64, f64)) {
        (self.u_range, self.v_range)
    }

    fn value_at(&self, uv: Point2) -> Point3 {
        self.surface.evaluate(uv)
    }

    fn normal_at(&self, uv: Point2) -> Dir3 {
        let n = self.surface.normal(uv);
        if self.reversed {
            -n
        } else {
            n
        }
    }
}

// =============================================================================
// Edge
// =============================================================================

/// A curve trimmed to a parameter interval.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Underlying curve.
    pub curve: Box<dyn Curve3d>,
    /// Parameter interval `(t_start, t_end)`.
    pub range: (f64, f64),
}

impl Edge {
    /// Trim `curve` to `range`.
    pub fn new(curve: Box<dyn Curve3d>, range: (f64, f64)) -> Self {
        Self { curve, range }
    }

    /// An edge spanning the curve's whole natural domain.
    pub fn full(curve: Box<dyn Curve3d>) -> Self {
        let range = curve.domain();
        Self { curve, range }
    }

    /// The kind of the underlying curve.
    pub fn kind(&self) -> CurveKind {
        self.curve.kind()
    }

    /// Start and end points of the edge.
    pub fn endpoints(&self) -> (Point3, Point3) {
        (
            self.curve.evaluate(self.range.0),
            self.curve.evaluate(self.range.1),
        )
    }

    /// Whether the edge returns to its start point.
    pub fn is_closed(&self, tol: &Tolerance) -> bool {
        if tol.is_zero(self.range.1 - self.range.0) {
            return false;
        }
        let (start, end) = self.endpoints();
        tol.points_equal(&start, &end)
    }

    /// The underlying circle, if this edge lies on one.
    pub fn circle(&self) -> Option<&Circle3d> {
        self.curve.as_any().downcast_ref::<Circle3d>()
    }

    /// The planar disc bounded by a full circular edge.
    ///
    /// The plane passes through the circle centre, is spanned by the
    /// circle's in-plane axes (so its normal is the circle normal), and is
    /// trimmed to the circle's bounding square, which puts the parameter
    /// midpoint at the centre. Returns `None` for any other edge, including
    /// a circular arc that is open under `tol`.
    pub fn as_virtual_face(&self, tol: &Tolerance) -> Option<Face> {
        let circle = self.circle()?;
        if !self.is_closed(tol) {
            return None;
        }
        let plane = Plane::new(
            circle.center,
            circle.x_dir.into_inner(),
            circle.y_dir.into_inner(),
        );
        let r = circle.radius;
        Some(Face::new(Box::new(plane), (-r, r), (-r, r)))
    }

    /// The same edge after the rigid motion `t`.
    pub fn transformed(&self, t: &RigidTransform) -> Self {
        Self {
            curve: self.curve.moved(t),
            range: self.range,
        }
    }
}

// =============================================================================
// Wire and vertex
// =============================================================================

/// A chain of edges.
#[derive(Debug, Clone, Default)]
pub struct Wire {
    /// Edges in traversal order.
    pub edges: Vec<Edge>,
}

impl Wire {
    /// Build a wire from its edges.
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }
}

/// A single point of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position.
    pub point: Point3,
}

impl Vertex {
    /// A vertex at `point`.
    pub fn new(point: Point3) -> Self {
        Self { point }
    }
}

// =============================================================================
// Sub-element references
// =============================================================================

/// The four kinds of addressable sub-elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A bounded surface patch.
    Face,
    /// A bounded curve.
    Edge,
    /// A chain of edges.
    Wire,
    /// A point.
    Vertex,
}

impl ElementKind {
    /// All kinds, in name-prefix lookup order.
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Face,
        ElementKind::Edge,
        ElementKind::Wire,
        ElementKind::Vertex,
    ];

    /// Name prefix used in sub-element names (`Face` in `Face3`).
    pub fn prefix(self) -> &'static str {
        match self {
            ElementKind::Face => "Face",
            ElementKind::Edge => "Edge",
            ElementKind::Wire => "Wire",
            ElementKind::Vertex => "Vertex",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A borrowed sub-element of a shape.
#[derive(Debug, Clone, Copy)]
pub enum SubElement<'a> {
    /// A face.
    Face(&'a Face),
    /// An edge.
    Edge(&'a Edge),
    /// A wire.
    Wire(&'a Wire),
    /// A vertex.
    Vertex(&'a Vertex),
}

impl SubElement<'_> {
    /// Which kind of sub-element this is.
    pub fn kind(&self) -> ElementKind {
        match self {
            SubElement::Face(_) => ElementKind::Face,
            SubElement::Edge(_) => ElementKind::Edge,
            SubElement::Wire(_) => ElementKind::Wire,
            SubElement::Vertex(_) => ElementKind::Vertex,
        }
    }
}
