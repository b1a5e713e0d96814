//! Named anchors attached to solids.

use anchors_geom::Shape;
use anchors_math::{Point3, RigidTransform, Vec3};

use crate::{derive, superimpose, AnchorError, AnchorSettings, Frame, Result};

/// A named frame attached to a sub-element of a solid.
///
/// An anchor attached to a sub-element is re-derived from geometry on
/// every recompute. An anchor restored from a saved record has no
/// sub-element link; its frame only changes when the whole solid moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    name: String,
    parent: String,
    element: Option<String>,
    frame: Frame,
}

impl Anchor {
    /// Attach an anchor to the sub-element `element` of `shape`.
    pub fn attach(
        name: impl Into<String>,
        shape: &Shape,
        element: &str,
        settings: &AnchorSettings,
    ) -> Result<Self> {
        let frame = derive::derive_named(shape, element, settings)?;
        Ok(Self {
            name: name.into(),
            parent: shape.name.clone(),
            element: Some(element.to_string()),
            frame,
        })
    }

    /// An anchor with a fixed frame and no sub-element link.
    pub fn fixed(name: impl Into<String>, parent: impl Into<String>, frame: Frame) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            element: None,
            frame,
        }
    }

    /// Anchor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the solid this anchor belongs to.
    pub fn parent(&self) -> &str {
        &self.parent
    }

    /// Sub-element the anchor is attached to, if any.
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Current frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Re-derive the frame from the current geometry of the parent.
    ///
    /// On error the previous frame is kept.
    pub fn recompute(&mut self, shape: &Shape, settings: &AnchorSettings) -> Result<&Frame> {
        if shape.name != self.parent {
            return Err(AnchorError::ParentMismatch {
                anchor: self.name.clone(),
                parent: self.parent.clone(),
                expected: shape.name.clone(),
            });
        }
        if let Some(element) = &self.element {
            self.frame = derive::derive_named(shape, element, settings)?;
            tracing::debug!("recomputed anchor '{}' on {}", self.name, element);
        }
        Ok(&self.frame)
    }

    /// Placement of the anchor glyph.
    ///
    /// The glyph is drawn in a canonical frame with its arrow along +Y
    /// (`p = 0`, `u = -Y`, `v = +Z`); mating that frame onto the anchor
    /// points the arrow along `u` and the glyph's +Z along `v`.
    pub fn glyph_transform(&self) -> Result<RigidTransform> {
        let glyph = Frame::new(Point3::origin(), -Vec3::y(), Vec3::z())?;
        superimpose::superimpose(&glyph, &self.frame)
    }

    pub(crate) fn set_parent(&mut self, parent: &str) {
        self.parent = parent.to_string();
    }

    pub(crate) fn move_fixed(&mut self, t: &RigidTransform) {
        if self.element.is_none() {
            self.frame = self.frame.transformed(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_attach_records_links() {
        let cube = Shape::cube("Box", 2.0, 2.0, 2.0);
        let a = Anchor::attach("top", &cube, "Face2", &AnchorSettings::default()).unwrap();
        assert_eq!(a.name(), "top");
        assert_eq!(a.parent(), "Box");
        assert_eq!(a.element(), Some("Face2"));
        assert_relative_eq!(a.frame().p(), Point3::new(1.0, 1.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_recompute_follows_geometry() {
        let settings = AnchorSettings::default();
        let cube = Shape::cube("Box", 2.0, 2.0, 2.0);
        let mut a = Anchor::attach("top", &cube, "Face2", &settings).unwrap();
        let lifted = cube.transformed(&RigidTransform::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        let f = *a.recompute(&lifted, &settings).unwrap();
        assert_relative_eq!(f.p(), Point3::new(1.0, 1.0, 7.0), epsilon = 1e-12);
        assert_eq!(a.frame(), &f);
    }

    #[test]
    fn test_recompute_failure_keeps_frame() {
        let settings = AnchorSettings::default();
        let cube = Shape::cube("Box", 2.0, 2.0, 2.0);
        let mut a = Anchor::attach("side", &cube, "Face6", &settings).unwrap();
        let before = *a.frame();

        let mut stripped = Shape::new("Box");
        stripped.faces.push(cube.faces[0].clone());
        assert!(matches!(
            a.recompute(&stripped, &settings),
            Err(AnchorError::UnknownElement { .. })
        ));
        assert_eq!(a.frame(), &before);

        let other = Shape::cube("Other", 2.0, 2.0, 2.0);
        assert!(matches!(
            a.recompute(&other, &settings),
            Err(AnchorError::ParentMismatch { .. })
        ));
    }

    #[test]
    fn test_fixed_anchor_ignores_recompute() {
        let f = Frame::new(Point3::new(1.0, 0.0, 0.0), Vec3::x(), Vec3::y()).unwrap();
        let mut a = Anchor::fixed("saved", "Box", f);
        let cube = Shape::cube("Box", 2.0, 2.0, 2.0);
        assert_eq!(a.recompute(&cube, &AnchorSettings::default()).unwrap(), &f);
        assert_eq!(a.element(), None);
    }

    #[test]
    fn test_glyph_arrow_points_along_u() {
        let cube = Shape::cube("Box", 2.0, 2.0, 2.0);
        let a = Anchor::attach("right", &cube, "Face6", &AnchorSettings::default()).unwrap();
        let t = a.glyph_transform().unwrap();
        let f = a.frame();
        assert_relative_eq!(t.apply_point(&Point3::origin()), f.p(), epsilon = 1e-12);
        assert_relative_eq!(t.apply_vec(&Vec3::y()), f.u(), epsilon = 1e-12);
        assert_relative_eq!(t.apply_vec(&Vec3::z()), f.v(), epsilon = 1e-12);
    }
}
