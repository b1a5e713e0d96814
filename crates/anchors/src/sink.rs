//! Consumers of computed placements.

use anchors_math::{AxisAngle, RigidTransform, Vec3};

/// Anything that can be positioned by a translation and an axis-angle
/// rotation (a scene node, an assembly component, a recorded placement).
pub trait TransformSink {
    /// Position the sink.
    fn place(&mut self, translation: Vec3, rotation: AxisAngle);
}

/// A recorded placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Translation.
    pub translation: Vec3,
    /// Rotation.
    pub rotation: AxisAngle,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: AxisAngle::identity(),
        }
    }
}

impl Placement {
    /// The rigid motion this placement describes.
    pub fn to_rigid(&self) -> RigidTransform {
        RigidTransform::from_axis_angle(&self.rotation, self.translation)
    }
}

impl TransformSink for Placement {
    fn place(&mut self, translation: Vec3, rotation: AxisAngle) {
        self.translation = translation;
        self.rotation = rotation;
    }
}

/// Write `t` into `sink` as a translation plus axis-angle rotation.
pub fn emit<S: TransformSink + ?Sized>(t: &RigidTransform, sink: &mut S) {
    sink.place(t.translation, t.axis_angle());
}
