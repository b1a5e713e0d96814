//! JSON interchange of anchor frames.
//!
//! The document layout is
//!
//! ```json
//! {
//!   "anchors": { "top": { "p": [0, 0, 1], "u": [0, 0, 1], "v": [1, 0, 0] } },
//!   "properties": {}
//! }
//! ```

use std::collections::BTreeMap;

use anchors_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::{Anchor, AnchorableObject, Frame, Result};

/// Raw `(p, u, v)` triple of one saved anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Origin.
    pub p: [f64; 3],
    /// Primary direction.
    pub u: [f64; 3],
    /// Secondary direction.
    pub v: [f64; 3],
}

impl From<&Frame> for FrameRecord {
    fn from(f: &Frame) -> Self {
        Self {
            p: f.p().coords.into(),
            u: f.u().into(),
            v: f.v().into(),
        }
    }
}

impl FrameRecord {
    /// Validate into a [`Frame`].
    pub fn to_frame(&self) -> Result<Frame> {
        Frame::new(
            Point3::from(self.p),
            Vec3::from(self.u),
            Vec3::from(self.v),
        )
    }
}

/// Saved anchors of an object plus free-form properties.
///
/// Anchors are keyed by name; the object's insertion order is not kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorRecord {
    /// Anchor frames by name.
    pub anchors: BTreeMap<String, FrameRecord>,
    /// Arbitrary extra properties, carried through untouched.
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl AnchorRecord {
    /// Snapshot the current anchor frames of an object.
    pub fn from_object(obj: &AnchorableObject) -> Self {
        Self {
            anchors: obj
                .anchors()
                .iter()
                .map(|a| (a.name().to_string(), FrameRecord::from(a.frame())))
                .collect(),
            properties: serde_json::Map::new(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON. Frames are not validated until [`Self::frames`].
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Validated frames by name.
    ///
    /// # Errors
    ///
    /// The first entry that is not an orthonormal frame.
    pub fn frames(&self) -> Result<BTreeMap<String, Frame>> {
        self.anchors
            .iter()
            .map(|(name, rec)| -> Result<(String, Frame)> { Ok((name.clone(), rec.to_frame()?)) })
            .collect()
    }

    /// Add every saved anchor to `obj` as a fixed anchor on its base solid.
    ///
    /// Either all anchors are added or, on error, `obj` is left unchanged.
    pub fn restore_into(&self, obj: &mut AnchorableObject) -> Result<()> {
        let parent = obj.base().name.clone();
        let anchors = self
            .frames()?
            .into_iter()
            .map(|(name, frame)| Anchor::fixed(name, parent.as_str(), frame))
            .collect();
        obj.insert_anchors(anchors)
    }
}
