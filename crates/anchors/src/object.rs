//! Solids carrying an ordered set of anchors.

use anchors_geom::Shape;
use anchors_math::RigidTransform;

use crate::{superimpose, Anchor, AnchorError, AnchorSettings, Result};

/// A base solid with named anchors.
///
/// Anchors keep their insertion order. Names are unique within the object
/// and every anchor's parent is the base solid.
#[derive(Debug, Clone)]
pub struct AnchorableObject {
    name: String,
    base: Shape,
    anchors: Vec<Anchor>,
    settings: AnchorSettings,
}

impl AnchorableObject {
    /// Wrap `base` with default settings and no anchors.
    pub fn new(name: impl Into<String>, base: Shape) -> Self {
        Self::with_settings(name, base, AnchorSettings::default())
    }

    /// Wrap `base` with the given settings and no anchors.
    pub fn with_settings(name: impl Into<String>, base: Shape, settings: AnchorSettings) -> Self {
        Self {
            name: name.into(),
            base,
            anchors: Vec::new(),
            settings,
        }
    }

    /// Object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base solid.
    pub fn base(&self) -> &Shape {
        &self.base
    }

    /// Settings used to derive anchor frames.
    pub fn settings(&self) -> &AnchorSettings {
        &self.settings
    }

    /// Anchors in insertion order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Look up an anchor by name.
    pub fn anchor(&self, name: &str) -> Result<&Anchor> {
        self.anchors
            .iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| AnchorError::UnknownAnchor(name.to_string()))
    }

    fn check_unique(&self, name: &str) -> Result<()> {
        if self.anchors.iter().any(|a| a.name() == name) {
            return Err(AnchorError::DuplicateAnchor(name.to_string()));
        }
        Ok(())
    }

    fn check_parent(&self, anchor: &Anchor) -> Result<()> {
        if anchor.parent() != self.base.name {
            return Err(AnchorError::ParentMismatch {
                anchor: anchor.name().to_string(),
                parent: anchor.parent().to_string(),
                expected: self.base.name.clone(),
            });
        }
        Ok(())
    }

    /// Derive an anchor from the base sub-element `element` and append it.
    pub fn add_anchor(&mut self, name: &str, element: &str) -> Result<&Anchor> {
        self.check_unique(name)?;
        let anchor = Anchor::attach(name, &self.base, element, &self.settings)?;
        tracing::info!("added anchor '{}' on {}.{}", name, self.base.name, element);
        self.anchors.push(anchor);
        Ok(&self.anchors[self.anchors.len() - 1])
    }

    /// Append an existing anchor, which must belong to the base solid.
    pub fn insert_anchor(&mut self, anchor: Anchor) -> Result<()> {
        self.check_parent(&anchor)?;
        self.check_unique(anchor.name())?;
        tracing::info!("inserted anchor '{}' into {}", anchor.name(), self.name);
        self.anchors.push(anchor);
        Ok(())
    }

    /// Append several anchors at once.
    ///
    /// Every anchor is checked (parent, and name against both the existing
    /// anchors and the rest of the batch) before any is added, so on error
    /// the object is unchanged.
    pub fn insert_anchors(&mut self, anchors: Vec<Anchor>) -> Result<()> {
        for (i, anchor) in anchors.iter().enumerate() {
            self.check_parent(anchor)?;
            self.check_unique(anchor.name())?;
            if anchors[..i].iter().any(|a| a.name() == anchor.name()) {
                return Err(AnchorError::DuplicateAnchor(anchor.name().to_string()));
            }
        }
        tracing::info!("inserted {} anchors into {}", anchors.len(), self.name);
        self.anchors.extend(anchors);
        Ok(())
    }

    /// Remove an anchor and return it.
    pub fn remove_anchor(&mut self, name: &str) -> Result<Anchor> {
        let idx = self
            .anchors
            .iter()
            .position(|a| a.name() == name)
            .ok_or_else(|| AnchorError::UnknownAnchor(name.to_string()))?;
        tracing::info!("removed anchor '{}' from {}", name, self.name);
        Ok(self.anchors.remove(idx))
    }

    /// Replace the base geometry and recompute every anchor.
    ///
    /// Anchors are re-parented to the new base.
    pub fn set_base(&mut self, base: Shape) -> Result<()> {
        if base.name != self.base.name {
            for anchor in &mut self.anchors {
                anchor.set_parent(&base.name);
            }
        }
        self.base = base;
        self.recompute()
    }

    /// Re-derive every anchor from the base geometry.
    ///
    /// All anchors are attempted; those that fail keep their previous
    /// frame, and the first failure is returned.
    pub fn recompute(&mut self) -> Result<()> {
        tracing::debug!("recomputing {} anchors of {}", self.anchors.len(), self.name);
        let mut first_err = None;
        for anchor in &mut self.anchors {
            let result = anchor.recompute(&self.base, &self.settings).map(|_| ());
            if let Err(e) = result {
                tracing::warn!("anchor '{}' could not be recomputed: {}", anchor.name(), e);
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Move the whole object rigidly: the base solid and every anchor.
    pub fn apply_placement(&mut self, t: &RigidTransform) -> Result<()> {
        for anchor in &mut self.anchors {
            anchor.move_fixed(t);
        }
        let moved = self.base.transformed(t);
        self.set_base(moved)
    }
}

/// Rigid motion that places `moving` so that its anchor `moving_anchor`
/// mates with the anchor `fixed_anchor` of `fixed`.
pub fn mate(
    moving: &AnchorableObject,
    moving_anchor: &str,
    fixed: &AnchorableObject,
    fixed_anchor: &str,
) -> Result<RigidTransform> {
    let from = moving.anchor(moving_anchor)?;
    let to = fixed.anchor(fixed_anchor)?;
    tracing::debug!(
        "mating {}.{} onto {}.{}",
        moving.name(),
        moving_anchor,
        fixed.name(),
        fixed_anchor
    );
    superimpose::superimpose(from.frame(), to.frame())
}
