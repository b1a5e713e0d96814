//! Tunable parameters for anchor derivation and validation.

use anchors_math::{DivisorRule, Perpendicular, Tolerance};
use serde::{Deserialize, Serialize};

use crate::{AnchorError, Result};

/// Largest accepted `orthogonality_tolerance`. Looser frames are no longer
/// close enough to rigid for the landmark construction to be meaningful.
pub const MAX_ORTHOGONALITY_TOLERANCE: f64 = 1e-3;

/// Anchor parameters.
///
/// Missing keys in a settings file fall back to [`AnchorSettings::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorSettings {
    /// Distance below which points are coincident (mm).
    pub linear_tolerance: f64,
    /// Allowed deviation of `|u|`, `|v|` from 1 and of `u·v` from 0.
    pub orthogonality_tolerance: f64,
    /// Divisor axis rule for the secondary frame vector.
    pub divisor_rule: DivisorRule,
}

impl Default for AnchorSettings {
    fn default() -> Self {
        Self {
            linear_tolerance: 1e-6,
            orthogonality_tolerance: 1e-6,
            divisor_rule: DivisorRule::LastNonZero,
        }
    }
}

impl AnchorSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.linear_tolerance > 0.0 && self.linear_tolerance.is_finite()) {
            return Err(AnchorError::InvalidSettings(
                "linear_tolerance must be positive".into(),
            ));
        }
        if !(self.orthogonality_tolerance > 0.0
            && self.orthogonality_tolerance <= MAX_ORTHOGONALITY_TOLERANCE)
        {
            return Err(AnchorError::InvalidSettings(format!(
                "orthogonality_tolerance must be in (0, {}], got {}",
                MAX_ORTHOGONALITY_TOLERANCE, self.orthogonality_tolerance
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Deterministic, normalized perpendicular construction using the
    /// configured divisor rule.
    pub fn perpendicular(&self) -> Perpendicular {
        Perpendicular {
            normalize: true,
            divisor: self.divisor_rule,
        }
    }

    /// Geometric comparison tolerance.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance {
            linear: self.linear_tolerance,
        }
    }
}
