//! Perpendicular-vector construction.
//!
//! Given a nonzero vector `a`, one component is picked as the *divisor*
//! axis `d`; the two remaining components of the result are fixed (to 1, or
//! to random values in `[0, 1)`), and `b[d]` is solved from `a · b = 0`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{MathError, Result, Vec3};

/// Relative bound on `|a · b| / (|a| |b|)` accepted as orthogonal.
const ORTHOGONALITY_EPS: f64 = 1e-12;

/// Accepted deviation of a normalized result from unit length.
const UNIT_EPS: f64 = 1e-12;

/// How the divisor axis is chosen among the nonzero components of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisorRule {
    /// The highest-indexed nonzero component.
    ///
    /// Reproduces the `v` vectors of anchors saved by earlier releases.
    #[default]
    LastNonZero,
    /// The component of largest magnitude; ties go to the highest index.
    ///
    /// Avoids dividing by a tiny component when `a` is nearly axis-aligned.
    LargestMagnitude,
}

impl DivisorRule {
    fn pick(self, a: &[f64; 3]) -> Option<usize> {
        let nonzero = (0..3).filter(|&i| a[i] != 0.0);
        match self {
            DivisorRule::LastNonZero => nonzero.last(),
            DivisorRule::LargestMagnitude => nonzero.max_by(|&i, &j| a[i].abs().total_cmp(&a[j].abs())),
        }
    }
}

/// Options for perpendicular-vector construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perpendicular {
    /// Scale the result to unit length.
    pub normalize: bool,
    /// Divisor axis selection.
    pub divisor: DivisorRule,
}

impl Default for Perpendicular {
    fn default() -> Self {
        Self {
            normalize: true,
            divisor: DivisorRule::default(),
        }
    }
}

impl Perpendicular {
    /// Deterministic perpendicular to `a`: both free components are 1.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `a` does not have exactly 3 finite components,
    /// `DegenerateInput` if `a` is the zero vector.
    pub fn of(&self, a: &[f64]) -> Result<Vec3> {
        self.solve(a, [1.0, 1.0])
    }

    /// Randomized perpendicular to `a`: the free components are drawn
    /// uniformly from `[0, 1)` using `rng`.
    pub fn of_random<R: Rng>(&self, a: &[f64], rng: &mut R) -> Result<Vec3> {
        let free = [rng.gen::<f64>(), rng.gen::<f64>()];
        self.solve(a, free)
    }

    fn solve(&self, a: &[f64], free: [f64; 2]) -> Result<Vec3> {
        let a = <[f64; 3]>::try_from(a).map_err(|_| {
            MathError::InvalidInput(format!("expected a 3D vector, got {} components", a.len()))
        })?;
        if a.iter().any(|c| !c.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "non-finite component in {:?}",
                a
            )));
        }

        let d = self.divisor.pick(&a).ok_or_else(|| {
            MathError::DegenerateInput("the zero vector has no defined perpendicular".into())
        })?;
        let [i, j] = match d {
            0 => [1, 2],
            1 => [0, 2],
            _ => [0, 1],
        };

        let mut b = Vec3::zeros();
        b[i] = free[0];
        b[j] = free[1];
        b[d] = -(a[i] * b[i] + a[j] * b[j]) / a[d];

        if b.iter().any(|c| !c.is_finite()) {
            return Err(MathError::DegenerateInput(format!(
                "divisor component {} of {:?} is too small",
                d, a
            )));
        }

        // Compare directions on max-component-scaled copies so that norms
        // of very large or very small vectors stay representable.
        let scale = b.amax();
        if scale == 0.0 {
            return Err(MathError::DegenerateInput(
                "perpendicular has zero length".into(),
            ));
        }
        let a = Vec3::from(a);
        let a_dir = a / a.amax();
        let b_dir = b / scale;
        if a_dir.dot(&b_dir).abs() > ORTHOGONALITY_EPS * a_dir.norm() * b_dir.norm() {
            return Err(MathError::DegenerateInput(format!(
                "constructed vector {:?} is not orthogonal to {:?}",
                b, a
            )));
        }

        if self.normalize {
            b = b_dir / b_dir.norm();
            if (b.norm() - 1.0).abs() > UNIT_EPS {
                return Err(MathError::DegenerateInput(format!(
                    "perpendicular of {:?} cannot be normalized",
                    a
                )));
            }
        }
        Ok(b)
    }
}

/// Unit perpendicular to `a` using the default (deterministic) options.
pub fn perpendicular(a: &[f64]) -> Result<Vec3> {
    Perpendicular::default().of(a)
}
