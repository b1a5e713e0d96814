//! Rigid superimposition of one anchor frame onto another.
//!
//! Mating puts two anchors face to face: the landmarks of `frame0` are
//! `p0, p0 + u0, p0 + v0` and those of `frame1` are `p1, p1 - u1, p1 + v1`.
//! The flipped `u1` makes the primary directions anti-parallel, so two
//! outward face normals end up pointing into each other.

use anchors_math::{fit_rigid, Point3, RigidTransform};
use nalgebra::{Matrix3, Rotation3};
use rayon::prelude::*;

use crate::{AnchorError, Frame, Result};

/// Minimum landmark leg length.
const COINCIDENT_EPS: f64 = 1e-12;

/// Minimum `|e1 × w| / (|e1| |w|)` for two legs to span a plane.
const COLLINEAR_EPS: f64 = 1e-9;

/// Relative mismatch of corresponding landmark distances above which two
/// triples are treated as non-congruent.
const CONGRUENCE_EPS: f64 = 1e-9;

/// Orthonormal basis (as matrix columns) from a landmark triple.
///
/// `e1` follows the first leg, `e2` is the second leg with its `e1`
/// component removed, and `e3 = e1 × e2`.
fn landmark_basis(points: &[Point3; 3]) -> Result<Matrix3<f64>> {
    let leg1 = points[1] - points[0];
    let leg2 = points[2] - points[0];
    let (n1, n2) = (leg1.norm(), leg2.norm());
    if n1 <= COINCIDENT_EPS || n2 <= COINCIDENT_EPS {
        return Err(AnchorError::DegenerateTransform(
            "coincident landmark points".into(),
        ));
    }
    if leg1.cross(&leg2).norm() <= COLLINEAR_EPS * n1 * n2 {
        return Err(AnchorError::DegenerateTransform(
            "collinear landmark points".into(),
        ));
    }
    let e1 = leg1 / n1;
    let e2 = (leg2 - leg2.dot(&e1) * e1).normalize();
    let e3 = e1.cross(&e2);
    Ok(Matrix3::from_columns(&[e1, e2, e3]))
}

/// Whether the two triples have the same pairwise distances.
fn congruent(source: &[Point3; 3], target: &[Point3; 3]) -> bool {
    [(0, 1), (0, 2), (1, 2)].iter().all(|&(i, j)| {
        let ds = (source[j] - source[i]).norm();
        let dt = (target[j] - target[i]).norm();
        (ds - dt).abs() <= CONGRUENCE_EPS * ds.max(dt).max(1.0)
    })
}

/// Rigid motion taking the triple `source` onto the triple `target`.
///
/// For congruent triples, each one is turned into an orthonormal basis
/// `B`; the rotation is `B_target · B_sourceᵀ` and the translation carries
/// `source[0]` onto `target[0]`, which is exactly the least-squares fit.
/// Triples that differ in shape (frames accepted under a loose
/// orthogonality tolerance) have no exact rigid map and go through
/// [`anchors_math::fit_rigid`] instead.
///
/// # Errors
///
/// `DegenerateTransform` if either triple is coincident or collinear.
pub fn superimpose_points(source: &[Point3; 3], target: &[Point3; 3]) -> Result<RigidTransform> {
    let b0 = landmark_basis(source)?;
    let b1 = landmark_basis(target)?;
    if !congruent(source, target) {
        tracing::debug!("landmark triples are not congruent, using least-squares fit");
        return fit_rigid(source, target)
            .map_err(|e| AnchorError::DegenerateTransform(e.to_string()));
    }
    let rotation = Rotation3::from_matrix_unchecked(b1 * b0.transpose());
    let translation = target[0].coords - rotation * source[0].coords;
    Ok(RigidTransform::new(rotation, translation))
}

/// Mating landmarks of the target frame: `p`, `p - u`, `p + v`.
pub fn mating_landmarks(frame: &Frame) -> [Point3; 3] {
    [frame.p(), frame.p() - frame.u(), frame.p() + frame.v()]
}

/// Rigid motion that mates `frame0` onto `frame1`.
///
/// Maps `p0 → p1`, `u0 → -u1` and `v0 → v1`.
pub fn superimpose(frame0: &Frame, frame1: &Frame) -> Result<RigidTransform> {
    let t = superimpose_points(&frame0.landmarks(), &mating_landmarks(frame1))?;
    tracing::trace!(
        "superimposed frame at {:?} onto {:?}: translation {:?}",
        frame0.p().coords,
        frame1.p().coords,
        t.translation
    );
    Ok(t)
}

/// Rigid motion that maps `frame0` onto `frame1` without flipping `u`.
///
/// Maps `p0 → p1`, `u0 → u1` and `v0 → v1`; a frame superimposed on
/// itself this way gives the identity.
pub fn superimpose_unflipped(frame0: &Frame, frame1: &Frame) -> Result<RigidTransform> {
    superimpose_points(&frame0.landmarks(), &frame1.landmarks())
}

/// Mate many independent frame pairs in parallel.
///
/// Results are returned in input order; a failing pair does not affect
/// the others.
pub fn superimpose_batch(pairs: &[(Frame, Frame)]) -> Vec<Result<RigidTransform>> {
    pairs
        .par_iter()
        .map(|(frame0, frame1)| superimpose(frame0, frame1))
        .collect()
}
