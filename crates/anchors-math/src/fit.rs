//! Least-squares rigid fit between corresponding point sets (Kabsch).

use nalgebra::{Matrix3, Rotation3};

use crate::{MathError, Point3, Result, RigidTransform, Vec3};

/// Ratio of the second to the first singular value below which the point
/// set is treated as collinear.
const RANK_EPS: f64 = 1e-12;

/// Rigid transform `T` minimizing `Σ |T(source[i]) - target[i]|²`.
///
/// Centroids are removed, the cross-covariance `H = Σ sᵢ tᵢᵀ` is
/// decomposed as `U Σ Vᵀ`, and `R = V D Uᵀ` where `D` flips the smallest
/// singular direction when needed so that `det R = +1`. No scaling.
///
/// # Errors
///
/// `InvalidInput` if the slices differ in length or hold fewer than 3
/// points; `DegenerateInput` if either set is coincident or collinear.
pub fn fit_rigid(source: &[Point3], target: &[Point3]) -> Result<RigidTransform> {
    if source.len() != target.len() {
        return Err(MathError::InvalidInput(format!(
            "point sets differ in size ({} vs {})",
            source.len(),
            target.len()
        )));
    }
    if source.len() < 3 {
        return Err(MathError::InvalidInput(format!(
            "need at least 3 correspondences, got {}",
            source.len()
        )));
    }

    let cs = centroid(source);
    let ct = centroid(target);

    for (name, points, c) in [("source", source, cs), ("target", target, ct)] {
        let spread = spread_rank(points, &c);
        if spread < 2 {
            return Err(MathError::DegenerateInput(format!(
                "{} points are {}",
                name,
                if spread == 0 { "coincident" } else { "collinear" }
            )));
        }
    }

    let mut h = Matrix3::zeros();
    for (s, t) in source.iter().zip(target) {
        h += (s.coords - cs) * (t.coords - ct).transpose();
    }

    // `svd` returns singular values in descending order
    let svd = h.svd(true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => {
            return Err(MathError::DegenerateInput(
                "cross-covariance decomposition failed".into(),
            ))
        }
    };

    let v = v_t.transpose();
    let mut d = Matrix3::identity();
    if (v * u.transpose()).determinant() < 0.0 {
        d[(2, 2)] = -1.0;
    }
    let r = v * d * u.transpose();
    let rotation = Rotation3::from_matrix_unchecked(r);
    let translation = ct - rotation * cs;
    Ok(RigidTransform::new(rotation, translation))
}

fn centroid(points: &[Point3]) -> Vec3 {
    points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords) / points.len() as f64
}

/// Number of significant principal directions (0, 1, or 2+) of a point set.
fn spread_rank(points: &[Point3], c: &Vec3) -> usize {
    let mut cov = Matrix3::zeros();
    for p in points {
        let d = p.coords - c;
        cov += d * d.transpose();
    }
    let sv = cov.singular_values();
    let mut sorted = [sv[0], sv[1], sv[2]];
    sorted.sort_by(|a, b| b.total_cmp(a));
    if sorted[0] <= f64::MIN_POSITIVE {
        0
    } else if sorted[1] <= RANK_EPS * sorted[0] {
        1
    } else {
        2
    }
}
