//! Small dense linear algebra on 3×3 matrices.
//!
//! Thin helpers over nalgebra used by the curvature estimators.

use nalgebra::{Matrix3, Rotation3, SymmetricEigen, Unit, Vector3};

/// Iteration cap for the symmetric eigen solver. Finite 3×3 input converges
/// in a handful of sweeps.
const EIGEN_MAX_ITERATIONS: usize = 1000;

/// Outer product `a bᵀ`, with entry `(i, j) = a[i] * b[j]`.
#[inline]
pub fn outer_product(a: &Vector3<f64>, b: &Vector3<f64>) -> Matrix3<f64> {
    a * b.transpose()
}

/// Householder reflection `I - 2 w wᵀ` for a unit vector `w`.
#[inline]
pub fn householder_reflection(w: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::identity() - outer_product(w, w) * 2.0
}

/// Householder reflection mapping the x axis onto `±n`.
///
/// Uses `w = e1 - n` or `w = e1 + n`, whichever is longer, to avoid
/// cancellation. Column 0 of the result is parallel to `n`; columns 1 and 2
/// span the plane orthogonal to it.
pub fn householder_frame(n: &Vector3<f64>) -> Matrix3<f64> {
    let e1 = Vector3::x();
    let minus = e1 - n;
    let plus = e1 + n;
    let w = if minus.norm_squared() > plus.norm_squared() {
        minus
    } else {
        plus
    };
    householder_reflection(&w.normalize())
}

/// Tangent-plane projector `I - n nᵀ` for a unit normal `n`.
#[inline]
pub fn tangent_projector(n: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::identity() - outer_product(n, n)
}

/// Rotation by `angle` radians around `axis` (right-handed).
///
/// The axis need not be normalized. A zero axis yields a NaN matrix.
pub fn rotation_matrix(axis: &Vector3<f64>, angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle).into_inner()
}

/// Eigen-decomposition of a symmetric 3×3 matrix.
///
/// Returns the eigenvalues in ascending order and the matching unit
/// eigenvectors as columns: column `i` belongs to eigenvalue `i`. Only the
/// lower triangle of `m` is read. Singular input is fine. Input with NaN or
/// infinite entries yields NaN everywhere instead of failing.
pub fn symmetric_eigen_decompose(m: &Matrix3<f64>) -> (Vector3<f64>, Matrix3<f64>) {
    let degenerate = || (Vector3::repeat(f64::NAN), Matrix3::repeat(f64::NAN));
    if !m.iter().all(|x| x.is_finite()) {
        return degenerate();
    }
    let Some(eig) = SymmetricEigen::try_new(*m, f64::EPSILON, EIGEN_MAX_ITERATIONS) else {
        return degenerate();
    };

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eig.eigenvalues[a].total_cmp(&eig.eigenvalues[b]));

    let values = Vector3::new(
        eig.eigenvalues[order[0]],
        eig.eigenvalues[order[1]],
        eig.eigenvalues[order[2]],
    );
    let vectors = Matrix3::from_columns(&[
        eig.eigenvectors.column(order[0]).into_owned(),
        eig.eigenvectors.column(order[1]).into_owned(),
        eig.eigenvectors.column(order[2]).into_owned(),
    ]);
    (values, vectors)
}
