//! Small dense linear algebra helpers.
//!
//! Everything here works on nalgebra's fixed-size 3×3 (and 2×2) types:
//! outer products, Householder reflections, axis-angle rotations, a
//! symmetric eigen-decomposition with a stable eigenvalue order, and the
//! Givens rotation search used by the Taubin95 estimator.

mod givens;
mod linalg;

pub use givens::{closed_form_givens_rotation, find_best_givens_rotation};
pub use linalg::{
    householder_frame, householder_reflection, outer_product, rotation_matrix,
    symmetric_eigen_decompose, tangent_projector,
};
