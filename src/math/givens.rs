//! Givens rotations diagonalizing a symmetric 2×2 block.
//!
//! Given the block `[[a, b], [b, d]]`, a rotation `S = [[c, s], [-s, c]]`
//! makes `Sᵀ B S` diagonal when `c·s·(a - d) + (c² - s²)·b = 0`. The
//! functions here take `alpha = a - d` and `beta = b`.

/// Four-candidate search for the rotation `(c, s)` diagonalizing a block.
///
/// Solves the quadratic in `h` derived from the diagonalization condition,
/// then for each root the quadratic in the half-angle tangent `t`, and
/// converts each `t` to `c = (1 - t²)/(1 + t²)`, `s = 2t/(1 + t²)`. The
/// candidate minimizing `|1 - |acos(c)/asin(s)|| + |c·s·alpha + (c² - s²)·beta|`
/// wins.
///
/// Starts from the identity rotation: when no candidate has a finite error
/// (`beta == 0`, an already diagonal block) `(1, 0)` is returned.
pub fn find_best_givens_rotation(alpha: f64, beta: f64) -> (f64, f64) {
    let delta = (4.0 * alpha * alpha + 16.0 * beta * beta).sqrt();
    let h = [
        (2.0 * alpha + delta) / (2.0 * beta),
        (2.0 * alpha - delta) / (2.0 * beta),
    ];

    let mut best = (1.0, 0.0);
    let mut min_error = f64::INFINITY;
    for hi in h {
        let delta = (hi * hi + 4.0).sqrt();
        let t = [(hi + delta) / 2.0, (hi - delta) / 2.0];

        for tj in t {
            let squared = tj * tj;
            let denominator = 1.0 + squared;
            let s = (2.0 * tj) / denominator;
            let c = (1.0 - squared) / denominator;

            let approximation = c * s * alpha + (c * c - s * s) * beta;
            let angle_similarity = (c.acos() / s.asin()).abs();
            let error = (1.0 - angle_similarity).abs() + approximation.abs();
            if error < min_error {
                min_error = error;
                best = (c, s);
            }
        }
    }
    best
}

/// Closed-form rotation `(c, s)` diagonalizing a block.
///
/// `θ = atan2(-2·beta, alpha) / 2`. Agrees with
/// [`find_best_givens_rotation`] up to the choice among equivalent rotations
/// (which swaps or negates the resulting axes), so values derived from it
/// can differ in order and directions in sign.
pub fn closed_form_givens_rotation(alpha: f64, beta: f64) -> (f64, f64) {
    let theta = 0.5 * (-2.0 * beta).atan2(alpha);
    (theta.cos(), theta.sin())
}
