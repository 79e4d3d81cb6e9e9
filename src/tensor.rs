//! Orientation-tensor assembly and eigenvalue extraction.
//!
//! From the nine non-constant fit coefficients of one sample the engine
//! builds the Farnebäck orientation tensor `T = Ah·Ahᵀ + γ·g·gᵀ`, where
//! `Ah` is the symmetric curvature block, `g` the gradient vector and `γ`
//! a window-derived constant balancing first-derivative energy against
//! second-derivative energy. `T` is symmetric positive semi-definite by
//! construction, so its three eigenvalues are real and non-negative up to
//! floating error.

use crate::kernel::NUM_COEFFS;
use crate::window::AnalysisWindow;
use nalgebra::{Matrix3, SymmetricEigen, Vector3};

/// Gradient/curvature balance constant for a window geometry:
/// `γ = 1 / (8·((min extent − 1)·σ)²)`.
///
/// Computed once per configuration; well-defined whenever kernel
/// construction succeeded (a min extent of 1 is always singular there).
pub fn balance_factor(window: AnalysisWindow, weight_factor: f64) -> f64 {
    let scale = (window.min_extent() - 1) as f64 * weight_factor;
    1.0 / (8.0 * scale * scale)
}

/// Assemble the orientation tensor for one sample.
///
/// Takes the full coefficient vector in model order; `c[0]` (the constant
/// term) does not enter the tensor.
pub fn assemble_tensor(c: &[f64; NUM_COEFFS], gamma: f64) -> Matrix3<f64> {
    let curvature = Matrix3::new(
        c[4],
        0.5 * c[7],
        0.5 * c[8],
        0.5 * c[7],
        c[5],
        0.5 * c[9],
        0.5 * c[8],
        0.5 * c[9],
        c[6],
    );
    let gradient = Vector3::new(c[1], c[2], c[3]);
    curvature * curvature.transpose() + (gradient * gradient.transpose()) * gamma
}

/// Eigenvalues of a symmetric 3×3 tensor, sorted descending.
///
/// A near-zero tensor legitimately yields near-zero eigenvalues (flat or
/// isotropic local structure); there is no error path for well-formed
/// input.
pub fn eigenvalues_descending(tensor: &Matrix3<f64>) -> [f64; 3] {
    let eigen = SymmetricEigen::new(*tensor);
    let mut values = [
        eigen.eigenvalues[0],
        eigen.eigenvalues[1],
        eigen.eigenvalues[2],
    ];
    values.sort_by(|a, b| b.total_cmp(a));
    values
}
