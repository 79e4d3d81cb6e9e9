//! Deconvolution-kernel construction for the quadratic fit.
//!
//! Overview
//! - Lays a centred coordinate grid over the analysis window; for an axis of
//!   extent `n` the coordinates run from `−(n−1)/2` to `(n−1)/2`.
//! - Weights every grid point with an axis-scaled Gaussian,
//!   `σ_axis = σ·(extent−1)`.
//! - Builds the N×10 design matrix of quadratic monomials
//!   `{1, x, y, z, x², y², z², xy, xz, yz}` over the flattened grid and
//!   solves the weighted normal equations for the pseudoinverse operator
//!   `D = (AᵀWA)⁻¹AᵀW`.
//! - Reshapes each of the ten rows of `D` into an `(nx, ny, nz)` kernel.
//!   Correlating kernel `k` with raw data yields the k-th least-squares
//!   coefficient directly.
//!
//! Construction runs once per configuration and the result is immutable;
//! the 10×10 solve either succeeds up front or fails with
//! [`LpaError::SingularMatrix`] before any data is touched.

use crate::error::LpaError;
use crate::volume::Volume;
use crate::window::AnalysisWindow;
use nalgebra::{Cholesky, DMatrix};

/// Number of coefficients of the quadratic model, and of kernels in a set.
pub const NUM_COEFFS: usize = 10;

/// Immutable set of ten deconvolution kernels for one window geometry.
///
/// Kernel `k` corresponds to coefficient `k` of the model
/// `r0 + r1·x + r2·y + r3·z + r4·x² + r5·y² + r6·z² + r7·xy + r8·xz + r9·yz`.
#[derive(Clone, Debug)]
pub struct KernelSet {
    window: AnalysisWindow,
    weight_factor: f64,
    kernels: [Volume; NUM_COEFFS],
}

impl KernelSet {
    /// Build the kernel set for `window` with Gaussian locality
    /// `weight_factor`.
    ///
    /// Fails with [`LpaError::Configuration`] for a non-positive or
    /// non-finite weight factor and with [`LpaError::SingularMatrix`] when
    /// the weighted normal-equations matrix has no inverse (degenerate
    /// window geometry, e.g. an axis of extent 1).
    pub fn build(window: AnalysisWindow, weight_factor: f64) -> Result<Self, LpaError> {
        if !weight_factor.is_finite() || weight_factor <= 0.0 {
            return Err(LpaError::Configuration(format!(
                "weight factor {weight_factor} must be positive and finite"
            )));
        }

        let (nx, ny, nz) = (window.nx, window.ny, window.nz);
        let n = window.point_count();

        // Exponent scale per axis; an extent-1 axis contributes nothing to
        // the exponent (its sole coordinate is 0).
        let exponent_scale = |extent: usize| -> f64 {
            if extent < 2 {
                return 0.0;
            }
            let sigma = weight_factor * (extent - 1) as f64;
            1.0 / (2.0 * sigma * sigma)
        };
        let (qx, qy, qz) = (exponent_scale(nx), exponent_scale(ny), exponent_scale(nz));
        let (cx, cy, cz) = (
            (nx as f64 - 1.0) / 2.0,
            (ny as f64 - 1.0) / 2.0,
            (nz as f64 - 1.0) / 2.0,
        );

        // Design matrix A and the row-scaled product W·A over the flattened
        // grid, x-major with z fastest (the Volume layout).
        let mut design = DMatrix::<f64>::zeros(n, NUM_COEFFS);
        let mut weighted = DMatrix::<f64>::zeros(n, NUM_COEFFS);
        let mut row = 0usize;
        for ix in 0..nx {
            let x = ix as f64 - cx;
            for iy in 0..ny {
                let y = iy as f64 - cy;
                for iz in 0..nz {
                    let z = iz as f64 - cz;
                    let w = (-(x * x * qx + y * y * qy + z * z * qz)).exp();
                    let monomials = [
                        1.0,
                        x,
                        y,
                        z,
                        x * x,
                        y * y,
                        z * z,
                        x * y,
                        x * z,
                        y * z,
                    ];
                    for (col, m) in monomials.iter().enumerate() {
                        design[(row, col)] = *m;
                        weighted[(row, col)] = *m * w;
                    }
                    row += 1;
                }
            }
        }

        // AᵀWA is symmetric; a failed Cholesky factorisation is exactly the
        // rank-deficiency signal that must surface before any data flows.
        let normal = design.transpose() * &weighted;
        let chol = Cholesky::new(normal)
            .ok_or(LpaError::SingularMatrix { nx, ny, nz })?;

        // D = (AᵀWA)⁻¹AᵀW; W is diagonal, so AᵀW = (W·A)ᵀ.
        let deconv = chol.solve(&weighted.transpose());

        // Each row is stored axis-reversed (one flat reversal reverses all
        // three axes in this layout): the correlation traverses kernel
        // indices flipped, and the two reversals cancel so kernel k applied
        // to a sampled quadratic yields coefficient k with its proper sign.
        let kernels = core::array::from_fn(|k| {
            let mut vol = Volume::zeros(nx, ny, nz);
            for i in 0..n {
                vol.data[i] = deconv[(k, n - 1 - i)];
            }
            vol
        });

        Ok(Self {
            window,
            weight_factor,
            kernels,
        })
    }

    /// Window geometry the set was built for.
    #[inline]
    pub fn window(&self) -> AnalysisWindow {
        self.window
    }

    /// Gaussian locality factor the set was built with.
    #[inline]
    pub fn weight_factor(&self) -> f64 {
        self.weight_factor
    }

    /// Kernel for coefficient `k` (0 ≤ k < [`NUM_COEFFS`]).
    #[inline]
    pub fn kernel(&self, k: usize) -> &Volume {
        &self.kernels[k]
    }

    /// All ten kernels in coefficient order.
    #[inline]
    pub fn kernels(&self) -> &[Volume; NUM_COEFFS] {
        &self.kernels
    }
}

#[cfg(test)]
mod tests {
    use super::{KernelSet, NUM_COEFFS};
    use crate::convolve::correlate_center_trace;
    use crate::error::LpaError;
    use crate::volume::Volume;
    use crate::window::AnalysisWindow;

    const TOL: f64 = 1e-9;

    fn monomial(col: usize, x: f64, y: f64, z: f64) -> f64 {
        match col {
            0 => 1.0,
            1 => x,
            2 => y,
            3 => z,
            4 => x * x,
            5 => y * y,
            6 => z * z,
            7 => x * y,
            8 => x * z,
            9 => y * z,
            _ => unreachable!(),
        }
    }

    /// Applying kernel k to a pure monomial j sampled over the window must
    /// reproduce δ_kj at the window centre, signs included.
    #[test]
    fn kernels_are_exact_on_the_model_class() {
        for (nx, ny, nz, wf) in [(3, 3, 3, 0.2), (5, 5, 5, 0.2), (3, 5, 7, 0.7)] {
            let window = AnalysisWindow::new(nx, ny, nz).unwrap();
            let set = KernelSet::build(window, wf).unwrap();
            let (cx, cy, cz) = ((nx / 2) as f64, (ny / 2) as f64, (nz / 2) as f64);
            for j in 0..NUM_COEFFS {
                let block = Volume::from_fn(nx, ny, nz, |x, y, z| {
                    monomial(j, x as f64 - cx, y as f64 - cy, z as f64 - cz)
                });
                for k in 0..NUM_COEFFS {
                    let out = correlate_center_trace(&block, set.kernel(k));
                    let expected = if k == j { 1.0 } else { 0.0 };
                    assert!(
                        (out[nz / 2] - expected).abs() < TOL,
                        "window {nx}x{ny}x{nz} wf {wf}: kernel {k} on monomial {j} gave {}",
                        out[nz / 2]
                    );
                }
            }
        }
    }

    /// The stored rows, read axis-reversed, satisfy D·A = I; this also holds
    /// for even extents, where the window centre falls between samples.
    #[test]
    fn reversed_rows_invert_the_design_matrix() {
        let (nx, ny, nz, wf) = (5, 3, 4, 0.35);
        let window = AnalysisWindow::new(nx, ny, nz).unwrap();
        let set = KernelSet::build(window, wf).unwrap();
        let n = window.point_count();
        let (cx, cy, cz) = (
            (nx as f64 - 1.0) / 2.0,
            (ny as f64 - 1.0) / 2.0,
            (nz as f64 - 1.0) / 2.0,
        );
        for k in 0..NUM_COEFFS {
            let kern = set.kernel(k);
            for j in 0..NUM_COEFFS {
                let mut dot = 0.0;
                for ix in 0..nx {
                    for iy in 0..ny {
                        for iz in 0..nz {
                            let m = monomial(j, ix as f64 - cx, iy as f64 - cy, iz as f64 - cz);
                            dot += kern.data[n - 1 - kern.idx(ix, iy, iz)] * m;
                        }
                    }
                }
                let expected = if k == j { 1.0 } else { 0.0 };
                assert!(
                    (dot - expected).abs() < TOL,
                    "kernel {k} on monomial {j} gave {dot}"
                );
            }
        }
    }

    #[test]
    fn kernel_shapes_match_the_window() {
        let window = AnalysisWindow::new(3, 5, 7).unwrap();
        let set = KernelSet::build(window, 0.2).unwrap();
        for k in 0..NUM_COEFFS {
            assert_eq!(set.kernel(k).extents(), (3, 5, 7));
        }
    }

    #[test]
    fn degenerate_axis_is_singular() {
        // 1x2x5 has 10 points but the x monomial columns vanish.
        let window = AnalysisWindow::new(1, 2, 5).unwrap();
        let err = KernelSet::build(window, 0.2).unwrap_err();
        assert_eq!(err, LpaError::SingularMatrix { nx: 1, ny: 2, nz: 5 });
    }

    #[test]
    fn non_positive_weight_factor_is_rejected() {
        let window = AnalysisWindow::new(3, 3, 3).unwrap();
        assert!(matches!(
            KernelSet::build(window, 0.0),
            Err(LpaError::Configuration(_))
        ));
        assert!(matches!(
            KernelSet::build(window, -0.5),
            Err(LpaError::Configuration(_))
        ));
        assert!(matches!(
            KernelSet::build(window, f64::NAN),
            Err(LpaError::Configuration(_))
        ));
    }
}
