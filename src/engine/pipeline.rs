//! Engine pipeline driving one analysis block end-to-end.
//!
//! Typical usage:
//! ```
//! use lpa_tensor::{LpaEngine, LpaParams, Volume};
//!
//! # fn main() -> Result<(), lpa_tensor::LpaError> {
//! let engine = LpaEngine::configure(LpaParams::default())?;
//! let block = Volume::from_fn(3, 3, 9, |_, _, z| z as f64);
//! let eigen = engine.compute_eigenvalues(&block)?;
//! for z in eigen.valid.clone() {
//!     assert!(eigen.e1[z] >= eigen.e3[z]);
//! }
//! # Ok(())
//! # }
//! ```

use super::params::LpaParams;
use crate::convolve::{correlate_center_trace, valid_z_range};
use crate::error::LpaError;
use crate::kernel::{KernelSet, NUM_COEFFS};
use crate::tensor::{assemble_tensor, balance_factor, eigenvalues_descending};
use crate::types::{CoefficientProfiles, EigenProfiles};
use crate::volume::Volume;
use crate::window::AnalysisWindow;
use log::debug;
use std::time::Instant;

/// Configured attribute engine holding the immutable kernel set.
///
/// Built once per configuration; compute methods take `&self` and share no
/// mutable state, so one engine may serve many threads.
pub struct LpaEngine {
    window: AnalysisWindow,
    weight_factor: f64,
    kernels: KernelSet,
    gamma: f64,
}

impl LpaEngine {
    /// Configure from survey parameters. Fails fast: parameter validation
    /// first, then the kernel solve, before any data is accepted.
    pub fn configure(params: LpaParams) -> Result<Self, LpaError> {
        let window = params.window()?;
        Self::with_window(window, params.weight_factor)
    }

    /// Configure from explicit window extents.
    pub fn with_window(window: AnalysisWindow, weight_factor: f64) -> Result<Self, LpaError> {
        let start = Instant::now();
        let kernels = KernelSet::build(window, weight_factor)?;
        let gamma = balance_factor(window, weight_factor);
        debug!(
            "LpaEngine::configure window={}x{}x{} wf={} gamma={:.6} kernels built in {:.3} ms",
            window.nx,
            window.ny,
            window.nz,
            weight_factor,
            gamma,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self {
            window,
            weight_factor,
            kernels,
            gamma,
        })
    }

    /// Window geometry the engine was configured with.
    #[inline]
    pub fn window(&self) -> AnalysisWindow {
        self.window
    }

    /// Gaussian locality factor the engine was configured with.
    #[inline]
    pub fn weight_factor(&self) -> f64 {
        self.weight_factor
    }

    /// Gradient/curvature balance constant of this configuration.
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// The configured deconvolution kernels.
    #[inline]
    pub fn kernels(&self) -> &KernelSet {
        &self.kernels
    }

    fn check_shape(&self, block: &Volume) -> Result<(), LpaError> {
        let w = self.window;
        if block.nx < w.nx || block.ny < w.ny || block.nz < w.nz {
            return Err(LpaError::Shape {
                got: block.extents(),
                need: (w.nx, w.ny, w.nz),
            });
        }
        Ok(())
    }

    /// Fit the quadratic model along the centre trace of `block` and return
    /// the ten coefficient profiles (`r0..r9`).
    ///
    /// The block must cover the configured window in x and y and be at
    /// least as long in z; an undersized block is rejected with
    /// [`LpaError::Shape`] and produces no output.
    pub fn compute_coefficients(&self, block: &Volume) -> Result<CoefficientProfiles, LpaError> {
        self.check_shape(block)?;
        let start = Instant::now();
        let r = self.correlate_all(block);
        debug!(
            "compute_coefficients block={:?} in {:.3} ms",
            block.extents(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(CoefficientProfiles {
            r,
            valid: valid_z_range(block.nz, self.window.nz),
        })
    }

    /// Fit the quadratic model, assemble the orientation tensor per valid z
    /// sample and return its sorted eigenvalue profiles (`e1, e2, e3`).
    pub fn compute_eigenvalues(&self, block: &Volume) -> Result<EigenProfiles, LpaError> {
        let coeffs = self.compute_coefficients(block)?;
        let start = Instant::now();
        let nz = block.nz;
        let mut e1 = vec![0.0; nz];
        let mut e2 = vec![0.0; nz];
        let mut e3 = vec![0.0; nz];
        for z in coeffs.valid.clone() {
            let c: [f64; NUM_COEFFS] = core::array::from_fn(|k| coeffs.r[k][z]);
            let tensor = assemble_tensor(&c, self.gamma);
            let [l1, l2, l3] = eigenvalues_descending(&tensor);
            e1[z] = l1;
            e2[z] = l2;
            e3[z] = l3;
        }
        debug!(
            "compute_eigenvalues block={:?} in {:.3} ms",
            block.extents(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(EigenProfiles {
            e1,
            e2,
            e3,
            valid: coeffs.valid,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn correlate_all(&self, block: &Volume) -> [Vec<f64>; NUM_COEFFS] {
        core::array::from_fn(|k| correlate_center_trace(block, self.kernels.kernel(k)))
    }

    #[cfg(feature = "parallel")]
    fn correlate_all(&self, block: &Volume) -> [Vec<f64>; NUM_COEFFS] {
        use rayon::prelude::*;

        let profiles: Vec<Vec<f64>> = (0..NUM_COEFFS)
            .into_par_iter()
            .map(|k| correlate_center_trace(block, self.kernels.kernel(k)))
            .collect();
        profiles
            .try_into()
            .expect("one profile per coefficient kernel")
    }
}
