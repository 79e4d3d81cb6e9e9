#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod engine;
pub mod error;
pub mod types;
pub mod volume;
pub mod window;

// Numeric building blocks – public for tools and advanced callers, but the
// engine facade is the supported entry point.
pub mod convolve;
pub mod kernel;
pub mod tensor;

// --- High-level re-exports -------------------------------------------------

// Main entry points: engine + parameters.
pub use crate::engine::{LpaEngine, LpaParams};
pub use crate::error::LpaError;

// Result types carrying the named outputs.
pub use crate::types::{
    CoefficientProfiles, EigenProfiles, COEFFICIENT_OUTPUTS, EIGENVALUE_OUTPUTS,
};

// Core data types.
pub use crate::kernel::{KernelSet, NUM_COEFFS};
pub use crate::volume::Volume;
pub use crate::window::{AnalysisWindow, StepOut, ZMargin};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use lpa_tensor::prelude::*;
///
/// # fn main() -> Result<(), LpaError> {
/// let engine = LpaEngine::configure(LpaParams::default())?;
/// let block = Volume::from_fn(3, 3, 7, |_, _, z| (z * z) as f64);
/// let coeffs = engine.compute_coefficients(&block)?;
/// assert_eq!(coeffs.valid, 1..6);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::error::LpaError;
    pub use crate::volume::Volume;
    pub use crate::{LpaEngine, LpaParams};
}
