//! Error taxonomy shared by kernel construction and the compute calls.
//!
//! Configure-time failures (`Configuration`, `SingularMatrix`) are fatal:
//! no kernels exist and no data can be processed. `Shape` is raised per
//! compute call; the call is rejected outright and produces no output.
//! None of these are recovered internally — retrying with different
//! parameters or skipping a block is the driver's decision.

use thiserror::Error;

/// Errors produced by the LPA attribute engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LpaError {
    /// Invalid window geometry or weight factor, rejected before any
    /// matrix work is attempted.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The weighted normal-equations matrix for the requested window is not
    /// invertible (degenerate geometry or weighting).
    #[error("weighted normal equations are singular for a {nx}x{ny}x{nz} window")]
    SingularMatrix {
        /// Window extent along x.
        nx: usize,
        /// Window extent along y.
        ny: usize,
        /// Window extent along z.
        nz: usize,
    },

    /// A supplied volume block does not cover the configured analysis
    /// window.
    #[error("volume block {got:?} does not cover the {need:?} analysis window")]
    Shape {
        /// Extents of the rejected block.
        got: (usize, usize, usize),
        /// Minimum extents required by the configured window.
        need: (usize, usize, usize),
    },
}
