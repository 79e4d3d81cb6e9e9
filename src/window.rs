//! Analysis-window geometry and its validation.
//!
//! The window is parameterised the way the host survey describes it: a
//! lateral trace [`StepOut`] and an inclusive vertical [`ZMargin`] around
//! the analysis sample. [`AnalysisWindow`] holds the resulting extents and
//! can also be built from raw extents directly. A window must contain at
//! least [`AnalysisWindow::MIN_POINTS`] grid points, the number of unknowns
//! of the quadratic model.

use crate::error::LpaError;
use serde::{Deserialize, Serialize};

/// Lateral trace step-out defining the (x, y) footprint of the window.
///
/// A step-out of `s` traces on an axis yields an extent of `2·s + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOut {
    /// Inline (x) step-out in traces.
    pub inl: usize,
    /// Crossline (y) step-out in traces.
    pub crl: usize,
}

impl Default for StepOut {
    fn default() -> Self {
        Self { inl: 1, crl: 1 }
    }
}

/// Inclusive vertical sample margin around the analysis sample.
///
/// `from ≤ 0 ≤ to`; the window z extent is `to − from + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZMargin {
    /// First sample of the margin, relative to the analysis sample (≤ 0).
    pub from: i32,
    /// Last sample of the margin, relative to the analysis sample (≥ 0).
    pub to: i32,
}

impl Default for ZMargin {
    fn default() -> Self {
        Self { from: -1, to: 1 }
    }
}

impl ZMargin {
    /// Number of samples covered by the margin.
    pub fn extent(&self) -> Result<usize, LpaError> {
        if self.from > 0 || self.to < 0 {
            return Err(LpaError::Configuration(format!(
                "z margin [{}, {}] must straddle the analysis sample",
                self.from, self.to
            )));
        }
        Ok((self.to - self.from + 1) as usize)
    }
}

/// Extents of the local analysis window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    /// Extent along x.
    pub nx: usize,
    /// Extent along y.
    pub ny: usize,
    /// Extent along z.
    pub nz: usize,
}

impl AnalysisWindow {
    /// Minimum number of grid points: one per unknown of the quadratic model.
    pub const MIN_POINTS: usize = 10;

    /// Build a window from raw extents, validating the point count.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, LpaError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(LpaError::Configuration(format!(
                "window extents {nx}x{ny}x{nz} must all be positive"
            )));
        }
        if nx * ny * nz < Self::MIN_POINTS {
            return Err(LpaError::Configuration(format!(
                "window {nx}x{ny}x{nz} holds {} points, need at least {}",
                nx * ny * nz,
                Self::MIN_POINTS
            )));
        }
        Ok(Self { nx, ny, nz })
    }

    /// Build a window from survey step-out and vertical margin.
    pub fn from_survey(step_out: StepOut, z_margin: ZMargin) -> Result<Self, LpaError> {
        let nz = z_margin.extent()?;
        Self::new(2 * step_out.inl + 1, 2 * step_out.crl + 1, nz)
    }

    /// Number of grid points in the window.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Smallest of the three extents.
    #[inline]
    pub fn min_extent(&self) -> usize {
        self.nx.min(self.ny).min(self.nz)
    }
}
