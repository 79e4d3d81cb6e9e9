//! Parameter types configuring the attribute engine.
//!
//! Defaults mirror the common interactive setup: a one-trace step-out and a
//! one-sample symmetric z margin (a 3×3×3 window) with a weight factor of
//! 0.2.

use crate::error::LpaError;
use crate::window::{AnalysisWindow, StepOut, ZMargin};
use serde::{Deserialize, Serialize};

/// Engine-wide parameters in survey terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LpaParams {
    /// Lateral trace step-out; extents are `2·step + 1` per axis.
    pub step_out: StepOut,
    /// Inclusive vertical sample margin around the analysis sample.
    pub z_margin: ZMargin,
    /// Gaussian locality factor σ (> 0, typically in (0.1, 1.0]).
    pub weight_factor: f64,
}

impl Default for LpaParams {
    fn default() -> Self {
        Self {
            step_out: StepOut::default(),
            z_margin: ZMargin::default(),
            weight_factor: 0.2,
        }
    }
}

impl LpaParams {
    /// Analysis window implied by the survey parameters.
    pub fn window(&self) -> Result<AnalysisWindow, LpaError> {
        AnalysisWindow::from_survey(self.step_out, self.z_margin)
    }
}
