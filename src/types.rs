//! Result types emitted by the attribute engine.
//!
//! Output identifiers are part of the contract toward the host: the
//! coefficient variant emits `r0..r9` in model order, the eigenvalue
//! variant emits `e1, e2, e3` in descending order. Profiles span the full
//! z extent of the block that produced them; only indices inside `valid`
//! are defined, the rest are zero-filled placeholders callers must not
//! read.

use crate::kernel::NUM_COEFFS;
use serde::Serialize;
use std::ops::Range;

/// Names of the coefficient outputs, in model order.
pub const COEFFICIENT_OUTPUTS: [&str; NUM_COEFFS] =
    ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9"];

/// Names of the eigenvalue outputs, in descending order.
pub const EIGENVALUE_OUTPUTS: [&str; 3] = ["e1", "e2", "e3"];

/// The ten per-sample polynomial coefficient profiles of one block.
#[derive(Clone, Debug, Serialize)]
pub struct CoefficientProfiles {
    /// One profile per coefficient, `r[k][z]`, each of the block's z length.
    pub r: [Vec<f64>; NUM_COEFFS],
    /// z indices for which the profiles are defined.
    pub valid: Range<usize>,
}

impl CoefficientProfiles {
    /// Profile for coefficient `k` (0 ≤ k < [`NUM_COEFFS`]).
    #[inline]
    pub fn profile(&self, k: usize) -> &[f64] {
        &self.r[k]
    }

    /// Look up a profile by its output name (`"r0"`..`"r9"`).
    pub fn by_name(&self, name: &str) -> Option<&[f64]> {
        COEFFICIENT_OUTPUTS
            .iter()
            .position(|n| *n == name)
            .map(|k| self.r[k].as_slice())
    }

    /// Iterate `(name, profile)` pairs in output order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &[f64])> {
        COEFFICIENT_OUTPUTS
            .iter()
            .copied()
            .zip(self.r.iter().map(|p| p.as_slice()))
    }
}

/// The three sorted eigenvalue profiles of one block.
#[derive(Clone, Debug, Serialize)]
pub struct EigenProfiles {
    /// Largest eigenvalue per z sample.
    pub e1: Vec<f64>,
    /// Middle eigenvalue per z sample.
    pub e2: Vec<f64>,
    /// Smallest eigenvalue per z sample.
    pub e3: Vec<f64>,
    /// z indices for which the profiles are defined.
    pub valid: Range<usize>,
}

impl EigenProfiles {
    /// Look up a profile by its output name (`"e1"`, `"e2"`, `"e3"`).
    pub fn by_name(&self, name: &str) -> Option<&[f64]> {
        match name {
            "e1" => Some(&self.e1),
            "e2" => Some(&self.e2),
            "e3" => Some(&self.e3),
            _ => None,
        }
    }

    /// Iterate `(name, profile)` pairs in output order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &[f64])> {
        [
            (EIGENVALUE_OUTPUTS[0], self.e1.as_slice()),
            (EIGENVALUE_OUTPUTS[1], self.e2.as_slice()),
            (EIGENVALUE_OUTPUTS[2], self.e3.as_slice()),
        ]
        .into_iter()
    }
}
