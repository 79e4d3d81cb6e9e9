//! Attribute engine tying the components into a request/response surface.
//!
//! Overview
//! - Configure once: derive the analysis window from the survey parameters,
//!   build the deconvolution kernels (fail fast on bad geometry or a
//!   singular normal matrix) and precompute the tensor balance constant.
//! - Compute per block: correlate the ten kernels against the centre trace,
//!   then either emit the coefficient profiles directly or assemble the
//!   orientation tensor per sample and extract its sorted eigenvalues.
//!
//! The engine owns no loop and no I/O: the host driver calls
//! [`LpaEngine::compute_coefficients`] or
//! [`LpaEngine::compute_eigenvalues`] per window and drains the named
//! outputs itself. All compute methods take `&self`; one configured engine
//! can serve any number of worker threads concurrently.
//!
//! Modules
//! - [`params`] – survey-facing parameter types and defaults.
//! - `pipeline` – the [`LpaEngine`] implementation.

pub mod params;
mod pipeline;

pub use params::LpaParams;
pub use pipeline::LpaEngine;
