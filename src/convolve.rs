//! Centre-trace correlation of a deconvolution kernel with a data block.
//!
//! This is deliberately not a general 3D convolution: output is produced
//! only along z at the block's fixed central (x, y) position, the one trace
//! the host requests per step. That restriction turns an
//! O(X·Y·Z·Kx·Ky·Kz) sweep into O(Z·Kx·Ky·Kz) and is intrinsic to the
//! design; behaviour at non-centre (x, y) positions is out of contract.
//!
//! Kernel indices are traversed flipped on all three axes (correlation with
//! a flipped kernel, i.e. convolution convention), and the kernel's (x, y)
//! support is anchored at the block's own centre, so the block only needs
//! to be at least as large as the kernel laterally.

use crate::volume::Volume;
use std::ops::Range;

/// z indices for which the centre-trace correlation is defined.
///
/// Entries outside this range are left at their initial value and carry no
/// meaning; callers must not read them.
#[inline]
pub fn valid_z_range(block_nz: usize, kernel_nz: usize) -> Range<usize> {
    let half = kernel_nz / 2;
    half..block_nz.saturating_sub(half)
}

/// Correlate `kernel` with the central (x, y) trace of `block`.
///
/// Returns one value per z sample of the block; only indices inside
/// [`valid_z_range`] are defined, the rest stay zero by initialisation.
/// Extent preconditions are the caller's responsibility (the engine rejects
/// undersized blocks with a shape error before reaching this point).
pub fn correlate_center_trace(block: &Volume, kernel: &Volume) -> Vec<f64> {
    assert!(
        block.nx >= kernel.nx && block.ny >= kernel.ny && block.nz >= kernel.nz,
        "block {:?} smaller than kernel {:?}",
        block.extents(),
        kernel.extents()
    );

    let (kx, ky, kz) = kernel.extents();
    let (kx2, ky2, kz2) = (kx / 2, ky / 2, kz / 2);
    // Kernel anchored at the block centre laterally.
    let (bx2, by2) = (block.nx / 2, block.ny / 2);

    let mut out = vec![0.0; block.nz];
    for zi in valid_z_range(block.nz, kz) {
        let mut acc = 0.0;
        for ii in 0..kx {
            let bx = bx2 - kx2 + ii;
            for jj in 0..ky {
                let by = by2 - ky2 + jj;
                // Both z runs are contiguous; the kernel run is walked in
                // reverse for the index flip.
                let b0 = block.idx(bx, by, zi - kz2);
                let brow = &block.data[b0..b0 + kz];
                let k0 = kernel.idx(kx - 1 - ii, ky - 1 - jj, 0);
                let krow = &kernel.data[k0..k0 + kz];
                for (bv, kv) in brow.iter().zip(krow.iter().rev()) {
                    acc += bv * kv;
                }
            }
        }
        out[zi] = acc;
    }
    out
}
