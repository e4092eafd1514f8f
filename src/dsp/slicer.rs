//! Reference-table slicing
//!
//! A width-`m` linear axis places its `2^m` levels at `(2s - M + 1) * alpha`.
//! With `ref[k] = 2^k * alpha` every level is the signed sum `Σ ±ref[k]`,
//! so a received value can be sliced back to its index one bit at a time
//! (MSB first) instead of scanning all `M` levels.

/// Build the per-bit reference table `ref[k] = 2^k * alpha`, `k = 0..m`
pub fn reference_table(m: u32, alpha: f32) -> Vec<f32> {
    (0..m).map(|k| (1u32 << k) as f32 * alpha).collect()
}

/// Amplitude of level `index` on an axis with `levels` points
#[inline]
pub fn linear_level(index: u32, levels: u32, alpha: f32) -> f32 {
    (2 * index as i64 - levels as i64 + 1) as f32 * alpha
}

/// Slice `v` against a reference table.
///
/// Returns the level index and the residual left after subtracting the
/// chosen level.
pub fn slice_linear(mut v: f32, reference: &[f32]) -> (u32, f32) {
    let mut s = 0u32;
    for r in reference.iter().rev() {
        s <<= 1;
        if v > 0.0 {
            s |= 1;
            v -= r;
        } else {
            v += r;
        }
    }
    (s, v)
}
