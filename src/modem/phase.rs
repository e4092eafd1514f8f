//! Phase shift keying: M-ary PSK plus the table-free BPSK/QPSK fast paths
//!
//! PSK places Gray-coded index `g` at phase `2·alpha·g`. Demodulation
//! shifts the received phase by `d_phi` so the `M` phases line up with the
//! levels of a linear axis, then slices it with the reference table.

use std::f32::consts::{FRAC_1_SQRT_2, PI, TAU};

use num_complex::Complex32;

use super::params::{psk_alpha, psk_d_phi};
use super::SymbolMapper;
use crate::dsp::gray::{gray_decode, gray_encode};
use crate::dsp::slicer::{reference_table, slice_linear};

/// Phase-domain parameters shared by PSK and DPSK
#[derive(Debug, Clone)]
pub struct PhaseParams {
    pub alpha: f32,
    pub d_phi: f32,
    pub reference: Vec<f32>,
}

impl PhaseParams {
    pub fn new(m: u32) -> Self {
        let size = 1u32 << m;
        let alpha = psk_alpha(size);
        Self {
            alpha,
            d_phi: psk_d_phi(size),
            reference: reference_table(m, alpha),
        }
    }

    /// Phase of (binary) index `index`
    #[inline]
    pub fn phase_of(&self, index: u32) -> f32 {
        2.0 * self.alpha * index as f32
    }

    /// Slice a phase in `[-π, π]` back to its binary index
    pub fn slice(&self, theta: f32) -> u32 {
        let mut t = theta - self.d_phi;
        if t < -PI {
            t += TAU;
        }
        slice_linear(t, &self.reference).0
    }
}

/// M-ary phase shift keying
#[derive(Debug, Clone)]
pub struct Psk {
    pub params: PhaseParams,
}

impl Psk {
    pub fn new(m: u32) -> Self {
        Self {
            params: PhaseParams::new(m),
        }
    }
}

impl SymbolMapper for Psk {
    fn modulate(&mut self, symbol: u32) -> Complex32 {
        Complex32::from_polar(1.0, self.params.phase_of(gray_decode(symbol)))
    }

    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32) {
        let index = self.params.slice(sample.arg());
        let ideal = Complex32::from_polar(1.0, self.params.phase_of(index));
        (gray_encode(index), ideal)
    }
}

/// Binary phase shift keying: 0 → +1, 1 → -1
#[derive(Debug, Clone, Copy, Default)]
pub struct Bpsk;

impl SymbolMapper for Bpsk {
    fn modulate(&mut self, symbol: u32) -> Complex32 {
        if symbol & 1 == 0 {
            Complex32::new(1.0, 0.0)
        } else {
            Complex32::new(-1.0, 0.0)
        }
    }

    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32) {
        let symbol = u32::from(sample.re <= 0.0);
        (symbol, self.modulate(symbol))
    }
}

/// Quaternary phase shift keying: bit 0 sets the sign of I, bit 1 the sign of Q
#[derive(Debug, Clone, Copy, Default)]
pub struct Qpsk;

impl SymbolMapper for Qpsk {
    fn modulate(&mut self, symbol: u32) -> Complex32 {
        let i = if symbol & 0x01 == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        let q = if symbol & 0x02 == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        Complex32::new(i, q)
    }

    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32) {
        let symbol = u32::from(sample.re < 0.0) | (u32::from(sample.im < 0.0) << 1);
        (symbol, self.modulate(symbol))
    }
}
