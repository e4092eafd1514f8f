//! Amplitude families: ASK on the real axis, QAM on both axes
//!
//! Each axis is a Gray-coded linear array of levels `(2g - M + 1)·alpha`.
//! QAM splits the symbol into an in-phase part (high `m_i` bits) and a
//! quadrature part (low `m_q` bits) and treats each as its own ASK axis.

use num_complex::Complex32;

use super::params::{ask_alpha, qam_alpha, QamSplit};
use super::SymbolMapper;
use crate::dsp::gray::{gray_decode, gray_encode};
use crate::dsp::slicer::{linear_level, reference_table, slice_linear};

/// Pulse amplitude modulation on the in-phase axis
#[derive(Debug, Clone)]
pub struct Ask {
    pub size: u32,
    pub alpha: f32,
    pub reference: Vec<f32>,
}

impl Ask {
    pub fn new(m: u32) -> Self {
        let size = 1u32 << m;
        let alpha = ask_alpha(size);
        Self {
            size,
            alpha,
            reference: reference_table(m, alpha),
        }
    }
}

impl SymbolMapper for Ask {
    fn modulate(&mut self, symbol: u32) -> Complex32 {
        Complex32::new(linear_level(gray_decode(symbol), self.size, self.alpha), 0.0)
    }

    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32) {
        let (index, _) = slice_linear(sample.re, &self.reference);
        let ideal = Complex32::new(linear_level(index, self.size, self.alpha), 0.0);
        (gray_encode(index), ideal)
    }
}

/// Square (even width) or rectangular (odd width) QAM
#[derive(Debug, Clone)]
pub struct Qam {
    pub split: QamSplit,
    pub alpha: f32,
    pub reference: Vec<f32>,
}

impl Qam {
    pub fn new(m: u32) -> Self {
        let alpha = qam_alpha(1 << m);
        Self {
            split: QamSplit::new(m),
            alpha,
            reference: reference_table(m, alpha),
        }
    }

    fn point(&self, index_i: u32, index_q: u32) -> Complex32 {
        Complex32::new(
            linear_level(index_i, self.split.size_i, self.alpha),
            linear_level(index_q, self.split.size_q, self.alpha),
        )
    }
}

impl SymbolMapper for Qam {
    fn modulate(&mut self, symbol: u32) -> Complex32 {
        let s_i = symbol >> self.split.m_q;
        let s_q = symbol & (self.split.size_q - 1);
        self.point(gray_decode(s_i), gray_decode(s_q))
    }

    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32) {
        let (index_i, _) = slice_linear(sample.re, &self.reference[..self.split.m_i as usize]);
        let (index_q, _) = slice_linear(sample.im, &self.reference[..self.split.m_q as usize]);
        let symbol = (gray_encode(index_i) << self.split.m_q) | gray_encode(index_q);
        (symbol, self.point(index_i, index_q))
    }
}
