//! Differential PSK
//!
//! The symbol is carried by the phase *change* between consecutive samples.
//! Modulation advances `state_theta` by the symbol's phase step; demodulation
//! measures the phase difference against the previous received sample.
//!
//! Both directions mutate the tracker on every call, so a stream must pass
//! through one instance strictly in order. Use separate instances for the
//! transmit and receive sides of a link.

use num_complex::Complex32;

use super::phase::PhaseParams;
use super::SymbolMapper;
use crate::dsp::gray::{gray_decode, gray_encode};
use crate::dsp::phase::wrap_phase;

/// Differential M-ary phase shift keying
#[derive(Debug, Clone)]
pub struct Dpsk {
    pub params: PhaseParams,
    /// Previous transmitted or received sample
    pub state: Complex32,
    /// Phase of the previous transmitted sample
    pub state_theta: f32,
}

impl Dpsk {
    pub fn new(m: u32) -> Self {
        Self {
            params: PhaseParams::new(m),
            state: Complex32::new(1.0, 0.0),
            state_theta: 0.0,
        }
    }

    /// Return to the unit reference `1 + 0j`
    pub fn reset(&mut self) {
        self.state = Complex32::new(1.0, 0.0);
        self.state_theta = 0.0;
    }
}

impl SymbolMapper for Dpsk {
    fn modulate(&mut self, symbol: u32) -> Complex32 {
        let d_theta = self.params.phase_of(gray_decode(symbol));
        self.state_theta = wrap_phase(self.state_theta + d_theta);
        self.state = Complex32::from_polar(1.0, self.state_theta);
        self.state
    }

    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32) {
        let d_theta = (sample * self.state.conj()).arg();
        let index = self.params.slice(d_theta);
        let ideal = Complex32::from_polar(1.0, self.state.arg() + self.params.phase_of(index));

        self.state = sample;
        self.state_theta = sample.arg();

        (gray_encode(index), ideal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_unit_reference() {
        let dpsk = Dpsk::new(2);
        assert_eq!(dpsk.state, Complex32::new(1.0, 0.0));
        assert_eq!(dpsk.state_theta, 0.0);
    }

    #[test]
    fn symbol_zero_keeps_the_phase() {
        let mut dpsk = Dpsk::new(2);
        for _ in 0..5 {
            let y = dpsk.modulate(0);
            assert!((y - Complex32::new(1.0, 0.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn modulation_accumulates_phase() {
        let mut dpsk = Dpsk::new(2);
        // symbol 1 → index 1 → +π/2 per call
        dpsk.modulate(1);
        let y = dpsk.modulate(1);
        assert!((y - Complex32::new(-1.0, 0.0)).norm() < 1e-5);
        assert!(dpsk.state_theta.abs() <= std::f32::consts::PI + 1e-6);
    }

    #[test]
    fn tx_rx_pair_recovers_the_stream() {
        let symbols = [3u32, 0, 1, 2, 2, 7, 5, 4, 6, 1, 0, 0, 7];
        let mut tx = Dpsk::new(3);
        let mut rx = Dpsk::new(3);
        for &s in &symbols {
            let y = tx.modulate(s);
            assert_eq!(rx.demodulate(y).0, s);
        }
    }

    #[test]
    fn common_phase_rotation_only_costs_the_first_symbol() {
        let symbols = [1u32, 3, 2, 0, 1, 1, 3];
        let mut tx = Dpsk::new(2);
        let mut rx = Dpsk::new(2);
        let rotation = Complex32::from_polar(1.0, 1.1);
        let recovered: Vec<u32> = symbols
            .iter()
            .map(|&s| rx.demodulate(tx.modulate(s) * rotation).0)
            .collect();
        assert_eq!(&recovered[1..], &symbols[1..]);
    }

    #[test]
    fn reset_restores_the_reference() {
        let mut dpsk = Dpsk::new(3);
        dpsk.modulate(5);
        dpsk.reset();
        assert_eq!(dpsk.state, Complex32::new(1.0, 0.0));
        assert_eq!(dpsk.state_theta, 0.0);
    }
}
