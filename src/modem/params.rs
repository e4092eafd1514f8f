//! Per-family parameter derivation
//!
//! Closed-form `alpha` values give unit average symbol energy for the common
//! sizes. A width-`M` ASK axis has energy `alpha² (M² - 1) / 3`; a QAM grid
//! is the sum of its two axes.

use std::f32::consts::PI;

/// Unit-energy ASK amplitude step for `M` levels
pub fn ask_alpha(constellation_size: u32) -> f32 {
    match constellation_size {
        2 => 1.0,
        4 => 1.0 / 5f32.sqrt(),
        8 => 1.0 / 21f32.sqrt(),
        16 => 1.0 / 85f32.sqrt(),
        32 => 1.0 / 341f32.sqrt(),
        // approximation, exact only as M grows
        m => 3f32.sqrt() / m as f32,
    }
}

/// Unit-energy QAM amplitude step for an `M`-point grid
pub fn qam_alpha(constellation_size: u32) -> f32 {
    match constellation_size {
        4 => 1.0 / 2f32.sqrt(),
        8 => 1.0 / 6f32.sqrt(),
        16 => 1.0 / 10f32.sqrt(),
        32 => 1.0 / 26f32.sqrt(),
        64 => 1.0 / 42f32.sqrt(),
        128 => 1.0 / 106f32.sqrt(),
        256 => 1.0 / 170f32.sqrt(),
        512 => 1.0 / 426f32.sqrt(),
        1024 => 1.0 / 682f32.sqrt(),
        2048 => 1.0 / 1706f32.sqrt(),
        4096 => 1.0 / 2730f32.sqrt(),
        // approximation
        m => (2.0 / m as f32).sqrt(),
    }
}

/// Phase step `π/M` shared by PSK and DPSK
pub fn psk_alpha(constellation_size: u32) -> f32 {
    PI / constellation_size as f32
}

/// Largest phase deviation from the first decision level, `π(1 - 1/M)`
pub fn psk_d_phi(constellation_size: u32) -> f32 {
    PI * (1.0 - 1.0 / constellation_size as f32)
}

/// In-phase/quadrature split of a QAM constellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QamSplit {
    /// Bits on the in-phase axis
    pub m_i: u32,
    /// Bits on the quadrature axis
    pub m_q: u32,
    /// Levels on the in-phase axis
    pub size_i: u32,
    /// Levels on the quadrature axis
    pub size_q: u32,
}

impl QamSplit {
    /// Square grid for even `m`, rectangular (wider in-phase) for odd `m`
    pub fn new(m: u32) -> Self {
        let (m_i, m_q) = if m % 2 == 1 {
            ((m + 1) / 2, (m - 1) / 2)
        } else {
            (m / 2, m / 2)
        };
        let split = Self {
            m_i,
            m_q,
            size_i: 1 << m_i,
            size_q: 1 << m_q,
        };
        debug_assert_eq!(split.m_i + split.m_q, m);
        debug_assert_eq!(split.size_i * split.size_q, 1 << m);
        split
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask_energy(levels: u32, alpha: f32) -> f32 {
        alpha * alpha * (levels as f32 * levels as f32 - 1.0) / 3.0
    }

    #[test]
    fn tabulated_ask_alphas_have_unit_energy() {
        for levels in [2u32, 4, 8, 16, 32] {
            let e = ask_energy(levels, ask_alpha(levels));
            assert!((e - 1.0).abs() < 1e-5, "M={} energy {}", levels, e);
        }
    }

    #[test]
    fn untabulated_ask_alpha_uses_approximation() {
        assert!((ask_alpha(64) - 3f32.sqrt() / 64.0).abs() < 1e-9);
    }

    #[test]
    fn tabulated_qam_alphas_have_unit_energy() {
        for m in 2..=12u32 {
            let split = QamSplit::new(m);
            let alpha = qam_alpha(1 << m);
            let e = ask_energy(split.size_i, alpha) + ask_energy(split.size_q, alpha);
            assert!((e - 1.0).abs() < 1e-4, "M={} energy {}", 1 << m, e);
        }
    }

    #[test]
    fn single_bit_qam_uses_approximation() {
        assert!((qam_alpha(2) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn square_split_for_even_widths() {
        let split = QamSplit::new(4);
        assert_eq!(
            split,
            QamSplit {
                m_i: 2,
                m_q: 2,
                size_i: 4,
                size_q: 4
            }
        );
    }

    #[test]
    fn rectangular_split_for_odd_widths() {
        let split = QamSplit::new(5);
        assert_eq!(
            split,
            QamSplit {
                m_i: 3,
                m_q: 2,
                size_i: 8,
                size_q: 4
            }
        );
        let split = QamSplit::new(1);
        assert_eq!((split.m_i, split.m_q), (1, 0));
        assert_eq!((split.size_i, split.size_q), (2, 1));
    }

    #[test]
    fn psk_parameters() {
        assert!((psk_alpha(4) - PI / 4.0).abs() < 1e-7);
        assert!((psk_d_phi(4) - 3.0 * PI / 4.0).abs() < 1e-6);
    }
}
