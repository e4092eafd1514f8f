//! Amplitude/phase shift keying
//!
//! Points sit on concentric rings. Each table set fixes the number of points
//! per ring, the ring radii (chosen for unit average energy), per-ring phase
//! offsets, the radius thresholds between neighbouring rings and a
//! permutation from symbol index to ring-ordered point index.

use std::f32::consts::TAU;

use num_complex::Complex32;

use super::SymbolMapper;

/// Fixed ring geometry for one APSK constellation
#[derive(Debug)]
pub struct ApskTables {
    /// Points on each ring, innermost first
    pub points_per_ring: &'static [u32],
    /// Ring radii
    pub radii: &'static [f32],
    /// Phase of the first point on each ring
    pub phase_offsets: &'static [f32],
    /// Radius decision thresholds, one fewer than rings
    pub radius_thresholds: &'static [f32],
    /// Symbol index → ring-ordered point index
    pub symbol_map: &'static [u32],
}

impl ApskTables {
    pub fn num_rings(&self) -> usize {
        self.points_per_ring.len()
    }

    pub fn size(&self) -> u32 {
        self.points_per_ring.iter().sum()
    }

    /// Ring that holds point `point`, and the index of that ring's first point
    fn ring_of(&self, point: u32) -> (usize, u32) {
        let mut first = 0;
        for (ring, &count) in self.points_per_ring.iter().enumerate() {
            if point < first + count {
                return (ring, first);
            }
            first += count;
        }
        let last = self.num_rings() - 1;
        (last, first - self.points_per_ring[last])
    }

    fn point(&self, ring: usize, bin: u32) -> Complex32 {
        let phi = self.phase_offsets[ring] + bin as f32 * TAU / self.points_per_ring[ring] as f32;
        Complex32::from_polar(self.radii[ring], phi)
    }
}

/// APSK-16, rings (4, 12)
#[rustfmt::skip]
pub static APSK16: ApskTables = ApskTables {
    points_per_ring: &[4, 12],
    radii: &[0.432_465_4, 1.127_382_5],
    phase_offsets: &[0.0, 0.0],
    radius_thresholds: &[0.779_923_96],
    symbol_map: &[
        11, 10, 8, 9, 12, 2, 7, 1,
        14, 15, 5, 4, 13, 3, 6, 0,
    ],
};

/// APSK-32, rings (4, 12, 16)
#[rustfmt::skip]
pub static APSK32: ApskTables = ApskTables {
    points_per_ring: &[4, 12, 16],
    radii: &[0.279_528_56, 0.729_805_29, 1.257_379_9],
    phase_offsets: &[0.0, 0.0, 0.0],
    radius_thresholds: &[0.504_666_93, 0.993_592_6],
    symbol_map: &[
        26, 25, 22, 23, 27, 11, 21, 9,
        13, 3, 7, 1, 12, 10, 8, 24,
        30, 31, 18, 17, 29, 15, 19, 5,
        28, 0, 20, 2, 14, 16, 6, 4,
    ],
};

/// APSK-64, rings (4, 14, 20, 26)
///
/// The symbol_map is the Gray permutation `i ^ (i >> 1)`; its ordering has
/// not been checked against reference vectors.
#[rustfmt::skip]
pub static APSK64: ApskTables = ApskTables {
    points_per_ring: &[4, 14, 20, 26],
    radii: &[0.189_165_86, 0.524_664_76, 0.886_131_29, 1.305_292],
    phase_offsets: &[0.0, 0.0, 0.0, 0.0],
    radius_thresholds: &[0.356_915_31, 0.705_398_02, 1.095_711_65],
    symbol_map: &[
        0, 1, 3, 2, 6, 7, 5, 4,
        12, 13, 15, 14, 10, 11, 9, 8,
        24, 25, 27, 26, 30, 31, 29, 28,
        20, 21, 23, 22, 18, 19, 17, 16,
        48, 49, 51, 50, 54, 55, 53, 52,
        60, 61, 63, 62, 58, 59, 57, 56,
        40, 41, 43, 42, 46, 47, 45, 44,
        36, 37, 39, 38, 34, 35, 33, 32,
    ],
};

/// Table set for a 4, 5 or 6 bit APSK constellation
pub fn tables_for(bits_per_symbol: u32) -> Option<&'static ApskTables> {
    match bits_per_symbol {
        4 => Some(&APSK16),
        5 => Some(&APSK32),
        6 => Some(&APSK64),
        _ => None,
    }
}

/// Ring-sliced APSK modem
#[derive(Debug, Clone, Copy)]
pub struct Apsk {
    pub tables: &'static ApskTables,
}

impl Apsk {
    pub fn new(tables: &'static ApskTables) -> Self {
        Self { tables }
    }
}

impl SymbolMapper for Apsk {
    fn modulate(&mut self, symbol: u32) -> Complex32 {
        let point = self.tables.symbol_map[symbol as usize];
        let (ring, first) = self.tables.ring_of(point);
        self.tables.point(ring, point - first)
    }

    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32) {
        let t = self.tables;

        let r = sample.norm();
        let ring = t
            .radius_thresholds
            .iter()
            .position(|&threshold| r < threshold)
            .unwrap_or(t.num_rings() - 1);

        let count = t.points_per_ring[ring];
        let d_phi = TAU / count as f32;
        let theta = sample.arg().rem_euclid(TAU);
        let bin = ((theta - t.phase_offsets[ring]) / d_phi)
            .round()
            .rem_euclid(count as f32) as u32
            % count;

        let first: u32 = t.points_per_ring[..ring].iter().sum();
        let point = first + bin;
        let symbol = t
            .symbol_map
            .iter()
            .position(|&p| p == point)
            .unwrap_or(0) as u32;

        (symbol, t.point(ring, bin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> [(&'static ApskTables, u32); 3] {
        [(&APSK16, 16), (&APSK32, 32), (&APSK64, 64)]
    }

    #[test]
    fn tables_are_consistent() {
        for (tables, size) in all() {
            assert_eq!(tables.size(), size);
            assert_eq!(tables.radii.len(), tables.num_rings());
            assert_eq!(tables.phase_offsets.len(), tables.num_rings());
            assert_eq!(tables.radius_thresholds.len(), tables.num_rings() - 1);
            assert_eq!(tables.symbol_map.len(), size as usize);
        }
    }

    #[test]
    fn symbol_maps_are_permutations() {
        for (tables, size) in all() {
            let mut seen = vec![false; size as usize];
            for &p in tables.symbol_map {
                assert!(!seen[p as usize], "point {} mapped twice", p);
                seen[p as usize] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn thresholds_separate_the_rings() {
        for (tables, _) in all() {
            for (k, &threshold) in tables.radius_thresholds.iter().enumerate() {
                assert!(tables.radii[k] < threshold && threshold < tables.radii[k + 1]);
            }
        }
    }

    #[test]
    fn average_energy_is_unity() {
        for (tables, size) in all() {
            let mut apsk = Apsk::new(tables);
            let e: f32 = (0..size).map(|s| apsk.modulate(s).norm_sqr()).sum::<f32>() / size as f32;
            assert!((e - 1.0).abs() < 1e-4, "APSK{} energy {}", size, e);
        }
    }

    #[test]
    fn roundtrip_every_symbol() {
        for (tables, size) in all() {
            let mut apsk = Apsk::new(tables);
            for s in 0..size {
                let y = apsk.modulate(s);
                let (recovered, ideal) = apsk.demodulate(y);
                assert_eq!(recovered, s, "APSK{} symbol {}", size, s);
                assert!((ideal - y).norm() < 1e-5);
            }
        }
    }

    #[test]
    fn ring_selection_uses_radius() {
        let mut apsk = Apsk::new(&APSK16);
        let (inner, _) = apsk.demodulate(Complex32::new(0.5, 0.0));
        let (outer, _) = apsk.demodulate(Complex32::new(0.9, 0.0));
        let inner_point = APSK16.symbol_map[inner as usize];
        let outer_point = APSK16.symbol_map[outer as usize];
        assert!(inner_point < 4);
        assert!(outer_point >= 4);
    }

    #[test]
    fn width_selects_table_set() {
        assert_eq!(tables_for(4).map(ApskTables::size), Some(16));
        assert_eq!(tables_for(5).map(ApskTables::size), Some(32));
        assert_eq!(tables_for(6).map(ApskTables::size), Some(64));
        assert!(tables_for(3).is_none());
    }
}
