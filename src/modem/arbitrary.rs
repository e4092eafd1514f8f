//! Arbitrary (user-defined) constellations
//!
//! The modem is created with an empty map of `M` points; a loader fills it.
//! Loading copies the points, removes their mean (plain ARB only) and then
//! scales them to unit average energy. Balancing always runs before scaling
//! so the energy is that of the centred constellation.
//!
//! Mirrored and rotated variants hold a single first-quadrant map; the top
//! two symbol bits select which quadrant image is transmitted.

use num_complex::Complex32;

use super::SymbolMapper;
use crate::domain::{ModemError, ModemResult};

/// How a first-quadrant map is extended to the full plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflection {
    /// The map already covers the whole plane
    None,
    /// Quadrant `q` is the reflection of the map across the I and/or Q axis
    Mirrored,
    /// Quadrant `q` is the map rotated by `q · 90°`
    Rotated,
}

#[derive(Debug, Clone)]
pub struct Arbitrary {
    pub reflection: Reflection,
    pub symbol_map: Vec<Complex32>,
    pub loaded: bool,
}

impl Arbitrary {
    pub fn new(reflection: Reflection, size: u32) -> Self {
        Self {
            reflection,
            symbol_map: vec![Complex32::new(0.0, 0.0); size as usize],
            loaded: false,
        }
    }

    /// Replace the constellation with `points`, then normalize it.
    ///
    /// The stored map is only touched once every check has passed.
    pub fn load(&mut self, points: &[Complex32]) -> ModemResult<()> {
        if points.len() != self.symbol_map.len() {
            return Err(ModemError::SizeMismatch {
                expected: self.symbol_map.len(),
                actual: points.len(),
            });
        }

        if self.reflection != Reflection::None {
            for (i, p) in points.iter().enumerate() {
                if p.re < 0.0 || p.im < 0.0 {
                    log::warn!(
                        "constellation point {i} ({}, {}) lies outside the first quadrant",
                        p.re,
                        p.im
                    );
                }
            }
        }

        let mut map = points.to_vec();
        if self.reflection == Reflection::None {
            balance_iq(&mut map);
        }
        scale_to_unit_energy(&mut map)?;

        log::debug!(
            "loaded {} constellation points ({:?}, balanced: {})",
            map.len(),
            self.reflection,
            self.reflection == Reflection::None
        );

        self.symbol_map = map;
        self.loaded = true;
        Ok(())
    }

    /// Point transmitted for map entry `point` in quadrant `quadrant`
    fn image(&self, point: Complex32, quadrant: u32) -> Complex32 {
        match (self.reflection, quadrant & 0x03) {
            (Reflection::None, _) | (_, 0) => point,
            (Reflection::Mirrored, 1) => Complex32::new(-point.re, point.im),
            (Reflection::Mirrored, 2) => -point,
            (Reflection::Mirrored, _) => point.conj(),
            (Reflection::Rotated, 1) => Complex32::new(-point.im, point.re),
            (Reflection::Rotated, 2) => -point,
            (Reflection::Rotated, _) => Complex32::new(point.im, -point.re),
        }
    }

    fn quadrants(&self) -> u32 {
        match self.reflection {
            Reflection::None => 1,
            Reflection::Mirrored | Reflection::Rotated => 4,
        }
    }
}

impl SymbolMapper for Arbitrary {
    fn modulate(&mut self, symbol: u32) -> Complex32 {
        let size = self.symbol_map.len() as u32;
        self.image(self.symbol_map[(symbol % size) as usize], symbol / size)
    }

    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32) {
        let size = self.symbol_map.len() as u32;
        let mut best = (0u32, self.symbol_map[0]);
        let mut best_dist = f32::MAX;

        for quadrant in 0..self.quadrants() {
            for (i, &p) in self.symbol_map.iter().enumerate() {
                let candidate = self.image(p, quadrant);
                let dist = (sample - candidate).norm_sqr();
                if dist < best_dist {
                    best_dist = dist;
                    best = (quadrant * size + i as u32, candidate);
                }
            }
        }

        best
    }
}

/// Subtract the mean so the constellation is centred on the origin
pub fn balance_iq(points: &mut [Complex32]) {
    if points.is_empty() {
        return;
    }
    let mean = points.iter().sum::<Complex32>() / points.len() as f32;
    for p in points.iter_mut() {
        *p -= mean;
    }
}

/// Divide by the RMS magnitude so the average symbol energy is one
pub fn scale_to_unit_energy(points: &mut [Complex32]) -> ModemResult<()> {
    if points.is_empty() {
        return Err(ModemError::DegenerateConstellation);
    }
    let energy = points.iter().map(|p| p.norm_sqr()).sum::<f32>() / points.len() as f32;
    let rms = energy.sqrt();
    if !rms.is_finite() || rms <= 0.0 {
        return Err(ModemError::DegenerateConstellation);
    }
    for p in points.iter_mut() {
        *p /= rms;
    }
    Ok(())
}
