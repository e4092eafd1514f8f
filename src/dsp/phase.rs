//! Phase helpers

use std::f32::consts::{PI, TAU};

/// Wrap an angle into `(-π, π]`
pub fn wrap_phase(mut theta: f32) -> f32 {
    while theta > PI {
        theta -= TAU;
    }
    while theta <= -PI {
        theta += TAU;
    }
    theta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_in_range_are_untouched() {
        assert_eq!(wrap_phase(0.5), 0.5);
        assert_eq!(wrap_phase(-0.5), -0.5);
        assert_eq!(wrap_phase(PI), PI);
    }

    #[test]
    fn angles_out_of_range_wrap() {
        assert!((wrap_phase(1.5 * PI) + 0.5 * PI).abs() < 1e-6);
        assert!((wrap_phase(-1.5 * PI) - 0.5 * PI).abs() < 1e-6);
        assert!((wrap_phase(5.0 * TAU + 0.25) - 0.25).abs() < 1e-4);
        assert!((wrap_phase(-PI) - PI).abs() < 1e-6);
    }
}
