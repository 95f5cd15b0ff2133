//! Seawater sound absorption
//!
//! Francois-Garrison model: boric acid relaxation + magnesium sulfate relaxation +
//! pure water viscosity. Internally dB/km with frequency in kHz; the public function
//! takes Hz and returns dB/m.

/// Seawater pH assumed by the model.
const PH: f64 = 8.0;

/// Boric-acid pressure correction.
const P1: f64 = 1.0;

const KELVIN_OFFSET: f64 = 273.0;

/// Absorption coefficient (dB/m).
///
/// Returns 0 when the speed of sound, salinity or frequency is 0.
pub fn absorption(
    frequency_hz: f64,
    speed_of_sound: f64,
    salinity_ppt: f64,
    temperature_c: f64,
    depth_m: f64,
) -> f64 {
    if speed_of_sound == 0.0 || salinity_ppt == 0.0 || frequency_hz == 0.0 {
        return 0.0;
    }

    let f = frequency_hz / 1000.0;
    let f_sq = f * f;
    let t = temperature_c;
    let s = salinity_ppt;
    let z = depth_m;
    let theta = t + KELVIN_OFFSET;

    // Boric acid
    let a1 = 8.86 / speed_of_sound * 10f64.powf(0.78 * PH - 5.0);
    let f1 = 2.8 * (s / 35.0).sqrt() * 10f64.powf(4.0 - 1245.0 / theta);
    let boric = a1 * P1 * f1 * f_sq / (f_sq + f1 * f1);

    // Magnesium sulfate
    let a2 = 21.44 * s / speed_of_sound * (1.0 + 0.025 * t);
    let p2 = 1.0 - 1.37e-4 * z + 6.2e-9 * z * z;
    let f2 = 8.17 * 10f64.powf(8.0 - 1990.0 / theta) / (1.0 + 0.0018 * (s - 35.0));
    let magnesium = a2 * p2 * f2 * f_sq / (f_sq + f2 * f2);

    // Pure water
    let a3 = if t <= 20.0 {
        4.937e-4 - 2.59e-5 * t + 9.11e-7 * t.powi(2) - 1.50e-8 * t.powi(3)
    } else {
        3.964e-4 - 1.146e-5 * t + 1.45e-7 * t.powi(2) - 6.5e-10 * t.powi(3)
    };
    let p3 = 1.0 - 3.83e-5 * z + 4.9e-10 * z * z;
    let water = a3 * p3 * f_sq;

    (boric + magnesium + water) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_guards() {
        assert_eq!(absorption(300_000.0, 0.0, 35.0, 10.0, 0.0), 0.0);
        assert_eq!(absorption(300_000.0, 1490.0, 0.0, 10.0, 0.0), 0.0);
        assert_eq!(absorption(0.0, 1490.0, 35.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_typical_300khz_seawater() {
        let alpha = absorption(300_000.0, 1490.0, 35.0, 10.0, 0.0);
        assert!(alpha > 0.06 && alpha < 0.08, "300 kHz absorption: {} dB/m", alpha);
    }

    #[test]
    fn test_increases_with_frequency() {
        let mut previous = 0.0;
        for freq in [38_000.0, 75_000.0, 150_000.0, 300_000.0, 600_000.0, 1_200_000.0] {
            let alpha = absorption(freq, 1490.0, 35.0, 10.0, 0.0);
            assert!(alpha > previous, "{} Hz: {} <= {}", freq, alpha, previous);
            previous = alpha;
        }
    }

    #[test]
    fn test_depth_reduces_absorption() {
        let surface = absorption(300_000.0, 1490.0, 35.0, 10.0, 0.0);
        let deep = absorption(300_000.0, 1490.0, 35.0, 10.0, 1000.0);
        assert!(deep < surface);
    }

    #[test]
    fn test_warm_water_branch() {
        let alpha = absorption(300_000.0, 1530.0, 35.0, 25.0, 0.0);
        assert!(alpha > 0.0 && alpha.is_finite());
    }
}
