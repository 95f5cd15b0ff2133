//! Receiver sample geometry
//!
//! Converts the profile configuration into ADC samples: how far sound travels per
//! sample, how many samples fit in a bin and in the broadband lag, and how many times
//! the code repeats inside a bin. Power, range and velocity predictions all start here.

use crate::band::resolve_band;
use crate::input::{PredictionInput, TransmitPulseType};
use crate::ratio_or_zero;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleGeometry {
    pub sample_rate_hz: f64,
    pub meters_per_sample: f64,
    pub bin_samples: f64,
    /// Always even
    pub lag_samples: f64,
    /// At least 2
    pub code_repeats: f64,
}

/// Receiver sample rate (Hz); 0 outside every band or with a zero cycles-per-element.
pub fn sample_rate(system_frequency_hz: f64, cycles_per_element: f64) -> f64 {
    match resolve_band(system_frequency_hz) {
        Some(band) => {
            system_frequency_hz
                * ratio_or_zero(band.sampling_ratio * band.cycles_per_element, cycles_per_element)
        }
        None => 0.0,
    }
}

/// Along-axis distance covered by one sample (m).
pub fn meters_per_sample(beam_angle_deg: f64, speed_of_sound: f64, sample_rate_hz: f64) -> f64 {
    ratio_or_zero(
        beam_angle_deg.to_radians().cos() * speed_of_sound,
        2.0 * sample_rate_hz,
    )
}

pub fn bin_samples(bin_size_m: f64, meters_per_sample: f64) -> f64 {
    ratio_or_zero(bin_size_m, meters_per_sample).floor()
}

/// Lag length in samples, rounded to an even count.
pub fn lag_samples(lag_length_m: f64, meters_per_sample: f64) -> f64 {
    if meters_per_sample == 0.0 {
        return 0.0;
    }
    let raw = (lag_length_m / meters_per_sample).floor();
    2.0 * ((raw + 1.0) / 2.0).floor()
}

pub fn code_repeats(bin_samples: f64, lag_samples: f64) -> f64 {
    let repeats = ratio_or_zero(bin_samples, lag_samples).floor() + 1.0;
    repeats.max(2.0)
}

impl SampleGeometry {
    pub fn new(
        system_frequency_hz: f64,
        cycles_per_element: f64,
        beam_angle_deg: f64,
        speed_of_sound: f64,
        bin_size_m: f64,
        lag_length_m: f64,
    ) -> Self {
        let sample_rate_hz = sample_rate(system_frequency_hz, cycles_per_element);
        let meters_per_sample = meters_per_sample(beam_angle_deg, speed_of_sound, sample_rate_hz);
        let bin_samples = bin_samples(bin_size_m, meters_per_sample);
        let lag_samples = lag_samples(lag_length_m, meters_per_sample);
        let code_repeats = code_repeats(bin_samples, lag_samples);

        Self {
            sample_rate_hz,
            meters_per_sample,
            bin_samples,
            lag_samples,
            code_repeats,
        }
    }

    /// Water-profile geometry of a scenario.
    pub fn for_input(input: &PredictionInput) -> Self {
        Self::new(
            input.system_frequency_hz,
            input.cycles_per_element,
            input.beam_angle_deg,
            input.environment.speed_of_sound_mps,
            input.water_profile.bin_size_m,
            input.water_profile.lag_length_m,
        )
    }

    /// Time (s) to receive one bin.
    pub fn bin_time(&self) -> f64 {
        ratio_or_zero(self.bin_samples, self.sample_rate_hz)
    }

    /// Time (s) spanned by one lag.
    pub fn lag_time(&self) -> f64 {
        ratio_or_zero(self.lag_samples, self.sample_rate_hz)
    }

    /// Duration (s) of the transmitted code.
    pub fn transmit_code_time(&self, pulse_type: TransmitPulseType) -> f64 {
        match pulse_type {
            TransmitPulseType::Broadband => {
                if self.code_repeats < 3.0 {
                    2.0 * self.bin_time()
                } else {
                    self.code_repeats * self.lag_time()
                }
            }
            TransmitPulseType::Narrowband => self.bin_time(),
            _ => 2.0 * self.bin_time(),
        }
    }

    /// Fraction of the code time the transmitter is driven.
    pub fn transmit_scale(&self, pulse_type: TransmitPulseType, broadband_power: bool) -> f64 {
        if !pulse_type.is_coded() {
            return 1.0;
        }
        if broadband_power {
            ratio_or_zero(self.lag_samples - 1.0, self.lag_samples)
        } else {
            ratio_or_zero(1.0, self.lag_samples)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREQ_300: f64 = 311_281.25;

    fn default_geometry() -> SampleGeometry {
        SampleGeometry::new(FREQ_300, 12.0, 20.0, 1490.0, 4.0, 1.0)
    }

    #[test]
    fn test_sample_rate_follows_cycles_per_element() {
        let base = sample_rate(FREQ_300, 12.0);
        assert!((base - FREQ_300 / 6.0).abs() < 1e-6);
        assert!((sample_rate(FREQ_300, 6.0) - 2.0 * base).abs() < 1e-6);
        assert_eq!(sample_rate(FREQ_300, 0.0), 0.0);
        assert_eq!(sample_rate(20_000.0, 12.0), 0.0);
    }

    #[test]
    fn test_default_300khz_geometry() {
        let g = default_geometry();
        // cos(20) * 1490 / (2 * 51880.2) = 0.013494
        assert!((g.meters_per_sample - 0.013_494).abs() < 1e-5, "mps: {}", g.meters_per_sample);
        assert_eq!(g.bin_samples, 296.0);
        assert_eq!(g.lag_samples, 74.0);
        assert_eq!(g.code_repeats, 5.0);
    }

    #[test]
    fn test_lag_samples_always_even() {
        for lag in [0.05, 0.1, 0.33, 0.5, 1.0, 1.7, 2.5] {
            let samples = lag_samples(lag, 0.013_494);
            assert_eq!(samples % 2.0, 0.0, "lag {} gave {}", lag, samples);
        }
        assert_eq!(lag_samples(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_code_repeats_floor_of_two() {
        assert_eq!(code_repeats(10.0, 74.0), 2.0);
        assert_eq!(code_repeats(10.0, 0.0), 2.0);
        assert_eq!(code_repeats(300.0, 74.0), 5.0);
    }

    #[test]
    fn test_transmit_code_time() {
        let g = default_geometry();
        let bb = g.transmit_code_time(TransmitPulseType::Broadband);
        assert!((bb - 5.0 * g.lag_time()).abs() < 1e-12);
        assert!((g.transmit_code_time(TransmitPulseType::Narrowband) - g.bin_time()).abs() < 1e-12);
        assert!(
            (g.transmit_code_time(TransmitPulseType::NonCodedPulseToPulse) - 2.0 * g.bin_time()).abs()
                < 1e-12
        );

        // Few repeats fall back to two bins
        let short = SampleGeometry::new(FREQ_300, 12.0, 20.0, 1490.0, 1.0, 1.0);
        assert_eq!(short.code_repeats, 2.0);
        assert!(
            (short.transmit_code_time(TransmitPulseType::Broadband) - 2.0 * short.bin_time()).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_transmit_scale() {
        let g = default_geometry();
        assert_eq!(g.transmit_scale(TransmitPulseType::Narrowband, true), 1.0);
        assert!((g.transmit_scale(TransmitPulseType::Broadband, true) - 73.0 / 74.0).abs() < 1e-12);
        assert!((g.transmit_scale(TransmitPulseType::Broadband, false) - 1.0 / 74.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_band_geometry_is_zero() {
        let g = SampleGeometry::new(10_000.0, 12.0, 20.0, 1490.0, 4.0, 1.0);
        assert_eq!(g.sample_rate_hz, 0.0);
        assert_eq!(g.meters_per_sample, 0.0);
        assert_eq!(g.bin_samples, 0.0);
        assert_eq!(g.lag_samples, 0.0);
        assert_eq!(g.bin_time(), 0.0);
    }
}
