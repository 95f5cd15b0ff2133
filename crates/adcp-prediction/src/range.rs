//! Predicted profiling and bottom-track range
//!
//! Range is scaled from each band's reference range by the configuration's relative
//! figure of merit: bin size, directivity, cycles per element and absorption compared
//! with the conditions the reference was measured in.

use crate::absorption::absorption;
use crate::band::{directivity_index, wavelength_m, BANDS};
use crate::input::{BottomTrackPulseType, PredictionInput, TransmitPulseType};
use crate::sampling::SampleGeometry;
use crate::{db10, ratio_or_zero};
use serde::Serialize;

/// Extra reference bins a narrowband water profile reaches.
const NARROWBAND_WP_BINS: f64 = 20.0;

/// Extra reference bins narrowband long-range bottom track reaches.
const NARROWBAND_BT_BINS: f64 = 15.0;

/// Narrowband first-bin pad (m).
const NARROWBAND_FIRST_BIN_PAD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PredictedRanges {
    /// Water-profile range (m)
    pub water_profile_m: f64,
    /// Bottom-track range (m)
    pub bottom_track_m: f64,
    /// Center of the first bin from the transducer face (m)
    pub first_bin_position_m: f64,
    /// Span the configured bins cover, `blank + bin_size * bins` (m)
    pub profile_range_settings_m: f64,
}

/// Predict ranges for `input`.
///
/// Bands are accumulated through their own selection test, so a frequency outside
/// every band leaves both ranges at 0.
pub fn predicted_range(input: &PredictionInput) -> PredictedRanges {
    let freq = input.system_frequency_hz;
    let env = &input.environment;
    let wp = &input.water_profile;

    let lambda = wavelength_m(env.speed_of_sound_mps, freq);
    let user_di = directivity_index(input.beam_diameter_m, lambda);
    let alpha = absorption(
        freq,
        env.speed_of_sound_mps,
        env.salinity_ppt,
        env.temperature_c,
        env.transducer_depth_m,
    );

    let geometry = SampleGeometry::for_input(input);
    let xmt_scale = geometry.transmit_scale(wp.pulse_type, wp.broadband_power);

    let mut water_profile_m = 0.0;
    let mut bottom_track_m = 0.0;
    let mut ref_bins_sum = 0.0;
    let mut watts_sum = 0.0;

    for band in BANDS.iter().filter(|b| b.selected_by(freq)) {
        let range_scale = ratio_or_zero(
            input.beam_angle_rad().cos(),
            band.beam_angle_deg.to_radians().cos(),
        );
        let band_di = directivity_index(band.beam_diameter_m, lambda);
        let db = db10(wp.bin_size_m / band.ref_bin_size_m) + (user_di - band_di)
            - db10(ratio_or_zero(band.cycles_per_element, input.cycles_per_element));
        let absorption_range = band.ref_range_m + (band.absorption_scale - alpha) * band.ref_range_m;

        let mut bt = absorption_range + band.ref_bin_count * db;
        if input.bottom_track.pulse_type == BottomTrackPulseType::NarrowbandLongRange {
            bt += NARROWBAND_BT_BINS * band.ref_bin_count;
        }
        bottom_track_m += 2.0 * range_scale * bt;

        let mut profile = absorption_range + band.ref_bin_count * db;
        if wp.pulse_type == TransmitPulseType::Narrowband {
            profile += NARROWBAND_WP_BINS * band.ref_bin_count;
        }
        water_profile_m += range_scale * profile;

        ref_bins_sum += band.ref_bin_count;
        watts_sum += band.xmt_watts;
    }

    // Transmit duty reduction, only once a band contributed
    if watts_sum > 0.0 {
        water_profile_m += db10(xmt_scale * watts_sum / watts_sum) * ref_bins_sum + 1.0;
    }

    PredictedRanges {
        water_profile_m,
        bottom_track_m,
        first_bin_position_m: first_bin_position(input, &geometry),
        profile_range_settings_m: wp.blank_m + wp.bin_size_m * f64::from(wp.bin_count),
    }
}

fn first_bin_position(input: &PredictionInput, geometry: &SampleGeometry) -> f64 {
    let wp = &input.water_profile;
    let pos = if wp.pulse_type == TransmitPulseType::Narrowband {
        (2.0 * wp.bin_size_m + NARROWBAND_FIRST_BIN_PAD) / 2.0
    } else if wp.pulse_type.code() > 1 {
        wp.bin_size_m
    } else {
        (geometry.lag_samples * (geometry.code_repeats - 1.0) * geometry.meters_per_sample
            + wp.bin_size_m
            + wp.lag_length_m)
            / 2.0
    };
    pos + wp.blank_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_300khz_ranges() {
        let ranges = predicted_range(&PredictionInput::default());
        assert!((ranges.water_profile_m - 125.838).abs() < 0.01, "wp: {}", ranges.water_profile_m);
        assert!((ranges.bottom_track_m - 249.913).abs() < 0.01, "bt: {}", ranges.bottom_track_m);
        assert!((ranges.first_bin_position_m - 4.897).abs() < 0.001);
        assert!((ranges.profile_range_settings_m - 120.4).abs() < 1e-9);
    }

    #[test]
    fn test_narrowband_reaches_further() {
        let bb = predicted_range(&PredictionInput::default());
        let mut input = PredictionInput::default();
        input.water_profile.pulse_type = TransmitPulseType::Narrowband;
        let nb = predicted_range(&input);

        // 20 reference bins of 2 m, and no broadband duty reduction
        assert!(nb.water_profile_m > bb.water_profile_m + 39.0);
        assert!((nb.first_bin_position_m - (4.025 + 0.4)).abs() < 1e-9);
    }

    #[test]
    fn test_narrowband_long_range_bottom_track() {
        let base = predicted_range(&PredictionInput::default());
        let mut input = PredictionInput::default();
        input.bottom_track.pulse_type = BottomTrackPulseType::NarrowbandLongRange;
        let long = predicted_range(&input);
        // 2 * 15 * 2 m
        assert!((long.bottom_track_m - base.bottom_track_m - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_larger_bins_reach_further() {
        let mut input = PredictionInput::default();
        input.water_profile.bin_size_m = 8.0;
        let big = predicted_range(&input);
        let base = predicted_range(&PredictionInput::default());
        // +3 dB at 2 m/dB
        assert!((big.water_profile_m - base.water_profile_m - 6.02).abs() < 0.01);
    }

    #[test]
    fn test_pulse_to_pulse_first_bin() {
        let mut input = PredictionInput::default();
        input.water_profile.pulse_type = TransmitPulseType::NonCodedPulseToPulse;
        let ranges = predicted_range(&input);
        assert!((ranges.first_bin_position_m - 4.4).abs() < 1e-9);
    }

    #[test]
    fn test_no_band_gives_zero_range() {
        let mut input = PredictionInput::default();
        input.system_frequency_hz = 275_000.0;
        let ranges = predicted_range(&input);
        assert_eq!(ranges.water_profile_m, 0.0);
        assert_eq!(ranges.bottom_track_m, 0.0);
        assert!((ranges.profile_range_settings_m - 120.4).abs() < 1e-9);
    }

    #[test]
    fn test_each_band_has_a_positive_range() {
        for code in ['1', '2', '3', '4', '5', '6'] {
            let input = PredictionInput::for_subsystem(code).unwrap();
            let ranges = predicted_range(&input);
            assert!(ranges.water_profile_m > 0.0, "subsystem {}", code);
            assert!(ranges.bottom_track_m > ranges.water_profile_m, "subsystem {}", code);
        }
    }
}
