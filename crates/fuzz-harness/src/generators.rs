//! Deployment scenario generators for property-based testing
//!
//! Every generator stays inside the range `PredictionInput::validate` accepts, so a
//! composed scenario is always predictable.

use adcp_prediction::{
    BottomTrackPulseType, DatasetFlags, PredictionInput, TransmitPulseType, BANDS,
    SUBSYSTEM_PRESETS,
};
use proptest::prelude::*;

/// Upper edge used for the top band, which is unbounded.
const TOP_BAND_CEILING_HZ: f64 = 2_000_000.0;

// ============================================================================
// Frequency Generators
// ============================================================================

/// Index into the band table.
pub fn band_index() -> impl Strategy<Value = usize> {
    0..BANDS.len()
}

/// System frequency strictly inside band `index`.
pub fn frequency_in_band(index: usize) -> impl Strategy<Value = f64> {
    let lower = BANDS[index].frequency_hz;
    let upper = if index == 0 {
        TOP_BAND_CEILING_HZ
    } else {
        BANDS[index - 1].frequency_hz
    };
    (0.01f64..0.99).prop_map(move |t| lower + t * (upper - lower))
}

/// `(band index, frequency inside that band)`.
pub fn band_interior_frequency() -> impl Strategy<Value = (usize, f64)> {
    band_index().prop_flat_map(|i| (Just(i), frequency_in_band(i)))
}

/// Any frequency from well below the lowest band to above the highest.
pub fn any_frequency() -> impl Strategy<Value = f64> {
    1_000.0f64..TOP_BAND_CEILING_HZ
}

// ============================================================================
// Configuration Generators
// ============================================================================

/// Preset code, piston or vertical.
pub fn subsystem_code() -> impl Strategy<Value = char> {
    proptest::sample::select(SUBSYSTEM_PRESETS.iter().map(|p| p.code).collect::<Vec<_>>())
}

/// Deployment duration (1-365 days)
pub fn deployment_days() -> impl Strategy<Value = f64> {
    1.0f64..365.0
}

/// Ensemble interval (1 s to 1 hour)
pub fn ensemble_interval() -> impl Strategy<Value = f64> {
    1.0f64..3600.0
}

/// Bin size (0.25-16 m)
pub fn bin_size() -> impl Strategy<Value = f64> {
    0.25f64..16.0
}

/// Number of bins (1-200)
pub fn bin_count() -> impl Strategy<Value = u32> {
    1u32..=200
}

/// Broadband lag length (0.1-4 m)
pub fn lag_length() -> impl Strategy<Value = f64> {
    0.1f64..4.0
}

/// Pings per ensemble (1-20)
pub fn pings_per_ensemble() -> impl Strategy<Value = u32> {
    1u32..=20
}

pub fn pulse_type() -> impl Strategy<Value = TransmitPulseType> {
    prop_oneof![
        Just(TransmitPulseType::Narrowband),
        Just(TransmitPulseType::Broadband),
        Just(TransmitPulseType::NonCodedPulseToPulse),
        Just(TransmitPulseType::BroadbandPulseToPulse),
        Just(TransmitPulseType::NonCodedBroadbandPulseToPulse),
    ]
}

pub fn bottom_track_pulse_type() -> impl Strategy<Value = BottomTrackPulseType> {
    prop_oneof![
        Just(BottomTrackPulseType::NarrowbandLongRange),
        Just(BottomTrackPulseType::BroadbandCoded),
        Just(BottomTrackPulseType::BroadbandNonCoded),
        Just(BottomTrackPulseType::BroadbandNonCodedPulseToPulse),
        Just(BottomTrackPulseType::AutoSwitch),
    ]
}

/// Arbitrary dataset selection.
pub fn dataset_flags() -> impl Strategy<Value = DatasetFlags> {
    proptest::array::uniform15(any::<bool>()).prop_map(DatasetFlags)
}

// ============================================================================
// Environment Generators
// ============================================================================

/// Water temperature (-2 to 35 C)
pub fn temperature() -> impl Strategy<Value = f64> {
    -2.0f64..35.0
}

/// Salinity (0.1-40 ppt)
pub fn salinity() -> impl Strategy<Value = f64> {
    0.1f64..40.0
}

/// Transducer depth (0-2000 m)
pub fn depth() -> impl Strategy<Value = f64> {
    0.0f64..2000.0
}

/// Speed of sound (1400-1560 m/s)
pub fn speed_of_sound() -> impl Strategy<Value = f64> {
    1400.0f64..1560.0
}

/// `(temperature, salinity, depth, speed of sound)`
pub fn environment() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (temperature(), salinity(), depth(), speed_of_sound())
}

// ============================================================================
// Composite Generators
// ============================================================================

/// A complete scenario seeded from a random preset and then varied.
pub fn prediction_input() -> impl Strategy<Value = PredictionInput> {
    let profile = (bin_size(), bin_count(), lag_length(), pulse_type(), pings_per_ensemble());
    let deployment = (deployment_days(), ensemble_interval(), bottom_track_pulse_type());
    (subsystem_code(), deployment, profile, environment(), dataset_flags()).prop_filter_map(
        "preset lookup",
        |(code, (days, cei, bt_pulse), (bs, bins, lag, pulse, pings), (t, s, z, c), datasets)| {
            let mut input = PredictionInput::for_subsystem(code).ok()?;
            input.deployment_duration_days = days;
            input.ensemble_interval_s = cei;
            input.bottom_track.pulse_type = bt_pulse;
            input.water_profile.bin_size_m = bs;
            input.water_profile.bin_count = bins;
            input.water_profile.lag_length_m = lag;
            input.water_profile.pulse_type = pulse;
            input.water_profile.pings_per_ensemble = pings;
            input.environment.temperature_c = t;
            input.environment.salinity_ppt = s;
            input.environment.transducer_depth_m = z;
            input.environment.speed_of_sound_mps = c;
            input.datasets = datasets;
            Some(input)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcp_prediction::resolve_band;

    proptest! {
        #[test]
        fn test_band_interior_frequency_resolves((index, freq) in band_interior_frequency()) {
            let band = resolve_band(freq);
            prop_assert!(band.is_some());
            prop_assert_eq!(band.map(|b| b.band), Some(BANDS[index].band));
        }

        #[test]
        fn test_generated_input_is_valid(input in prediction_input()) {
            prop_assert!(input.validate().is_ok(), "{:?}", input.validate());
        }

        #[test]
        fn test_environment_bounds((t, s, z, c) in environment()) {
            prop_assert!((-2.0..35.0).contains(&t));
            prop_assert!(s > 0.0);
            prop_assert!(z >= 0.0);
            prop_assert!(c >= 1400.0);
        }
    }
}
