//! Ambiguity velocity and velocity standard deviation

use crate::band::wavelength_m;
use crate::input::{PredictionInput, TransmitPulseType};
use crate::ratio_or_zero;
use crate::sampling::{lag_samples, meters_per_sample, sample_rate, SampleGeometry};
use std::f64::consts::{PI, SQRT_2};

/// Broadband single-ping radial std dev at the reference lag and bin (m/s).
const BB_REFERENCE_STD_DEV: f64 = 0.034;
/// Lag (samples) of the broadband reference.
const BB_REFERENCE_LAG: f64 = 118.0;
/// Bin (samples) of the broadband reference.
const BB_REFERENCE_BIN: f64 = 14.0;
/// Correlation of the broadband reference.
const BB_REFERENCE_RHO: f64 = 0.5;

/// Largest unambiguous horizontal velocity (m/s) for a broadband lag.
///
/// Vertical beams return the radial value. Zero sample rate or zero lag samples give 0.
pub fn max_velocity(
    lag_length_m: f64,
    beam_angle_deg: f64,
    system_frequency_hz: f64,
    speed_of_sound: f64,
    cycles_per_element: f64,
) -> f64 {
    let rate = sample_rate(system_frequency_hz, cycles_per_element);
    if rate == 0.0 {
        return 0.0;
    }
    let mps = meters_per_sample(beam_angle_deg, speed_of_sound, rate);
    let lag = lag_samples(lag_length_m, mps);
    if lag == 0.0 {
        return 0.0;
    }

    let ua_hz = rate / (2.0 * lag);
    let ua_radial = ua_hz * speed_of_sound / (2.0 * system_frequency_hz);
    if beam_angle_deg == 0.0 {
        ua_radial
    } else {
        ua_radial / beam_angle_deg.to_radians().sin()
    }
}

fn broadband_radial(input: &PredictionInput, geometry: &SampleGeometry) -> f64 {
    let tuning = &input.std_dev;
    let repeats = geometry.code_repeats;
    let snr = 10f64.powf(tuning.snr_db / 10.0);
    let rho = tuning.beta * ((repeats - 1.0) / repeats) * (snr / (1.0 + snr));

    if geometry.lag_samples == 0.0 || geometry.bin_samples == 0.0 || rho == 0.0 {
        return 0.0;
    }
    BB_REFERENCE_STD_DEV
        * (BB_REFERENCE_LAG / geometry.lag_samples)
        * (BB_REFERENCE_BIN / geometry.bin_samples).sqrt()
        * (rho / BB_REFERENCE_RHO).powi(-2)
}

fn narrowband_radial(input: &PredictionInput) -> f64 {
    let c = input.environment.speed_of_sound_mps;
    let nb_ta = ratio_or_zero(2.0 * input.water_profile.bin_size_m, c);
    let lambda = wavelength_m(c, input.system_frequency_hz);
    ratio_or_zero(input.std_dev.nb_fudge * lambda, 4.0 * PI * nb_ta)
}

/// Predicted standard deviation (m/s) of one ensemble's horizontal velocity.
pub fn standard_deviation(input: &PredictionInput) -> f64 {
    let radial = match input.water_profile.pulse_type {
        TransmitPulseType::Narrowband => narrowband_radial(input),
        _ => broadband_radial(input, &SampleGeometry::for_input(input)),
    };

    if input.is_vertical_beam() {
        return radial;
    }
    let pings = f64::from(input.water_profile.pings_per_ensemble);
    ratio_or_zero(radial, pings.sqrt() * SQRT_2 * input.beam_angle_rad().sin())
}
