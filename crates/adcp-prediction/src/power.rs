//! Deployment energy budget
//!
//! Energy is summed per phase of an ensemble (wakeup, init, bottom track, transmit,
//! receive, save) plus the time asleep between ensembles and the transmit capacitor's
//! charge and leakage. Terms are computed in watt-seconds and converted to Wh.

use crate::band::{receiver_power_multiplier, resolve_band};
use crate::input::PredictionInput;
use crate::range::predicted_range;
use crate::sampling::SampleGeometry;
use crate::{ratio_or_zero, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use serde::Serialize;

/// Bottom-track ping time per metre of predicted bottom-track range (s/m).
const BT_TIME_PER_METER: f64 = 0.0015;

/// Fraction of a bottom-track ping spent transmitting.
const BT_TRANSMIT_FRACTION: f64 = 0.1;

/// Share of transmit energy lost recharging the capacitor bank.
const CAP_CHARGE_FRACTION: f64 = 0.03;

/// Leakage derate applied over the deployment hours.
const CAP_LEAKAGE_SCALE: f64 = 1.3;

/// Where a deployment's energy goes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PowerBreakdown {
    pub ensembles: f64,
    pub wakeups: f64,
    pub bottom_track_pings: f64,
    pub bottom_track_wh: f64,
    pub wakeup_wh: f64,
    pub init_wh: f64,
    pub transmit_wh: f64,
    pub receive_wh: f64,
    pub save_wh: f64,
    pub sleep_wh: f64,
    pub cap_charge_wh: f64,
    pub total_wh: f64,
}

/// Ensembles recorded over the deployment, or in one burst when burst mode is on.
pub fn ensemble_count(input: &PredictionInput) -> f64 {
    if input.burst.enabled {
        return f64::from(input.burst.ensembles_per_burst);
    }
    continuous_ensemble_count(input)
}

pub(crate) fn continuous_ensemble_count(input: &PredictionInput) -> f64 {
    if input.ensemble_interval_s <= 0.0 {
        return 0.0;
    }
    (input.deployment_seconds() / input.ensemble_interval_s).round()
}

/// Hours the instrument is deployed, or spends on one burst.
fn deployment_hours(input: &PredictionInput, ensembles: f64) -> f64 {
    if input.burst.enabled {
        ensembles * input.ensemble_interval_s / SECONDS_PER_HOUR
    } else {
        input.deployment_duration_days * 24.0
    }
}

/// Bottom-track pings fired in each ensemble.
///
/// Above a one second CEI the bottom track repeats every CBTTBP within the ensemble,
/// always at least once. At or below one second it pings once per ensemble.
fn bottom_track_pings_per_ensemble(input: &PredictionInput) -> f64 {
    let tbp = input.bottom_track.time_between_pings_s;
    if input.ensemble_interval_s > 1.0 && tbp > 0.0 {
        (input.ensemble_interval_s / tbp).floor().max(1.0)
    } else {
        1.0
    }
}

/// Itemised energy budget of `input`.
///
/// In burst mode the budget covers a single burst. The ensemble count is
/// `ensembles_per_burst`, so water-profile pings are `CWPP × ensembles_per_burst` and
/// bottom-track pings scale the same way. Sleep and capacitor leakage run for the burst's
/// own length, `ensembles_per_burst × CEI` seconds, rather than the deployment.
pub fn power_breakdown(input: &PredictionInput) -> PowerBreakdown {
    let band = resolve_band(input.system_frequency_hz);
    let wp = &input.water_profile;
    let sys = &input.system_power;
    let beams = f64::from(input.beams);
    let pings_per_ensemble = f64::from(wp.pings_per_ensemble);
    let rcv_watts = sys.receive_power_w * receiver_power_multiplier(input.system_frequency_hz);

    let ensembles = ensemble_count(input);
    let wakeups = if input.ensemble_interval_s > 1.0 && wp.time_between_pings_s > 1.0 {
        ensembles * pings_per_ensemble
    } else {
        ensembles
    };

    let bottom_track_pings = if input.bottom_track.enabled {
        ensembles * bottom_track_pings_per_ensemble(input)
    } else {
        0.0
    };
    let bottom_track_wh = match band {
        Some(band) if bottom_track_pings > 0.0 => {
            let ping_time = BT_TIME_PER_METER * predicted_range(input).bottom_track_m;
            let xmt = ping_time * BT_TRANSMIT_FRACTION * band.xmt_watts * beams;
            let rcv = ping_time * rcv_watts;
            bottom_track_pings * (xmt + rcv) / SECONDS_PER_HOUR
        }
        _ => 0.0,
    };

    let wakeup_wh = wakeups * sys.wakeup_time_s * sys.boot_power_w / SECONDS_PER_HOUR;
    let init_wh = wakeups * sys.init_power_w * sys.init_time_s / SECONDS_PER_HOUR;

    let geometry = SampleGeometry::for_input(input);
    let code_time = geometry.transmit_code_time(wp.pulse_type);
    let pings = if wp.enabled {
        pings_per_ensemble * ensembles
    } else {
        0.0
    };

    let transmit_wh = match band {
        Some(band) => {
            let scale = geometry.transmit_scale(wp.pulse_type, wp.broadband_power);
            code_time * scale * band.xmt_watts * beams * pings / SECONDS_PER_HOUR
        }
        None => 0.0,
    };

    let slant_speed = input.environment.speed_of_sound_mps * input.beam_angle_rad().cos();
    let profile_span = wp.blank_m + wp.bin_size_m * f64::from(wp.bin_count);
    let listen_time = code_time + ratio_or_zero(2.0 * profile_span, slant_speed);
    let receive_wh = pings * listen_time * rcv_watts / SECONDS_PER_HOUR;

    let save_wh = ensembles * sys.save_power_w * sys.save_time_s / SECONDS_PER_HOUR;

    let hours = deployment_hours(input, ensembles);
    let sleep_wh = sys.sleep_power_w * hours;

    let leakage_w = band.map_or(0.0, |b| b.leakage_watts());
    let cap_charge_wh = CAP_CHARGE_FRACTION * transmit_wh + CAP_LEAKAGE_SCALE * hours * leakage_w;

    let total_wh = bottom_track_wh
        + wakeup_wh
        + init_wh
        + transmit_wh
        + receive_wh
        + save_wh
        + sleep_wh
        + cap_charge_wh;

    PowerBreakdown {
        ensembles,
        wakeups,
        bottom_track_pings,
        bottom_track_wh,
        wakeup_wh,
        init_wh,
        transmit_wh,
        receive_wh,
        save_wh,
        sleep_wh,
        cap_charge_wh,
        total_wh,
    }
}

/// Energy (Wh) of the deployment, or of one burst when burst mode is on.
pub fn calculate_power(input: &PredictionInput) -> f64 {
    power_breakdown(input).total_wh
}

/// Energy (Wh) of a burst deployment: one burst times the number of bursts.
///
/// Burst interval and ensembles per burst are not cross-checked against CEI.
pub fn calculate_power_burst(input: &PredictionInput) -> f64 {
    let interval = input.burst.burst_interval_s;
    if interval <= 0.0 {
        return 0.0;
    }

    let mut single = input.clone();
    single.deployment_duration_days = 1.0;
    single.burst.enabled = true;

    let bursts = (input.deployment_duration_days * SECONDS_PER_DAY / interval).round();
    calculate_power(&single) * bursts
}
