//! Aggregated prediction for one scenario

use crate::absorption::absorption;
use crate::band::{resolve_band, FrequencyBand};
use crate::battery::try_battery_usage;
use crate::input::PredictionInput;
use crate::power::{calculate_power, calculate_power_burst, power_breakdown, PowerBreakdown};
use crate::range::{predicted_range, PredictedRanges};
use crate::sampling::SampleGeometry;
use crate::storage::{data_storage, data_storage_burst, ensemble_size};
use crate::velocity::{max_velocity, standard_deviation};
use crate::Result;
use serde::Serialize;
use tracing::debug;

/// Everything predicted for a scenario.
///
/// In burst mode `power_wh` and `storage_bytes` cover the whole deployment while
/// `breakdown` describes a single burst.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    /// `None` when the system frequency falls outside every band
    pub band: Option<FrequencyBand>,
    pub absorption_db_per_m: f64,
    pub geometry: SampleGeometry,
    pub power_wh: f64,
    pub breakdown: PowerBreakdown,
    pub batteries: f64,
    pub ranges: PredictedRanges,
    pub max_velocity_mps: f64,
    pub std_dev_mps: f64,
    pub ensemble_size_bytes: u64,
    pub storage_bytes: f64,
}

impl PredictionReport {
    /// Validate `input` and run every prediction over it.
    pub fn compute(input: &PredictionInput) -> Result<Self> {
        input.validate()?;

        let env = &input.environment;
        let wp = &input.water_profile;

        let power_wh = if input.burst.enabled {
            calculate_power_burst(input)
        } else {
            calculate_power(input)
        };
        let storage_bytes = if input.burst.enabled {
            data_storage_burst(input)
        } else {
            data_storage(input)
        };

        let battery = &input.battery;
        let batteries = try_battery_usage(
            power_wh,
            input.deployment_duration_days,
            battery.battery_type.capacity_wh(),
            battery.derate,
            battery.self_discharge_per_year,
        )?;

        let report = Self {
            band: resolve_band(input.system_frequency_hz).map(|b| b.band),
            absorption_db_per_m: absorption(
                input.system_frequency_hz,
                env.speed_of_sound_mps,
                env.salinity_ppt,
                env.temperature_c,
                env.transducer_depth_m,
            ),
            geometry: SampleGeometry::for_input(input),
            power_wh,
            breakdown: power_breakdown(input),
            batteries,
            ranges: predicted_range(input),
            max_velocity_mps: max_velocity(
                wp.lag_length_m,
                input.beam_angle_deg,
                input.system_frequency_hz,
                env.speed_of_sound_mps,
                input.cycles_per_element,
            ),
            std_dev_mps: standard_deviation(input),
            ensemble_size_bytes: ensemble_size(input),
            storage_bytes,
        };

        debug!(
            "Prediction: band={:?} power={:.1}Wh batteries={:.2} wp_range={:.1}m bt_range={:.1}m",
            report.band,
            report.power_wh,
            report.batteries,
            report.ranges.water_profile_m,
            report.ranges.bottom_track_m
        );

        Ok(report)
    }

    /// Battery packs rounded up to whole packs.
    pub fn whole_batteries(&self) -> u32 {
        self.batteries.ceil().max(0.0) as u32
    }
}
