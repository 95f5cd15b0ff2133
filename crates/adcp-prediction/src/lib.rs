//! ADCP Deployment Prediction
//!
//! Predicts, before an instrument is deployed, what a configuration will cost and what it
//! will deliver: energy (continuous and burst), battery count, water-profile and
//! bottom-track range, ambiguity velocity, velocity standard deviation and the bytes
//! recorded per ensemble and per deployment.
//!
//! Every calculation is a pure function over a [`PredictionInput`]. Frequency-dependent
//! constants live in one static table ([`band::BANDS`]) and are selected through
//! [`band::resolve_band`].
//!
//! ```text
//! PredictionInput ──► power ─────► Wh ──► battery ──► batteries
//!        │        ├─► range ─────► PredictedRanges
//!        │        ├─► velocity ──► max velocity / std dev
//!        │        └─► storage ───► bytes
//!        └── subsystem::apply_preset (one-time seeding)
//! ```
//!
//! Singular inputs (zero speed of sound, zero lag, frequencies outside every band) never
//! fail a calculation: the affected term contributes zero. Use
//! [`PredictionInput::validate`] to reject physically meaningless scenarios up front.

use thiserror::Error;

pub mod absorption;
pub mod band;
pub mod battery;
pub mod input;
pub mod power;
pub mod range;
pub mod report;
pub mod sampling;
pub mod storage;
pub mod subsystem;
pub mod velocity;

pub use absorption::absorption;
pub use band::{resolve_band, BandConstants, FrequencyBand, BANDS};
pub use battery::{battery_usage, try_battery_usage, BatteryType};
pub use input::{
    BatterySettings, BottomTrackPulseType, BottomTrackSettings, BurstSettings, DatasetFlags,
    Environment, PredictionInput, StdDevTuning, SystemPower, TransmitPulseType,
    WaterProfileSettings,
};
pub use power::{
    calculate_power, calculate_power_burst, ensemble_count, power_breakdown, PowerBreakdown,
};
pub use range::{predicted_range, PredictedRanges};
pub use report::PredictionReport;
pub use sampling::SampleGeometry;
pub use storage::{data_storage, data_storage_burst, ensemble_size, Dataset, FieldCount, DATASETS};
pub use subsystem::{apply_preset, SubsystemPreset, SUBSYSTEM_PRESETS};
pub use velocity::{max_velocity, standard_deviation};

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Seconds in one hour; watt-seconds divided by this give watt-hours.
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Unknown subsystem code: '{0}'")]
    UnknownSubsystem(char),
    #[error("Invalid input {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("Battery has no usable energy left: {available_wh:.2} Wh available")]
    BatteryExhausted { available_wh: f64 },
}

pub type Result<T> = std::result::Result<T, PredictionError>;

/// `10 * log10(x)`, contributing 0 dB for non-positive arguments.
#[inline]
pub(crate) fn db10(x: f64) -> f64 {
    if x > 0.0 && x.is_finite() {
        10.0 * x.log10()
    } else {
        0.0
    }
}

/// `numerator / denominator`, or 0 when the denominator is zero.
#[inline]
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
