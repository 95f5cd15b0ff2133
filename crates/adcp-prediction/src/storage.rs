//! Recorded ensemble size and deployment storage
//!
//! An ensemble is a 32-byte header, the enabled datasets and a 4-byte checksum. Every
//! dataset stores 4-byte values behind a 7-value dataset header.

use crate::input::{DatasetFlags, PredictionInput};
use crate::power::continuous_ensemble_count;
use crate::SECONDS_PER_DAY;
use serde::Serialize;

const BYTES_PER_VALUE: u64 = 4;
const DATASET_HEADER_VALUES: u64 = 7;
const ENSEMBLE_HEADER_BYTES: u64 = 32;
const CHECKSUM_BYTES: u64 = 4;

/// How many values a dataset carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldCount {
    /// One value per beam per bin
    PerBin,
    /// `n` values per beam
    PerBeam(u64),
    /// `n` values regardless of geometry
    Fixed(u64),
    /// Content-dependent; not counted
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dataset {
    /// `E00000nn` number, 1-based
    pub number: usize,
    pub name: &'static str,
    pub fields: FieldCount,
}

const fn dataset(number: usize, name: &'static str, fields: FieldCount) -> Dataset {
    Dataset {
        number,
        name,
        fields,
    }
}

pub static DATASETS: [Dataset; DatasetFlags::COUNT] = [
    dataset(1, "Beam velocity", FieldCount::PerBin),
    dataset(2, "Instrument velocity", FieldCount::PerBin),
    dataset(3, "Earth velocity", FieldCount::PerBin),
    dataset(4, "Amplitude", FieldCount::PerBin),
    dataset(5, "Correlation", FieldCount::PerBin),
    dataset(6, "Good beam pings", FieldCount::PerBin),
    dataset(7, "Good earth pings", FieldCount::PerBin),
    dataset(8, "Ensemble", FieldCount::Fixed(23)),
    dataset(9, "Ancillary", FieldCount::Fixed(19)),
    dataset(10, "Bottom track", FieldCount::PerBeam(15)),
    dataset(11, "NMEA", FieldCount::Variable),
    dataset(12, "Earth water mass", FieldCount::PerBeam(4)),
    dataset(13, "Instrument water mass", FieldCount::PerBeam(3)),
    dataset(14, "Profile engineering", FieldCount::Fixed(25)),
    dataset(15, "Bottom track engineering", FieldCount::PerBeam(8)),
];

impl Dataset {
    /// Bytes this dataset adds to one ensemble. Saturates at `u64::MAX`.
    pub fn size_bytes(&self, beams: u64, bins: u64) -> u64 {
        let values = match self.fields {
            FieldCount::PerBin => bins.saturating_mul(beams),
            FieldCount::PerBeam(n) => n.saturating_mul(beams),
            FieldCount::Fixed(n) => n,
            FieldCount::Variable => return 0,
        };
        BYTES_PER_VALUE.saturating_mul(values.saturating_add(DATASET_HEADER_VALUES))
    }
}

/// Bytes in one recorded ensemble. Saturates at `u64::MAX`.
pub fn ensemble_size(input: &PredictionInput) -> u64 {
    let beams = u64::from(input.beams);
    let bins = u64::from(input.water_profile.bin_count);

    DATASETS
        .iter()
        .filter(|d| input.datasets.is_enabled(d.number))
        .map(|d| d.size_bytes(beams, bins))
        .fold(CHECKSUM_BYTES + ENSEMBLE_HEADER_BYTES, u64::saturating_add)
}

/// Bytes recorded over a continuous deployment.
pub fn data_storage(input: &PredictionInput) -> f64 {
    ensemble_size(input) as f64 * continuous_ensemble_count(input)
}

/// Bytes recorded over a burst deployment.
///
/// Bursts repeat every burst interval, or back to back when a burst outlasts it.
pub fn data_storage_burst(input: &PredictionInput) -> f64 {
    let samples = f64::from(input.burst.ensembles_per_burst);
    let period = input
        .burst
        .burst_interval_s
        .max(samples * input.ensemble_interval_s);
    if period <= 0.0 {
        return 0.0;
    }
    let bursts = input.deployment_duration_days * SECONDS_PER_DAY / period;
    ensemble_size(input) as f64 * samples * bursts
}
