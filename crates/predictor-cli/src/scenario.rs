//! Scenario loading from JSON files

use crate::Result;
use adcp_prediction::PredictionInput;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Load a scenario; fields missing from the file keep their defaults.
///
/// Field names or command mnemonics (`CEI`, `CWPBN`, ...) are both accepted.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<PredictionInput> {
    let path = path.as_ref();
    info!("Loading scenario from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let input: PredictionInput = serde_json::from_reader(reader)?;

    debug!(
        "Scenario: {} days, CEI {} s, {} Hz, {} bins of {} m",
        input.deployment_duration_days,
        input.ensemble_interval_s,
        input.system_frequency_hz,
        input.water_profile.bin_count,
        input.water_profile.bin_size_m
    );

    Ok(input)
}
