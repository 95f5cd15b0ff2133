//! Command-line overrides applied on top of a scenario

use crate::Result;
use adcp_prediction::{apply_preset, BatterySettings, BatteryType, PredictionInput, TransmitPulseType};
use clap::Args;
use tracing::debug;

/// Per-field overrides; unset flags leave the scenario untouched.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Subsystem preset code (1-6, A-F)
    #[arg(short = 's', long)]
    pub subsystem: Option<char>,

    /// Deployment duration in days
    #[arg(short = 'd', long)]
    pub days: Option<f64>,

    /// Ensemble interval in seconds (CEI)
    #[arg(long)]
    pub cei: Option<f64>,

    /// Number of bins (CWPBN)
    #[arg(long)]
    pub bins: Option<u32>,

    /// Bin size in meters (CWPBS)
    #[arg(long)]
    pub bin_size: Option<f64>,

    /// Blank distance in meters (CWPBL)
    #[arg(long)]
    pub blank: Option<f64>,

    /// Broadband lag length in meters
    #[arg(long)]
    pub lag: Option<f64>,

    /// Transmit pulse type (narrowband, broadband, 0-4)
    #[arg(long)]
    pub pulse: Option<TransmitPulseType>,

    /// Pings per ensemble (CWPP)
    #[arg(long)]
    pub pings: Option<u32>,

    /// Ensembles per burst; enables burst mode
    #[arg(long)]
    pub burst_samples: Option<u32>,

    /// Burst interval in seconds; enables burst mode
    #[arg(long)]
    pub burst_interval: Option<f64>,

    /// Battery pack (alkaline_38c, lithium_38c, alkaline_7dd, lithium_7dd)
    #[arg(long)]
    pub battery: Option<BatteryType>,
}

impl Overrides {
    /// Apply the preset first, then every explicit flag.
    pub fn apply(&self, input: PredictionInput) -> Result<PredictionInput> {
        let mut input = match self.subsystem {
            Some(code) => {
                debug!("Applying subsystem preset '{}'", code);
                apply_preset(input, code)?
            }
            None => input,
        };

        if let Some(days) = self.days {
            input.deployment_duration_days = days;
        }
        if let Some(cei) = self.cei {
            input.ensemble_interval_s = cei;
        }
        if let Some(bins) = self.bins {
            input.water_profile.bin_count = bins;
        }
        if let Some(bin_size) = self.bin_size {
            input.water_profile.bin_size_m = bin_size;
        }
        if let Some(blank) = self.blank {
            input.water_profile.blank_m = blank;
        }
        if let Some(lag) = self.lag {
            input.water_profile.lag_length_m = lag;
        }
        if let Some(pulse) = self.pulse {
            input.water_profile.pulse_type = pulse;
        }
        if let Some(pings) = self.pings {
            input.water_profile.pings_per_ensemble = pings;
        }
        if let Some(samples) = self.burst_samples {
            input.burst.enabled = true;
            input.burst.ensembles_per_burst = samples;
        }
        if let Some(interval) = self.burst_interval {
            input.burst.enabled = true;
            input.burst.burst_interval_s = interval;
        }
        if let Some(battery) = self.battery {
            input.battery = BatterySettings {
                derate: input.battery.derate,
                ..BatterySettings::for_type(battery)
            };
        }

        Ok(input)
    }
}
