//! Prediction input
//!
//! Every parameter a prediction reads, grouped the way the instrument's command set
//! groups them. Field names are descriptive; the serde aliases accept the command
//! mnemonics (`CWPBN`, `CEI`, ...) so scenario files can use either.
//!
//! Defaults describe a 4-beam 20° 300 kHz system, i.e. subsystem preset `'3'`.

use crate::battery::{BatteryType, DEFAULT_DERATE};
use crate::{PredictionError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// System frequency of the default 300 kHz subsystem (Hz).
pub const DEFAULT_SYS_FREQ: f64 = 311_281.25;
pub const DEFAULT_DEPLOYMENT_DAYS: f64 = 30.0;
pub const DEFAULT_CEI: f64 = 1.0;
pub const DEFAULT_BEAMS: u32 = 4;
pub const DEFAULT_BEAM_ANGLE: f64 = 20.0;
pub const DEFAULT_BEAM_DIAMETER: f64 = 0.0762;
pub const DEFAULT_CYCLES_PER_ELEMENT: f64 = 12.0;
pub const DEFAULT_SUBSYSTEM: char = '3';

pub const DEFAULT_CWPBL: f64 = 0.4;
pub const DEFAULT_CWPBS: f64 = 4.0;
pub const DEFAULT_CWPBN: u32 = 30;
pub const DEFAULT_CWPBB_LAG_LENGTH: f64 = 1.0;
pub const DEFAULT_CWPP: u32 = 1;
pub const DEFAULT_CWPTBP: f64 = 0.5;
pub const DEFAULT_CBTTBP: f64 = 0.5;

pub const DEFAULT_TEMPERATURE: f64 = 10.0;
pub const DEFAULT_SALINITY: f64 = 35.0;
pub const DEFAULT_XDCR_DEPTH: f64 = 0.0;
pub const DEFAULT_SPEED_OF_SOUND: f64 = 1490.0;

pub const DEFAULT_BOOT_POWER: f64 = 1.80;
pub const DEFAULT_WAKEUP_TIME: f64 = 0.40;
pub const DEFAULT_INIT_POWER: f64 = 2.80;
pub const DEFAULT_INIT_TIME: f64 = 0.25;
pub const DEFAULT_RECEIVE_POWER: f64 = 3.80;
pub const DEFAULT_SAVE_POWER: f64 = 1.80;
pub const DEFAULT_SAVE_TIME: f64 = 0.15;
pub const DEFAULT_SLEEP_POWER: f64 = 0.0125;

pub const DEFAULT_ENSEMBLES_PER_BURST: u32 = 4096;
pub const DEFAULT_BURST_INTERVAL: f64 = 3600.0;

pub const DEFAULT_SNR: f64 = 30.0;
pub const DEFAULT_BETA: f64 = 1.0;
pub const DEFAULT_NB_FUDGE: f64 = 1.4;

/// Water-profile transmit pulse coding (CWPBB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmitPulseType {
    Narrowband,
    Broadband,
    NonCodedPulseToPulse,
    BroadbandPulseToPulse,
    NonCodedBroadbandPulseToPulse,
}

impl TransmitPulseType {
    /// Numeric value sent with the CWPBB command.
    pub fn code(&self) -> u8 {
        match self {
            Self::Narrowband => 0,
            Self::Broadband => 1,
            Self::NonCodedPulseToPulse => 2,
            Self::BroadbandPulseToPulse => 3,
            Self::NonCodedBroadbandPulseToPulse => 4,
        }
    }

    /// Whether the transmit pulse carries a repeated phase code.
    pub fn is_coded(&self) -> bool {
        matches!(self, Self::Broadband | Self::BroadbandPulseToPulse)
    }
}

impl FromStr for TransmitPulseType {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "nb" | "narrowband" => Ok(Self::Narrowband),
            "1" | "bb" | "broadband" => Ok(Self::Broadband),
            "2" | "non_coded_pulse_to_pulse" => Ok(Self::NonCodedPulseToPulse),
            "3" | "broadband_pulse_to_pulse" => Ok(Self::BroadbandPulseToPulse),
            "4" | "non_coded_broadband_pulse_to_pulse" => Ok(Self::NonCodedBroadbandPulseToPulse),
            other => Err(PredictionError::InvalidInput {
                field: "water_profile.pulse_type",
                reason: format!("unknown pulse type '{}'", other),
            }),
        }
    }
}

/// Bottom-track transmit mode (CBTBB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomTrackPulseType {
    NarrowbandLongRange,
    BroadbandCoded,
    BroadbandNonCoded,
    BroadbandNonCodedPulseToPulse,
    AutoSwitch,
}

impl BottomTrackPulseType {
    pub fn code(&self) -> u8 {
        match self {
            Self::NarrowbandLongRange => 0,
            Self::BroadbandCoded => 1,
            Self::BroadbandNonCoded => 2,
            Self::BroadbandNonCodedPulseToPulse => 4,
            Self::AutoSwitch => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterProfileSettings {
    /// CWPON
    #[serde(alias = "CWPON")]
    pub enabled: bool,
    /// CWPBL: blank distance (m)
    #[serde(alias = "CWPBL")]
    pub blank_m: f64,
    /// CWPBS: bin size (m)
    #[serde(alias = "CWPBS")]
    pub bin_size_m: f64,
    /// CWPBN: number of bins
    #[serde(alias = "CWPBN")]
    pub bin_count: u32,
    /// CWPBB lag length (m)
    #[serde(alias = "CWPBB_LagLength")]
    pub lag_length_m: f64,
    /// CWPBB transmit pulse type
    #[serde(alias = "CWPBB_TransmitPulseType")]
    pub pulse_type: TransmitPulseType,
    /// CWPP: pings averaged per ensemble
    #[serde(alias = "CWPP")]
    pub pings_per_ensemble: u32,
    /// CWPTBP: time between pings (s)
    #[serde(alias = "CWPTBP")]
    pub time_between_pings_s: f64,
    /// Transmit the full code instead of a single lag
    #[serde(alias = "BroadbandPower")]
    pub broadband_power: bool,
}

impl Default for WaterProfileSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            blank_m: DEFAULT_CWPBL,
            bin_size_m: DEFAULT_CWPBS,
            bin_count: DEFAULT_CWPBN,
            lag_length_m: DEFAULT_CWPBB_LAG_LENGTH,
            pulse_type: TransmitPulseType::Broadband,
            pings_per_ensemble: DEFAULT_CWPP,
            time_between_pings_s: DEFAULT_CWPTBP,
            broadband_power: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomTrackSettings {
    /// CBTON
    #[serde(alias = "CBTON")]
    pub enabled: bool,
    /// CBTBB mode
    #[serde(alias = "CBTBB_TransmitPulseType")]
    pub pulse_type: BottomTrackPulseType,
    /// CBTTBP: time between bottom-track pings (s)
    #[serde(alias = "CBTTBP")]
    pub time_between_pings_s: f64,
}

impl Default for BottomTrackSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            pulse_type: BottomTrackPulseType::BroadbandCoded,
            time_between_pings_s: DEFAULT_CBTTBP,
        }
    }
}

/// Water the transducer sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    #[serde(alias = "Temperature")]
    pub temperature_c: f64,
    #[serde(alias = "Salinity")]
    pub salinity_ppt: f64,
    #[serde(alias = "XdcrDepth")]
    pub transducer_depth_m: f64,
    #[serde(alias = "SpeedOfSound")]
    pub speed_of_sound_mps: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature_c: DEFAULT_TEMPERATURE,
            salinity_ppt: DEFAULT_SALINITY,
            transducer_depth_m: DEFAULT_XDCR_DEPTH,
            speed_of_sound_mps: DEFAULT_SPEED_OF_SOUND,
        }
    }
}

/// Electronics power draw (W) and durations (s) of each ensemble phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPower {
    #[serde(alias = "SystemBootPower")]
    pub boot_power_w: f64,
    #[serde(alias = "SystemWakeupTime")]
    pub wakeup_time_s: f64,
    #[serde(alias = "SystemInitPower")]
    pub init_power_w: f64,
    #[serde(alias = "SystemInitTime")]
    pub init_time_s: f64,
    #[serde(alias = "SystemRcvPower")]
    pub receive_power_w: f64,
    #[serde(alias = "SystemSavePower")]
    pub save_power_w: f64,
    #[serde(alias = "SystemSaveTime")]
    pub save_time_s: f64,
    #[serde(alias = "SystemSleepPower")]
    pub sleep_power_w: f64,
}

impl Default for SystemPower {
    fn default() -> Self {
        Self {
            boot_power_w: DEFAULT_BOOT_POWER,
            wakeup_time_s: DEFAULT_WAKEUP_TIME,
            init_power_w: DEFAULT_INIT_POWER,
            init_time_s: DEFAULT_INIT_TIME,
            receive_power_w: DEFAULT_RECEIVE_POWER,
            save_power_w: DEFAULT_SAVE_POWER,
            save_time_s: DEFAULT_SAVE_TIME,
            sleep_power_w: DEFAULT_SLEEP_POWER,
        }
    }
}

/// CBI burst sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstSettings {
    #[serde(alias = "IsBurst")]
    pub enabled: bool,
    #[serde(alias = "CBI_EnsemblesPerBurst")]
    pub ensembles_per_burst: u32,
    /// Start-to-start time between bursts (s)
    #[serde(alias = "CBI_BurstInterval")]
    pub burst_interval_s: f64,
    /// Alternate bursts with the other subsystem
    #[serde(alias = "CBI_IsInterleaved")]
    pub interleaved: bool,
}

impl Default for BurstSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            ensembles_per_burst: DEFAULT_ENSEMBLES_PER_BURST,
            burst_interval_s: DEFAULT_BURST_INTERVAL,
            interleaved: false,
        }
    }
}

/// Number of recordable datasets.
pub const DATASET_COUNT: usize = 15;

/// CED output-enable flags, `flags[0]` is dataset E0000001.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetFlags(pub [bool; DATASET_COUNT]);

impl DatasetFlags {
    pub const COUNT: usize = DATASET_COUNT;

    pub fn all() -> Self {
        Self([true; Self::COUNT])
    }

    pub fn none() -> Self {
        Self([false; Self::COUNT])
    }

    /// Whether dataset `E00000nn` is recorded, `number` in `1..=15`.
    pub fn is_enabled(&self, number: usize) -> bool {
        number
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, number: usize, enabled: bool) {
        if let Some(flag) = number.checked_sub(1).and_then(|i| self.0.get_mut(i)) {
            *flag = enabled;
        }
    }
}

impl Default for DatasetFlags {
    fn default() -> Self {
        let mut flags = Self::all();
        flags.set(11, false);
        flags
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatterySettings {
    pub battery_type: BatteryType,
    /// Usable fraction of nominal capacity
    #[serde(alias = "BatteryDerate")]
    pub derate: f64,
    /// Self discharge (Wh per year)
    #[serde(alias = "BatterySelfDischargePerYear")]
    pub self_discharge_per_year: f64,
}

impl BatterySettings {
    /// Settings for a pack type using its own self-discharge figure.
    pub fn for_type(battery_type: BatteryType) -> Self {
        Self {
            battery_type,
            derate: DEFAULT_DERATE,
            self_discharge_per_year: battery_type.self_discharge_wh_per_year(),
        }
    }
}

impl Default for BatterySettings {
    fn default() -> Self {
        Self::for_type(BatteryType::default())
    }
}

/// Standard-deviation model tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StdDevTuning {
    #[serde(alias = "SNR")]
    pub snr_db: f64,
    #[serde(alias = "Beta")]
    pub beta: f64,
    #[serde(alias = "NbFudge")]
    pub nb_fudge: f64,
}

impl Default for StdDevTuning {
    fn default() -> Self {
        Self {
            snr_db: DEFAULT_SNR,
            beta: DEFAULT_BETA,
            nb_fudge: DEFAULT_NB_FUDGE,
        }
    }
}

/// One what-if deployment scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionInput {
    /// Subsystem preset last applied, if any
    pub subsystem: Option<char>,
    #[serde(alias = "DeploymentDuration")]
    pub deployment_duration_days: f64,
    /// CEI: ensemble interval (s)
    #[serde(alias = "CEI")]
    pub ensemble_interval_s: f64,
    #[serde(alias = "Beams")]
    pub beams: u32,
    #[serde(alias = "SystemFrequency")]
    pub system_frequency_hz: f64,
    #[serde(alias = "CyclesPerElement")]
    pub cycles_per_element: f64,
    #[serde(alias = "BeamAngle")]
    pub beam_angle_deg: f64,
    #[serde(alias = "BeamDiameter")]
    pub beam_diameter_m: f64,
    pub water_profile: WaterProfileSettings,
    pub bottom_track: BottomTrackSettings,
    pub environment: Environment,
    pub system_power: SystemPower,
    pub burst: BurstSettings,
    pub datasets: DatasetFlags,
    pub battery: BatterySettings,
    pub std_dev: StdDevTuning,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            subsystem: Some(DEFAULT_SUBSYSTEM),
            deployment_duration_days: DEFAULT_DEPLOYMENT_DAYS,
            ensemble_interval_s: DEFAULT_CEI,
            beams: DEFAULT_BEAMS,
            system_frequency_hz: DEFAULT_SYS_FREQ,
            cycles_per_element: DEFAULT_CYCLES_PER_ELEMENT,
            beam_angle_deg: DEFAULT_BEAM_ANGLE,
            beam_diameter_m: DEFAULT_BEAM_DIAMETER,
            water_profile: WaterProfileSettings::default(),
            bottom_track: BottomTrackSettings::default(),
            environment: Environment::default(),
            system_power: SystemPower::default(),
            burst: BurstSettings::default(),
            datasets: DatasetFlags::default(),
            battery: BatterySettings::default(),
            std_dev: StdDevTuning::default(),
        }
    }
}

impl PredictionInput {
    /// Defaults seeded from a subsystem preset.
    pub fn for_subsystem(code: char) -> Result<Self> {
        crate::subsystem::apply_preset(Self::default(), code)
    }

    pub fn beam_angle_rad(&self) -> f64 {
        self.beam_angle_deg.to_radians()
    }

    /// Whether the beams point straight along the instrument axis.
    pub fn is_vertical_beam(&self) -> bool {
        self.beam_angle_deg == 0.0
    }

    pub fn deployment_seconds(&self) -> f64 {
        self.deployment_duration_days * crate::SECONDS_PER_DAY
    }

    /// Reject scenarios whose numbers are physically meaningless.
    ///
    /// The calculations themselves tolerate these values (offending terms become 0);
    /// this check is for callers that want to refuse them instead.
    pub fn validate(&self) -> Result<()> {
        positive("deployment_duration_days", self.deployment_duration_days)?;
        positive("ensemble_interval_s", self.ensemble_interval_s)?;
        positive("system_frequency_hz", self.system_frequency_hz)?;
        positive("cycles_per_element", self.cycles_per_element)?;
        positive("environment.speed_of_sound_mps", self.environment.speed_of_sound_mps)?;
        non_negative("environment.salinity_ppt", self.environment.salinity_ppt)?;
        non_negative("environment.transducer_depth_m", self.environment.transducer_depth_m)?;
        non_negative("water_profile.blank_m", self.water_profile.blank_m)?;
        positive("water_profile.bin_size_m", self.water_profile.bin_size_m)?;
        positive("water_profile.lag_length_m", self.water_profile.lag_length_m)?;

        if self.beams == 0 {
            return Err(invalid("beams", "at least one beam is required"));
        }
        if self.water_profile.bin_count == 0 {
            return Err(invalid("water_profile.bin_count", "at least one bin is required"));
        }
        if !(0.0..90.0).contains(&self.beam_angle_deg) {
            return Err(invalid(
                "beam_angle_deg",
                format!("{} is outside [0, 90)", self.beam_angle_deg),
            ));
        }
        if !(0.0..=1.0).contains(&self.battery.derate) {
            return Err(invalid(
                "battery.derate",
                format!("{} is outside [0, 1]", self.battery.derate),
            ));
        }
        if self.burst.enabled {
            positive("burst.burst_interval_s", self.burst.burst_interval_s)?;
            if self.burst.ensembles_per_burst == 0 {
                return Err(invalid("burst.ensembles_per_burst", "a burst needs at least one ensemble"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> PredictionError {
    PredictionError::InvalidInput {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{} must be positive", value)))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{} must not be negative", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_300khz_system() {
        let input = PredictionInput::default();
        assert_eq!(input.system_frequency_hz, DEFAULT_SYS_FREQ);
        assert_eq!(input.beams, 4);
        assert_eq!(input.water_profile.bin_count, 30);
        assert_eq!(input.subsystem, Some('3'));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_dataset_flags() {
        let flags = DatasetFlags::default();
        assert!(flags.is_enabled(1));
        assert!(!flags.is_enabled(11));
        assert!(flags.is_enabled(15));
        assert!(!flags.is_enabled(0));
        assert!(!flags.is_enabled(16));

        let mut flags = DatasetFlags::none();
        flags.set(3, true);
        flags.set(99, true);
        assert!(flags.is_enabled(3));
        assert_eq!(flags.0.iter().filter(|f| **f).count(), 1);
    }

    #[test]
    fn test_pulse_type_codes() {
        assert_eq!(TransmitPulseType::Narrowband.code(), 0);
        assert_eq!(TransmitPulseType::Broadband.code(), 1);
        assert!(TransmitPulseType::BroadbandPulseToPulse.is_coded());
        assert!(!TransmitPulseType::NonCodedPulseToPulse.is_coded());
        assert_eq!(BottomTrackPulseType::AutoSwitch.code(), 7);
    }

    #[test]
    fn test_pulse_type_from_str() {
        assert_eq!("NB".parse::<TransmitPulseType>().unwrap(), TransmitPulseType::Narrowband);
        assert_eq!("broadband".parse::<TransmitPulseType>().unwrap(), TransmitPulseType::Broadband);
        assert_eq!("3".parse::<TransmitPulseType>().unwrap(), TransmitPulseType::BroadbandPulseToPulse);
        assert!("chirp".parse::<TransmitPulseType>().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_speed_of_sound() {
        let mut input = PredictionInput::default();
        input.environment.speed_of_sound_mps = 0.0;
        match input.validate() {
            Err(PredictionError::InvalidInput { field, .. }) => {
                assert_eq!(field, "environment.speed_of_sound_mps")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_validate_burst_needs_interval() {
        let mut input = PredictionInput::default();
        input.burst.enabled = true;
        input.burst.burst_interval_s = 0.0;
        assert!(input.validate().is_err());

        input.burst.enabled = false;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "DeploymentDuration": 90,
            "CEI": 600,
            "water_profile": { "CWPBN": 50, "CWPBB_TransmitPulseType": "narrowband" },
            "datasets": [true, true, true, true, true, true, true, true, true, true, false, false, false, false, false]
        }"#;
        let input: PredictionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.deployment_duration_days, 90.0);
        assert_eq!(input.ensemble_interval_s, 600.0);
        assert_eq!(input.water_profile.bin_count, 50);
        assert_eq!(input.water_profile.pulse_type, TransmitPulseType::Narrowband);
        assert_eq!(input.water_profile.bin_size_m, DEFAULT_CWPBS);
        assert!(!input.datasets.is_enabled(12));
        assert_eq!(input.system_frequency_hz, DEFAULT_SYS_FREQ);
    }

    #[test]
    fn test_battery_settings_follow_type() {
        let settings = BatterySettings::for_type(BatteryType::Lithium38C);
        assert_eq!(settings.self_discharge_per_year, 12.0);
        assert_eq!(settings.derate, DEFAULT_DERATE);
    }
}
