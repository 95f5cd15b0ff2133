//! Transducer subsystem presets
//!
//! A subsystem code identifies a transducer head. Applying its preset seeds the
//! geometry and a sensible profile configuration; everything stays editable afterwards.

use crate::input::PredictionInput;
use crate::{PredictionError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubsystemPreset {
    pub code: char,
    pub description: &'static str,
    pub system_frequency_hz: f64,
    pub beam_angle_deg: f64,
    pub beams: u32,
    pub beam_diameter_m: f64,
    /// CWPBS
    pub bin_size_m: f64,
    /// CWPBN
    pub bin_count: u32,
    /// CWPBL
    pub blank_m: f64,
    /// CWPP
    pub pings_per_ensemble: u32,
    /// CWPTBP
    pub time_between_pings_s: f64,
    /// CBTTBP
    pub bt_time_between_pings_s: f64,
}

const fn piston(
    code: char,
    description: &'static str,
    system_frequency_hz: f64,
    beam_diameter_m: f64,
    bin_size_m: f64,
    blank_m: f64,
    time_between_pings_s: f64,
) -> SubsystemPreset {
    SubsystemPreset {
        code,
        description,
        system_frequency_hz,
        beam_angle_deg: 20.0,
        beams: 4,
        beam_diameter_m,
        bin_size_m,
        bin_count: 30,
        blank_m,
        pings_per_ensemble: 1,
        time_between_pings_s,
        bt_time_between_pings_s: time_between_pings_s,
    }
}

const fn vertical(base: SubsystemPreset, code: char, description: &'static str) -> SubsystemPreset {
    SubsystemPreset {
        code,
        description,
        beam_angle_deg: 0.0,
        beams: 1,
        ..base
    }
}

const PISTON_1200: SubsystemPreset = piston('1', "1.2 MHz 4 beam 20 degree piston", 1_245_125.0, 0.0254, 1.0, 0.1, 0.25);
const PISTON_600: SubsystemPreset = piston('2', "600 kHz 4 beam 20 degree piston", 622_562.5, 0.0508, 2.0, 0.2, 0.25);
const PISTON_300: SubsystemPreset = piston('3', "300 kHz 4 beam 20 degree piston", 311_281.25, 0.0762, 4.0, 0.4, 0.5);
const PISTON_150: SubsystemPreset = piston('4', "150 kHz 4 beam 20 degree piston", 155_640.625, 0.1524, 8.0, 0.8, 1.0);
const PISTON_75: SubsystemPreset = piston('5', "75 kHz 4 beam 20 degree piston", 77_820.3125, 0.3048, 16.0, 1.6, 2.0);
const PISTON_38: SubsystemPreset = piston('6', "38 kHz 4 beam 20 degree piston", 38_910.156_25, 0.6096, 32.0, 3.2, 4.0);

pub static SUBSYSTEM_PRESETS: [SubsystemPreset; 12] = [
    PISTON_1200,
    PISTON_600,
    PISTON_300,
    PISTON_150,
    PISTON_75,
    PISTON_38,
    vertical(PISTON_1200, 'A', "1.2 MHz vertical beam"),
    vertical(PISTON_600, 'B', "600 kHz vertical beam"),
    vertical(PISTON_300, 'C', "300 kHz vertical beam"),
    vertical(PISTON_150, 'D', "150 kHz vertical beam"),
    vertical(PISTON_75, 'E', "75 kHz vertical beam"),
    vertical(PISTON_38, 'F', "38 kHz vertical beam"),
];

impl SubsystemPreset {
    pub fn lookup(code: char) -> Result<&'static SubsystemPreset> {
        SUBSYSTEM_PRESETS
            .iter()
            .find(|p| p.code == code.to_ascii_uppercase())
            .ok_or(PredictionError::UnknownSubsystem(code))
    }
}

/// Seed `input` from the preset for `code`.
///
/// Overwrites frequency, geometry, beams and the preset's profile fields; every other
/// field is kept.
pub fn apply_preset(mut input: PredictionInput, code: char) -> Result<PredictionInput> {
    let preset = SubsystemPreset::lookup(code)?;

    input.subsystem = Some(preset.code);
    input.system_frequency_hz = preset.system_frequency_hz;
    input.beam_angle_deg = preset.beam_angle_deg;
    input.beams = preset.beams;
    input.beam_diameter_m = preset.beam_diameter_m;
    input.water_profile.bin_size_m = preset.bin_size_m;
    input.water_profile.bin_count = preset.bin_count;
    input.water_profile.blank_m = preset.blank_m;
    input.water_profile.pings_per_ensemble = preset.pings_per_ensemble;
    input.water_profile.time_between_pings_s = preset.time_between_pings_s;
    input.bottom_track.time_between_pings_s = preset.bt_time_between_pings_s;

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::{resolve_band, FrequencyBand};

    #[test]
    fn test_default_input_matches_preset_3() {
        let seeded = apply_preset(PredictionInput::default(), '3').unwrap();
        assert_eq!(seeded, PredictionInput::default());
    }

    #[test]
    fn test_every_preset_resolves_a_band() {
        for preset in SUBSYSTEM_PRESETS.iter() {
            assert!(
                resolve_band(preset.system_frequency_hz).is_some(),
                "preset {} has no band",
                preset.code
            );
        }
    }

    #[test]
    fn test_vertical_preset() {
        let input = apply_preset(PredictionInput::default(), 'c').unwrap();
        assert_eq!(input.subsystem, Some('C'));
        assert_eq!(input.beams, 1);
        assert_eq!(input.beam_angle_deg, 0.0);
        assert_eq!(
            resolve_band(input.system_frequency_hz).map(|b| b.band),
            Some(FrequencyBand::Khz300)
        );
    }

    #[test]
    fn test_preset_keeps_unrelated_fields() {
        let mut input = PredictionInput::default();
        input.deployment_duration_days = 120.0;
        input.environment.temperature_c = 2.0;

        let input = apply_preset(input, '1').unwrap();
        assert_eq!(input.deployment_duration_days, 120.0);
        assert_eq!(input.environment.temperature_c, 2.0);
        assert_eq!(input.system_frequency_hz, 1_245_125.0);
        assert_eq!(input.water_profile.bin_size_m, 1.0);
    }

    #[test]
    fn test_override_after_preset_is_kept() {
        let mut input = PredictionInput::for_subsystem('2').unwrap();
        input.beam_angle_deg = 30.0;
        assert_eq!(input.beam_angle_deg, 30.0);
        assert_eq!(input.system_frequency_hz, 622_562.5);
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(
            apply_preset(PredictionInput::default(), 'Z').unwrap_err(),
            PredictionError::UnknownSubsystem('Z')
        );
    }
}
