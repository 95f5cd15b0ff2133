//! Output formatting

use adcp_prediction::{PredictionInput, PredictionReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// JSON document emitted with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionEnvelope {
    pub generated_at: DateTime<Utc>,
    pub input: PredictionInput,
    pub report: PredictionReport,
}

impl PredictionEnvelope {
    pub fn new(input: PredictionInput, report: PredictionReport) -> Self {
        Self {
            generated_at: Utc::now(),
            input,
            report,
        }
    }
}

fn format_bytes(bytes: f64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Summary table for terminal output.
pub struct Summary<'a> {
    pub input: &'a PredictionInput,
    pub report: &'a PredictionReport,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self.input;
        let report = self.report;
        let b = &report.breakdown;
        let rule = "=".repeat(60);

        writeln!(f, "{}", rule)?;
        writeln!(f, "ADCP Deployment Prediction")?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "Subsystem      : {}  ({} Hz, band {})",
            input.subsystem.map_or("-".to_string(), |c| c.to_string()),
            input.system_frequency_hz,
            report.band.map_or("none".to_string(), |band| band.to_string())
        )?;
        writeln!(
            f,
            "Deployment     : {} days, CEI {} s, {} beams at {} deg",
            input.deployment_duration_days,
            input.ensemble_interval_s,
            input.beams,
            input.beam_angle_deg
        )?;
        if input.burst.enabled {
            writeln!(
                f,
                "Burst          : {} ensembles every {} s",
                input.burst.ensembles_per_burst, input.burst.burst_interval_s
            )?;
        }
        writeln!(
            f,
            "Profile        : {} bins x {} m, blank {} m, {:?}",
            input.water_profile.bin_count,
            input.water_profile.bin_size_m,
            input.water_profile.blank_m,
            input.water_profile.pulse_type
        )?;

        writeln!(f, "\nPOWER")?;
        writeln!(f, "  Total        : {:>12.2} Wh", report.power_wh)?;
        for (label, wh) in [
            ("Bottom track", b.bottom_track_wh),
            ("Wakeup", b.wakeup_wh),
            ("Init", b.init_wh),
            ("Transmit", b.transmit_wh),
            ("Receive", b.receive_wh),
            ("Save", b.save_wh),
            ("Sleep", b.sleep_wh),
            ("Cap charge", b.cap_charge_wh),
        ] {
            writeln!(f, "  {:<13}: {:>12.2} Wh", label, wh)?;
        }
        writeln!(
            f,
            "  Batteries    : {:>12.2} ({} x {})",
            report.batteries,
            report.whole_batteries(),
            input.battery.battery_type.label()
        )?;

        writeln!(f, "\nRANGE")?;
        writeln!(f, "  Water profile: {:>12.2} m", report.ranges.water_profile_m)?;
        writeln!(f, "  Bottom track : {:>12.2} m", report.ranges.bottom_track_m)?;
        writeln!(f, "  First bin    : {:>12.2} m", report.ranges.first_bin_position_m)?;
        writeln!(f, "  Bins cover   : {:>12.2} m", report.ranges.profile_range_settings_m)?;
        writeln!(f, "  Absorption   : {:>12.4} dB/m", report.absorption_db_per_m)?;

        writeln!(f, "\nVELOCITY")?;
        writeln!(f, "  Max velocity : {:>12.3} m/s", report.max_velocity_mps)?;
        writeln!(f, "  Std dev      : {:>12.4} m/s", report.std_dev_mps)?;

        writeln!(f, "\nSTORAGE")?;
        writeln!(f, "  Ensemble     : {:>12} bytes", report.ensemble_size_bytes)?;
        writeln!(f, "  Deployment   : {:>15}", format_bytes(report.storage_bytes))?;
        write!(f, "{}", rule)
    }
}

pub fn render_text(input: &PredictionInput, report: &PredictionReport) -> String {
    Summary { input, report }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default() {
        let input = PredictionInput::default();
        let report = PredictionReport::compute(&input).unwrap();
        let text = render_text(&input, &report);
        assert!(text.contains("band 300 kHz"));
        assert!(text.contains("4536 bytes"));
        assert!(text.contains("Alkaline 38C"));
        assert!(!text.contains("Burst"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512.0), "512.00 B");
        assert_eq!(format_bytes(1536.0), "1.50 KB");
        assert_eq!(format_bytes(3.0 * 1024.0 * 1024.0 * 1024.0), "3.00 GB");
    }

    #[test]
    fn test_envelope_json() {
        let input = PredictionInput::default();
        let report = PredictionReport::compute(&input).unwrap();
        let json = serde_json::to_value(PredictionEnvelope::new(input, report)).unwrap();
        assert!(json["generated_at"].is_string());
        assert_eq!(json["input"]["beams"], 4);
        assert_eq!(json["report"]["ensemble_size_bytes"], 4536);
    }
}
