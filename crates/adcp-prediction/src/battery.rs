//! Battery packs and battery-count estimation

use crate::{PredictionError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Days in the self-discharge year.
const DAYS_PER_YEAR: f64 = 365.0;

/// Default usable fraction of a pack's nominal capacity.
pub const DEFAULT_DERATE: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BatteryType {
    #[serde(rename = "alkaline_38c")]
    Alkaline38C,
    #[serde(rename = "lithium_38c")]
    Lithium38C,
    #[serde(rename = "alkaline_7dd")]
    Alkaline7DD,
    #[serde(rename = "lithium_7dd")]
    Lithium7DD,
    /// Caller-specified pack
    #[serde(rename = "custom")]
    Custom { capacity_wh: f64, self_discharge_wh_per_year: f64 },
}

impl BatteryType {
    /// Nominal energy (Wh) of a fresh pack.
    pub fn capacity_wh(&self) -> f64 {
        match self {
            Self::Alkaline38C => 440.0,
            Self::Lithium38C => 1200.0,
            Self::Alkaline7DD => 250.0,
            Self::Lithium7DD => 720.0,
            Self::Custom { capacity_wh, .. } => *capacity_wh,
        }
    }

    /// Energy lost to self discharge per year (Wh).
    pub fn self_discharge_wh_per_year(&self) -> f64 {
        match self {
            Self::Alkaline38C => 22.0,
            Self::Lithium38C => 12.0,
            Self::Alkaline7DD => 12.5,
            Self::Lithium7DD => 7.2,
            Self::Custom {
                self_discharge_wh_per_year,
                ..
            } => *self_discharge_wh_per_year,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Alkaline38C => "Alkaline 38C",
            Self::Lithium38C => "Lithium 38C",
            Self::Alkaline7DD => "Alkaline 7DD",
            Self::Lithium7DD => "Lithium 7DD",
            Self::Custom { .. } => "Custom",
        }
    }
}

impl Default for BatteryType {
    fn default() -> Self {
        Self::Alkaline38C
    }
}

impl FromStr for BatteryType {
    type Err = PredictionError;

    /// Named packs only; a custom pack needs its capacity and comes from a scenario file.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "alkaline_38c" => Ok(Self::Alkaline38C),
            "lithium_38c" => Ok(Self::Lithium38C),
            "alkaline_7dd" => Ok(Self::Alkaline7DD),
            "lithium_7dd" => Ok(Self::Lithium7DD),
            other => Err(PredictionError::InvalidInput {
                field: "battery.battery_type",
                reason: format!("unknown battery type '{}'", other),
            }),
        }
    }
}

fn available_wh(deployment_days: f64, capacity_wh: f64, derate: f64, self_discharge: f64) -> f64 {
    capacity_wh * derate - self_discharge * deployment_days / DAYS_PER_YEAR
}

/// Number of battery packs a deployment consumes.
///
/// No guard: a non-positive available energy produces a meaningless count. Use
/// [`try_battery_usage`] when the inputs are not already known to be sane.
pub fn battery_usage(
    power_usage_wh: f64,
    deployment_days: f64,
    capacity_wh: f64,
    derate: f64,
    self_discharge_per_year: f64,
) -> f64 {
    power_usage_wh / available_wh(deployment_days, capacity_wh, derate, self_discharge_per_year)
}

/// [`battery_usage`], rejecting packs that self-discharge to nothing over the deployment.
pub fn try_battery_usage(
    power_usage_wh: f64,
    deployment_days: f64,
    capacity_wh: f64,
    derate: f64,
    self_discharge_per_year: f64,
) -> Result<f64> {
    let available = available_wh(deployment_days, capacity_wh, derate, self_discharge_per_year);
    if available <= 0.0 || !available.is_finite() {
        return Err(PredictionError::BatteryExhausted {
            available_wh: available,
        });
    }
    Ok(power_usage_wh / available)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_usage_one_year() {
        // 440 * 0.85 - 22 = 352 Wh usable
        let count = battery_usage(704.0, 365.0, 440.0, 0.85, 22.0);
        assert!((count - 2.0).abs() < 1e-9, "count: {}", count);
    }

    #[test]
    fn test_battery_usage_no_discharge() {
        let count = battery_usage(374.0, 0.0, 440.0, 0.85, 22.0);
        assert!((count - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_try_battery_usage_rejects_exhausted_pack() {
        // 100 * 0.5 = 50 Wh, 100 Wh/yr discharge over a year leaves -50
        let err = try_battery_usage(10.0, 365.0, 100.0, 0.5, 100.0).unwrap_err();
        match err {
            PredictionError::BatteryExhausted { available_wh } => {
                assert!((available_wh + 50.0).abs() < 1e-9)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_battery_table() {
        assert_eq!(BatteryType::default(), BatteryType::Alkaline38C);
        assert_eq!(BatteryType::Lithium38C.capacity_wh(), 1200.0);
        let custom = BatteryType::Custom {
            capacity_wh: 90.0,
            self_discharge_wh_per_year: 1.0,
        };
        assert_eq!(custom.capacity_wh(), 90.0);
        assert_eq!(custom.self_discharge_wh_per_year(), 1.0);
    }

    #[test]
    fn test_battery_type_from_str() {
        assert_eq!("Lithium-7DD".parse::<BatteryType>().unwrap(), BatteryType::Lithium7DD);
        assert_eq!("alkaline_38c".parse::<BatteryType>().unwrap(), BatteryType::Alkaline38C);
        assert!("custom".parse::<BatteryType>().is_err());
    }
}
