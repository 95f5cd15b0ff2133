//! Frequency band constants
//!
//! One record per transducer frequency family, ordered from the highest band to the
//! lowest. A system frequency belongs to a band when it lies strictly between that
//! band's nominal frequency and the next higher band's nominal frequency. Exact
//! boundary values belong to no band.

use serde::{Deserialize, Serialize};

/// Transducer frequency family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyBand {
    Khz1200,
    Khz600,
    Khz300,
    Khz150,
    Khz75,
    Khz38,
}

impl FrequencyBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Khz1200 => "1200 kHz",
            Self::Khz600 => "600 kHz",
            Self::Khz300 => "300 kHz",
            Self::Khz150 => "150 kHz",
            Self::Khz75 => "75 kHz",
            Self::Khz38 => "38 kHz",
        }
    }
}

impl std::fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference figures for one frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandConstants {
    pub band: FrequencyBand,
    /// Nominal frequency (Hz), the lower edge used for band resolution
    pub frequency_hz: f64,
    /// Bin size (m) the reference range was measured with
    pub ref_bin_size_m: f64,
    /// Range gained per dB of relative figure of merit (m/dB)
    pub ref_bin_count: f64,
    /// Broadband water-profile range at reference conditions (m)
    pub ref_range_m: f64,
    /// Transmit capacitor bank (uF)
    pub capacitance_uf: f64,
    pub xmt_voltage: f64,
    pub xmt_watts: f64,
    pub beam_angle_deg: f64,
    pub beam_diameter_m: f64,
    /// Absorption (dB/m) the reference range assumes
    pub absorption_scale: f64,
    /// Receiver samples per carrier cycle at the reference cycles-per-element
    pub sampling_ratio: f64,
    pub cycles_per_element: f64,
}

const SAMPLING_RATIO: f64 = 2.0 / 12.0;
const CYCLES_PER_ELEMENT: f64 = 12.0;
const BEAM_ANGLE_DEG: f64 = 20.0;

/// Band table, highest frequency first.
pub static BANDS: [BandConstants; 6] = [
    BandConstants {
        band: FrequencyBand::Khz1200,
        frequency_hz: 1_100_000.0,
        ref_bin_size_m: 1.0,
        ref_bin_count: 0.4,
        ref_range_m: 25.0,
        capacitance_uf: 8_000.0,
        xmt_voltage: 24.0,
        xmt_watts: 12.0,
        beam_angle_deg: BEAM_ANGLE_DEG,
        beam_diameter_m: 0.0254,
        absorption_scale: 0.480,
        sampling_ratio: SAMPLING_RATIO,
        cycles_per_element: CYCLES_PER_ELEMENT,
    },
    BandConstants {
        band: FrequencyBand::Khz600,
        frequency_hz: 550_000.0,
        ref_bin_size_m: 2.0,
        ref_bin_count: 1.0,
        ref_range_m: 50.0,
        capacitance_uf: 8_000.0,
        xmt_voltage: 24.0,
        xmt_watts: 25.0,
        beam_angle_deg: BEAM_ANGLE_DEG,
        beam_diameter_m: 0.0508,
        absorption_scale: 0.160,
        sampling_ratio: SAMPLING_RATIO,
        cycles_per_element: CYCLES_PER_ELEMENT,
    },
    BandConstants {
        band: FrequencyBand::Khz300,
        frequency_hz: 275_000.0,
        ref_bin_size_m: 4.0,
        ref_bin_count: 2.0,
        ref_range_m: 125.0,
        capacitance_uf: 16_000.0,
        xmt_voltage: 24.0,
        xmt_watts: 50.0,
        beam_angle_deg: BEAM_ANGLE_DEG,
        beam_diameter_m: 0.0762,
        absorption_scale: 0.075,
        sampling_ratio: SAMPLING_RATIO,
        cycles_per_element: CYCLES_PER_ELEMENT,
    },
    BandConstants {
        band: FrequencyBand::Khz150,
        frequency_hz: 137_500.0,
        ref_bin_size_m: 8.0,
        ref_bin_count: 4.0,
        ref_range_m: 250.0,
        capacitance_uf: 32_000.0,
        xmt_voltage: 24.0,
        xmt_watts: 100.0,
        beam_angle_deg: BEAM_ANGLE_DEG,
        beam_diameter_m: 0.1524,
        absorption_scale: 0.046,
        sampling_ratio: SAMPLING_RATIO,
        cycles_per_element: CYCLES_PER_ELEMENT,
    },
    BandConstants {
        band: FrequencyBand::Khz75,
        frequency_hz: 68_750.0,
        ref_bin_size_m: 16.0,
        ref_bin_count: 8.0,
        ref_range_m: 500.0,
        capacitance_uf: 64_000.0,
        xmt_voltage: 36.0,
        xmt_watts: 200.0,
        beam_angle_deg: BEAM_ANGLE_DEG,
        beam_diameter_m: 0.3048,
        absorption_scale: 0.026,
        sampling_ratio: SAMPLING_RATIO,
        cycles_per_element: CYCLES_PER_ELEMENT,
    },
    BandConstants {
        band: FrequencyBand::Khz38,
        frequency_hz: 34_375.0,
        ref_bin_size_m: 32.0,
        ref_bin_count: 16.0,
        ref_range_m: 1000.0,
        capacitance_uf: 96_000.0,
        xmt_voltage: 48.0,
        xmt_watts: 400.0,
        beam_angle_deg: BEAM_ANGLE_DEG,
        beam_diameter_m: 0.6096,
        absorption_scale: 0.011,
        sampling_ratio: SAMPLING_RATIO,
        cycles_per_element: CYCLES_PER_ELEMENT,
    },
];

/// Receivers above this frequency run twice the channel count.
const DUAL_RECEIVER_ABOVE_HZ: f64 = 550_000.0;

/// Select the band a system frequency falls in.
///
/// Open interval on both sides; the top band has no upper bound. Returns `None` below
/// the lowest band and on exact band boundaries.
pub fn resolve_band(system_frequency_hz: f64) -> Option<&'static BandConstants> {
    BANDS.iter().enumerate().find_map(|(i, band)| {
        let above_lower = system_frequency_hz > band.frequency_hz;
        let below_upper = i == 0 || system_frequency_hz < BANDS[i - 1].frequency_hz;
        (above_lower && below_upper).then_some(band)
    })
}

impl BandConstants {
    /// Whether this band is the one `system_frequency_hz` resolves to.
    pub fn selected_by(&self, system_frequency_hz: f64) -> bool {
        resolve_band(system_frequency_hz).is_some_and(|b| b.band == self.band)
    }

    /// Capacitor leakage current (mA).
    pub fn leakage_ma(&self) -> f64 {
        3.0 * (2e-6 * self.capacitance_uf * self.xmt_voltage).sqrt()
    }

    /// Capacitor leakage drawn from the battery (W).
    pub fn leakage_watts(&self) -> f64 {
        self.leakage_ma() / 1000.0 * self.xmt_voltage
    }
}

/// Receive power multiplier for the receiver channel count at this frequency.
pub fn receiver_power_multiplier(system_frequency_hz: f64) -> f64 {
    if system_frequency_hz > DUAL_RECEIVER_ABOVE_HZ {
        2.0
    } else {
        1.0
    }
}

/// Acoustic wavelength (m), 0 when the frequency is 0.
pub fn wavelength_m(speed_of_sound: f64, system_frequency_hz: f64) -> f64 {
    crate::ratio_or_zero(speed_of_sound, system_frequency_hz)
}

/// Directivity index `20*log10(pi * d / lambda)` (dB); 0 for degenerate geometry.
pub fn directivity_index(beam_diameter_m: f64, wavelength_m: f64) -> f64 {
    let ka = crate::ratio_or_zero(std::f64::consts::PI * beam_diameter_m, wavelength_m);
    2.0 * crate::db10(ka)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_descending() {
        for pair in BANDS.windows(2) {
            assert!(pair[0].frequency_hz > pair[1].frequency_hz);
        }
    }

    #[test]
    fn test_resolve_interior_frequencies() {
        assert_eq!(resolve_band(1_245_125.0).map(|b| b.band), Some(FrequencyBand::Khz1200));
        assert_eq!(resolve_band(622_562.5).map(|b| b.band), Some(FrequencyBand::Khz600));
        assert_eq!(resolve_band(311_281.25).map(|b| b.band), Some(FrequencyBand::Khz300));
        assert_eq!(resolve_band(155_640.625).map(|b| b.band), Some(FrequencyBand::Khz150));
        assert_eq!(resolve_band(77_820.3125).map(|b| b.band), Some(FrequencyBand::Khz75));
        assert_eq!(resolve_band(38_910.156_25).map(|b| b.band), Some(FrequencyBand::Khz38));
    }

    #[test]
    fn test_top_band_has_no_upper_bound() {
        assert_eq!(resolve_band(20_000_000.0).map(|b| b.band), Some(FrequencyBand::Khz1200));
    }

    #[test]
    fn test_below_lowest_band_resolves_nothing() {
        assert!(resolve_band(34_000.0).is_none());
        assert!(resolve_band(0.0).is_none());
    }

    #[test]
    fn test_exact_boundaries_resolve_nothing() {
        for band in BANDS.iter() {
            assert!(
                resolve_band(band.frequency_hz).is_none(),
                "{} boundary should fall in no band",
                band.band
            );
        }
    }

    #[test]
    fn test_selected_by_matches_exactly_one_band() {
        let freq = 311_281.25;
        let selected: Vec<_> = BANDS.iter().filter(|b| b.selected_by(freq)).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].band, FrequencyBand::Khz300);
    }

    #[test]
    fn test_receiver_multiplier() {
        assert_eq!(receiver_power_multiplier(1_245_125.0), 2.0);
        assert_eq!(receiver_power_multiplier(622_562.5), 2.0);
        assert_eq!(receiver_power_multiplier(311_281.25), 1.0);
    }

    #[test]
    fn test_leakage() {
        let band = &BANDS[2];
        // 3 * sqrt(2e-6 * 16000 * 24)
        assert!((band.leakage_ma() - 3.0 * 0.768f64.sqrt()).abs() < 1e-12);
        assert!(band.leakage_watts() > 0.0);
    }

    #[test]
    fn test_directivity_index() {
        let lambda = wavelength_m(1490.0, 311_281.25);
        let di = directivity_index(0.0762, lambda);
        // pi * 0.0762 / 0.00479 ~ 50 -> ~34 dB
        assert!(di > 33.0 && di < 35.0, "DI: {}", di);
        assert_eq!(directivity_index(0.0762, 0.0), 0.0);
    }
}
