//! ADCP Prediction Fuzz Harness
//!
//! Property-based testing strategies for deployment scenarios: band-interior system
//! frequencies, realistic profile geometry and water properties, and whole
//! [`PredictionInput`](adcp_prediction::PredictionInput) values built from them.
//!
//! # Usage
//!
//! ```rust
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_fuzz_test(input in prediction_input()) {
//!         prop_assert!(calculate_power(&input) >= 0.0);
//!     }
//! }
//! ```

pub mod config;
pub mod generators;

pub mod prelude {
    pub use crate::config::FuzzConfig;
    pub use crate::generators::*;
    pub use adcp_prediction::{
        absorption, calculate_power, calculate_power_burst, data_storage, ensemble_size,
        max_velocity, predicted_range, resolve_band, standard_deviation, DatasetFlags,
        PredictionInput, PredictionReport, TransmitPulseType, BANDS,
    };
    pub use proptest::prelude::*;
}

// Re-export proptest for convenience
pub use proptest;
