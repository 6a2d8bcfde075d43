//! Configuration for grid resampling.

use crate::resample::ResampleMethod;
use serde::{Deserialize, Serialize};

/// Configuration for a resampling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResamplerConfig {
    /// Resampling strategy.
    pub method: ResampleMethod,

    /// Drop out-of-range values when rebuilding the distribution.
    pub crop_distribution: bool,

    /// Recompute min/max and distribution after resampling.
    pub update_statistics: bool,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self {
            method: ResampleMethod::Nearest,
            crop_distribution: false,
            update_statistics: true,
        }
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

impl ResamplerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    ///
    /// Missing keys keep their defaults; unparseable values are logged and
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("RESAMPLE_METHOD") {
            match ResampleMethod::parse(&val) {
                Some(method) => config.method = method,
                None => tracing::warn!(value = %val, "Unknown RESAMPLE_METHOD, using default"),
            }
        }

        if let Some(val) = lookup("RESAMPLE_CROP_DISTRIBUTION") {
            match parse_bool(&val) {
                Some(crop) => config.crop_distribution = crop,
                None => tracing::warn!(value = %val, "Invalid RESAMPLE_CROP_DISTRIBUTION"),
            }
        }

        if let Some(val) = lookup("RESAMPLE_UPDATE_STATISTICS") {
            match parse_bool(&val) {
                Some(update) => config.update_statistics = update,
                None => tracing::warn!(value = %val, "Invalid RESAMPLE_UPDATE_STATISTICS"),
            }
        }

        config
    }
}
