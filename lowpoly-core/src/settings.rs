use crate::Scalar;
use serde::{Deserialize, Serialize};

/// Settings of importance map generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceSettings {
    /// Red, green and blue weights of luminance.
    #[serde(default = "ImportanceSettings::default_luma_weights")]
    pub luma_weights: [Scalar; 3],
    /// Standard deviation of the blur that keeps local detail.
    #[serde(default = "ImportanceSettings::default_detail_sigma")]
    pub detail_sigma: Scalar,
    /// Standard deviation of the blur that estimates large scale gradients.
    #[serde(default = "ImportanceSettings::default_background_sigma")]
    pub background_sigma: Scalar,
    /// Factor applied to areas darker than their surroundings.
    #[serde(default = "ImportanceSettings::default_negative_damping")]
    pub negative_damping: Scalar,
    /// Blur kernel radius in standard deviations.
    #[serde(default = "ImportanceSettings::default_truncate")]
    pub truncate: Scalar,
}

impl Default for ImportanceSettings {
    fn default() -> Self {
        Self {
            luma_weights: Self::default_luma_weights(),
            detail_sigma: Self::default_detail_sigma(),
            background_sigma: Self::default_background_sigma(),
            negative_damping: Self::default_negative_damping(),
            truncate: Self::default_truncate(),
        }
    }
}

impl ImportanceSettings {
    fn default_luma_weights() -> [Scalar; 3] {
        [0.2126, 0.7152, 0.0722]
    }

    fn default_detail_sigma() -> Scalar {
        2.0
    }

    fn default_background_sigma() -> Scalar {
        30.0
    }

    fn default_negative_damping() -> Scalar {
        0.1
    }

    fn default_truncate() -> Scalar {
        4.0
    }
}

/// Settings of biased points sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerSettings {
    /// Number of candidate points drawn.
    #[serde(default = "SamplerSettings::default_trials")]
    pub trials: usize,
    /// Random generator seed.
    #[serde(default)]
    pub seed: u64,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            trials: Self::default_trials(),
            seed: 0,
        }
    }
}

impl SamplerSettings {
    fn default_trials() -> usize {
        1_000_000
    }
}

/// Settings of low-poly generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateLowPolySettings {
    /// Importance map settings.
    #[serde(default)]
    pub importance: ImportanceSettings,
    /// Points sampling settings.
    #[serde(default)]
    pub sampler: SamplerSettings,
    /// Detail levels of growth sequence frames.
    #[serde(default = "GenerateLowPolySettings::default_growth_levels")]
    pub growth_levels: Vec<usize>,
}

impl Default for GenerateLowPolySettings {
    fn default() -> Self {
        Self {
            importance: ImportanceSettings::default(),
            sampler: SamplerSettings::default(),
            growth_levels: Self::default_growth_levels(),
        }
    }
}

impl GenerateLowPolySettings {
    /// Default detail levels of growth sequence.
    pub fn default_growth_levels() -> Vec<usize> {
        vec![1, 3, 6, 9, 12, 15, 20, 27, 33, 42, 55]
    }
}
