use serde::{Deserialize, Serialize};

/// Settings of growth animation encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    /// Display duration of every frame in milliseconds.
    #[serde(default = "AnimationSettings::default_frame_delay_ms")]
    pub frame_delay_ms: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frame_delay_ms: AnimationSettings::default_frame_delay_ms(),
        }
    }
}

impl AnimationSettings {
    fn default_frame_delay_ms() -> u32 {
        200
    }
}
