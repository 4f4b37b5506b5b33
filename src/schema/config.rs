//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_cell_size() -> u32 {
    8
}

fn default_step_interval_ms() -> u64 {
    80
}

fn default_frame_interval_ms() -> u64 {
    16
}

/// Tuning knobs for the engine thread.
///
/// Dimensions are not part of the config; they arrive with the Initialize
/// command because they depend on the surface the controller hands over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Edge length of one cell's pixel block on the drawing surface.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Minimum time between two executed generation steps during continuous
    /// play.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
    /// How often the scheduler wakes to check the step throttle; stands in for
    /// the host's frame-presentation callback rate.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            step_interval_ms: default_step_interval_ms(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl EngineConfig {
    /// Step throttle interval as a [`Duration`].
    #[inline]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    /// Frame wake-up interval as a [`Duration`].
    #[inline]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::InvalidCellSize);
        }
        if self.step_interval_ms == 0 {
            return Err(ConfigError::InvalidStepInterval);
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidFrameInterval);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cell size must be non-zero")]
    InvalidCellSize,
    #[error("Step interval must be non-zero")]
    InvalidStepInterval,
    #[error("Frame interval must be non-zero")]
    InvalidFrameInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.step_interval(), Duration::from_millis(80));
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = EngineConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCellSize)
        ));

        let config = EngineConfig {
            step_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStepInterval)
        ));

        let config = EngineConfig {
            frame_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFrameInterval)
        ));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.cell_size, 8);
        assert_eq!(config.step_interval_ms, 80);
        assert_eq!(config.frame_interval_ms, 16);
    }
}
