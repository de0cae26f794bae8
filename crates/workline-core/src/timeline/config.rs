//! Timeline layout configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Layout configuration for the timeline canvas.
///
/// All lengths are in logical pixels. Zoom scaling beyond `pixels_per_day`
/// is the rendering layer's business and is not baked in here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayoutConfig {
    /// Pixels per day (zoom level)
    pub pixels_per_day: f64,
    /// Lane height
    pub lane_height: f64,
    /// Spacing between lanes
    pub lane_spacing: f64,
    /// Node width
    pub node_width: f64,
    /// Node height
    pub node_height: f64,
    /// Top margin (space for the milestone strip)
    pub top_margin: f64,
    /// Left margin
    pub left_margin: f64,
    /// Right margin
    pub right_margin: f64,
    /// Bottom margin
    pub bottom_margin: f64,
    /// Maximum number of lanes before packing accepts overlap
    pub max_lanes: usize,
    /// Bottleneck detection threshold in days
    pub bottleneck_threshold_days: i64,
}

impl Default for TimelineLayoutConfig {
    fn default() -> Self {
        Self {
            pixels_per_day: 8.0,
            lane_height: 120.0,
            lane_spacing: 20.0,
            node_width: 180.0,
            node_height: 100.0,
            top_margin: 100.0,
            left_margin: 50.0,
            right_margin: 100.0,
            bottom_margin: 50.0,
            max_lanes: 10,
            bottleneck_threshold_days: 14,
        }
    }
}

impl TimelineLayoutConfig {
    /// Check the configuration for values the layout math cannot work with.
    ///
    /// The engine itself stays total regardless; callers validate up front
    /// to reject nonsense before running it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixels_per_day <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "pixels_per_day".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.node_width <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "node_width".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.lane_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "lane_height".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.max_lanes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_lanes".to_string(),
                message: "at least one lane is required".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = TimelineLayoutConfig::default();
        assert_eq!(config.pixels_per_day, 8.0);
        assert_eq!(config.lane_height, 120.0);
        assert_eq!(config.lane_spacing, 20.0);
        assert_eq!(config.node_width, 180.0);
        assert_eq!(config.node_height, 100.0);
        assert_eq!(config.top_margin, 100.0);
        assert_eq!(config.left_margin, 50.0);
        assert_eq!(config.right_margin, 100.0);
        assert_eq!(config.bottom_margin, 50.0);
        assert_eq!(config.max_lanes, 10);
        assert_eq!(config.bottleneck_threshold_days, 14);
    }

    #[test]
    fn default_config_validates() {
        assert!(TimelineLayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_zoom_and_zero_lanes() {
        let mut config = TimelineLayoutConfig::default();
        config.pixels_per_day = 0.0;
        assert!(config.validate().is_err());

        let mut config = TimelineLayoutConfig::default();
        config.max_lanes = 0;
        assert!(config.validate().is_err());
    }
}
