//! Layout direction and geometry settings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LayoutError};

/// Which way ranks flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ranks stack downwards; nodes in a rank spread along x.
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    /// Ranks stack rightwards; nodes in a rank spread along y.
    #[serde(rename = "LR")]
    LeftRight,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        self == Direction::LeftRight
    }
}

impl FromStr for Direction {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Direction::TopBottom),
            "LR" => Ok(Direction::LeftRight),
            _ => Err(LayoutError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopBottom => f.write_str("TB"),
            Direction::LeftRight => f.write_str("LR"),
        }
    }
}

/// Fixed geometry of the layered drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between consecutive ranks.
    pub rank_separation: f64,
    /// Gap between neighbours within a rank.
    pub node_separation: f64,
    /// Minimum columns of the unconnected-node pool.
    pub pool_min_columns: usize,
    /// Barycenter sweeps during crossing reduction.
    pub ordering_sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            direction: Direction::TopBottom,
            node_width: 172.0,
            node_height: 36.0,
            rank_separation: 80.0,
            node_separation: 40.0,
            pool_min_columns: 4,
            ordering_sweeps: 8,
        }
    }
}

impl LayoutConfig {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Sizes must be positive and separations non-negative, all finite.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let checks = [
            ("node_width", self.node_width, false),
            ("node_height", self.node_height, false),
            ("rank_separation", self.rank_separation, true),
            ("node_separation", self.node_separation, true),
        ];
        for (field, value, zero_ok) in checks {
            let valid = value.is_finite() && (value > 0.0 || (zero_ok && value == 0.0));
            if !valid {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("TB".parse::<Direction>().unwrap(), Direction::TopBottom);
        assert_eq!("lr".parse::<Direction>().unwrap(), Direction::LeftRight);
        assert_eq!(
            "diagonal".parse::<Direction>().unwrap_err(),
            LayoutError::UnknownDirection("diagonal".to_string())
        );
        assert_eq!(Direction::LeftRight.to_string(), "LR");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            LayoutConfig::from_toml_str("direction = \"LR\"\nnode_width = 200.0\n").unwrap();
        assert_eq!(config.direction, Direction::LeftRight);
        assert_eq!(config.node_width, 200.0);
        assert_eq!(config.node_height, LayoutConfig::default().node_height);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = LayoutConfig::from_toml_str("node_height = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(LayoutError::InvalidConfig { field: "node_height", .. })
        ));

        let zero_gap = LayoutConfig {
            node_separation: 0.0,
            ..LayoutConfig::default()
        };
        assert!(zero_gap.validate().is_ok());

        let nan = LayoutConfig {
            rank_separation: f64::NAN,
            ..LayoutConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_unknown_direction_in_toml() {
        assert!(matches!(
            LayoutConfig::from_toml_str("direction = \"BT\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
