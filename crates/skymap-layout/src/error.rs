//! Layout error types

use skymap_core::TopologyError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error("Unknown layout direction {0:?}, expected TB or LR")]
    UnknownDirection(String),
    #[error("Invalid layout setting {field}: {value}")]
    InvalidConfig { field: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot parse layout config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] LayoutError),
}
