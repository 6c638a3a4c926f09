//! Error types for magpend.

use thiserror::Error;

use crate::simulation::states::NVec2;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Singular force: bob at {position:?} sits on magnet {magnet} with zero height")]
    Singularity { magnet: usize, position: NVec2 },

    #[error("Non-finite {quantity} at step {step}")]
    NonFinite { step: usize, quantity: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SimError>;
