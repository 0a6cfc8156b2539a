//! Error types for strokebench

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

/// Main error type for the harness
///
/// Every variant is fatal. A run under an unmet configuration would
/// produce timings that compare different work, so nothing here is retried.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Harness has no backends")]
    NoBackends,
}

/// A backend or the harness cannot be set up as requested
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Backend {backend} cannot create a {width}x{height} surface")]
    SurfaceCreationFailed {
        backend: &'static str,
        width: u32,
        height: u32,
    },

    #[error("Invalid dash pattern: {0}")]
    InvalidDash(String),

    #[error("Backend {backend} rejected stroke: {detail}")]
    InvalidStroke {
        backend: &'static str,
        detail: String,
    },

    #[error("Backend {backend} cannot honor antialias={enabled}")]
    AntialiasUnsupported { backend: &'static str, enabled: bool },

    #[error("Backend {backend} smoothing disagrees with antialias={expected}")]
    SmoothingMismatch {
        backend: &'static str,
        expected: bool,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
