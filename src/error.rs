use thiserror::Error;

#[derive(Error, Debug)]
pub enum OceanError {
    #[error("Invalid wave train: {0}")]
    InvalidWave(String),

    #[error("Invalid storm factor: {0} (must be finite and non-negative)")]
    InvalidStormFactor(f32),

    #[error("Invalid damping constant: {0} (must be finite and at least 1.0)")]
    InvalidDamping(f32),

    #[error("Invalid smoothing time step: {0} (must be finite and positive)")]
    InvalidTimeStep(f32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OceanError>;
