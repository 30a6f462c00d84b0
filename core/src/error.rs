use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Unknown region '{name}'")]
    UnknownRegion { name: String },

    #[error("Unknown preset '{name}'")]
    UnknownPreset { name: String },

    #[error("Unknown category '{name}'")]
    UnknownCategory { name: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ForecastResult<T> = Result<T, ForecastError>;
