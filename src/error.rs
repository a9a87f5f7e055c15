use thiserror::Error;

/// Top-level error type for the roadline crate.
#[derive(Debug, Error)]
pub enum RoadlineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while validating or sampling a curve path.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("a path needs at least 2 handles, found {count}")]
    TooFewHandles { count: usize },

    #[error("divisions must be positive, got {0}")]
    InvalidDivisions(i64),

    #[error("handle index {index} is out of range for a path with {len} handles")]
    HandleIndexOutOfRange { index: usize, len: usize },
}

/// Errors raised by [`crate::tracking::ArcTracker`].
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("travel distance must be finite and non-negative, got {0}")]
    InvalidDistance(f64),

    #[error("a tracker needs at least 2 samples, found {0}")]
    TooFewSamples(usize),
}

/// Errors related to ribbon mesh generation.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("invalid ribbon parameters: {0}")]
    InvalidParameters(String),

    #[error("got {points} points but {tangents} tangents")]
    MismatchedSamples { points: usize, tangents: usize },
}

/// Errors related to reading or writing path assets.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("malformed path asset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`RoadlineError`].
pub type Result<T> = std::result::Result<T, RoadlineError>;
