use thiserror::Error;

/// Reasons a chart cannot be built or exported.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlotError {
    #[error("no data to plot")]
    NoData,
    #[error("grid shape mismatch: {0}")]
    GridShape(String),
    #[error("need at least two {axis} coordinates to size cells, got {got}")]
    TooFewCoordinates { axis: &'static str, got: usize },
    #[error("max intensity must be finite and positive, got {0}")]
    InvalidIntensity(f64),
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("log scale requires a positive domain, got [{min}, {max}]")]
    NonPositiveLogDomain { min: f64, max: f64 },
    #[error("svg export failed: {0}")]
    Export(String),
}

pub type PlotResult<T> = std::result::Result<T, PlotError>;
