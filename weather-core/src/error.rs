use thiserror::Error;

/// Failure while talking to the weather provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider answered, but its payload carried an error object
    /// (unknown location, bad key, quota exceeded, ...).
    #[error("Weather API error: {0}")]
    Rejected(String),

    /// The provider could not be reached, answered with a non-success
    /// status, or returned something that is not JSON.
    #[error("Failed to fetch weather data: {0}")]
    Transport(String),
}

/// Terminal outcome of a submission or lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("{0}")]
    NotFound(String),
}
