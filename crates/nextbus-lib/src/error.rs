use thiserror::Error;

/// Convenient result alias for the nextbus library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a named parameter does not exist in the parameter store.
    #[error("parameter {name} not found when calling the GetParameter operation")]
    ParameterNotFound { name: String },

    /// Raised when the parameter store fails for any reason other than a
    /// missing name.
    #[error("parameter store lookup for {name} failed: {message}")]
    ParameterStore { name: String, message: String },

    /// Raised when calling a declared WMATA capability that has no
    /// implementation.
    #[error("WMATA operation {operation} is not implemented")]
    NotImplemented { operation: &'static str },

    /// Raised when an API key cannot be carried in an HTTP header.
    #[error("API key contains bytes that are not valid in an HTTP header")]
    InvalidApiKey,

    /// Raised when an upstream JSON body does not match the expected shape.
    #[error("malformed {context} response: {message}")]
    UnexpectedResponse {
        context: &'static str,
        message: String,
    },

    /// Wrapper for HTTP client errors, including non-2xx statuses.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
