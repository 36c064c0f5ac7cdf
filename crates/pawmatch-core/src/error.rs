use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    /// A command-line override failed the check its env var would get.
    #[error("invalid {flag}: {reason}")]
    InvalidOverride { flag: &'static str, reason: String },
}

/// Errors raised while building catalog model values from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid age range {min}..={max}: bounds must satisfy 0 <= min <= max <= {limit}")]
    InvalidAgeRange { min: u32, max: u32, limit: u32 },

    #[error("page size must be between 1 and {limit}, got {size}")]
    InvalidPageSize { size: u32, limit: u32 },
}
