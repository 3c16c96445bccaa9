use thiserror::Error;

/// Failure to build an interpolating aerodynamic table.
///
/// Never reaches the simulation loop: [`crate::physics::AeroDatabase::load`]
/// turns it into the constant-coefficient fallback.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("failed to read aerodynamic table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse aerodynamic table: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("need at least 2 distinct Mach breakpoints, found {found}")]
    TooFewPoints { found: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    Invalid(String),
}
