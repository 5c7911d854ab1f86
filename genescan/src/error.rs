use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenescanError {
    #[error("Invalid parameter '{name}': must be {constraint}, got {value}")]
    InvalidParameter {
        name: &'static str,
        constraint: &'static str,
        value: String,
    },
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
    #[error("Peak from sample '{found}' cannot be added to sample '{expected}'")]
    SampleMismatch { expected: String, found: String },
}

impl GenescanError {
    pub fn invalid_parameter(
        name: &'static str,
        constraint: &'static str,
        value: impl ToString,
    ) -> Self {
        GenescanError::InvalidParameter {
            name,
            constraint,
            value: value.to_string(),
        }
    }

    pub fn malformed_row(line: usize, reason: impl Into<String>) -> Self {
        GenescanError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenescanError>;
