use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    /// A required field is absent or out of range. Fatal for one game file only.
    #[error("Malformed input at {field}: {reason}")]
    MalformedInput { field: String, reason: String },

    #[error("Invalid value '{value}' for {dimension}. Accepted: {accepted}")]
    InvalidFilterValue {
        dimension: String,
        value: String,
        accepted: String,
    },

    #[error("Invalid filter combination: {0}")]
    InvalidFilterCombination(String),

    #[error("{0} is an invalid character name")]
    UnknownCharacter(String),

    /// The evaluator was handed a dimension the index does not carry.
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IndexError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        IndexError::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_value(
        dimension: impl Into<String>,
        value: impl Into<String>,
        accepted: impl Into<String>,
    ) -> Self {
        IndexError::InvalidFilterValue {
            dimension: dimension.into(),
            value: value.into(),
            accepted: accepted.into(),
        }
    }

    /// Whether a batch caller may skip the offending game file and keep going.
    ///
    /// Filter errors are not recoverable per file: the same filter would fail
    /// for every game in the batch.
    pub fn is_recoverable(&self) -> bool {
        match self {
            IndexError::MalformedInput { .. } => true,
            IndexError::Io(_) => true,
            IndexError::InvalidFilterValue { .. } => false,
            IndexError::InvalidFilterCombination(_) => false,
            IndexError::UnknownCharacter(_) => false,
            IndexError::InternalConsistency(_) => false,
        }
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        // serde reports missing keys and wrong types as data errors; both mean
        // the document does not satisfy the game-log contract.
        IndexError::MalformedInput {
            field: format!("line {} column {}", err.line(), err.column()),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
