//! Error types for transactional writes.

use thiserror::Error;

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// W001: An item could not be turned into a store request
    W001InvalidItem,
    /// W002: The store cancelled the transaction
    W002TransactionCanceled,
    /// W003: The request failed before the store decided
    W003WriteFailure,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W001InvalidItem => "W001",
            Self::W002TransactionCanceled => "W002",
            Self::W003WriteFailure => "W003",
        }
    }
}

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("[{code}] Invalid item: {message}")]
    InvalidItem { code: &'static str, message: String },

    /// Nothing in the batch was committed. `reasons` lists the items the
    /// store objected to, as `item <index>: <code> <message>`.
    #[error("[{code}] Transaction cancelled: {}", reasons.join("; "))]
    TransactionCanceled {
        code: &'static str,
        reasons: Vec<String>,
    },

    #[error("[{code}] Write operation failed: {message}")]
    WriteFailure { code: &'static str, message: String },
}

impl WriterError {
    pub fn invalid_item(message: String) -> Self {
        Self::InvalidItem {
            code: ErrorCode::W001InvalidItem.as_str(),
            message,
        }
    }

    pub fn transaction_canceled(reasons: Vec<String>) -> Self {
        Self::TransactionCanceled {
            code: ErrorCode::W002TransactionCanceled.as_str(),
            reasons,
        }
    }

    pub fn write_failure(message: String) -> Self {
        Self::WriteFailure {
            code: ErrorCode::W003WriteFailure.as_str(),
            message,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidItem { code, .. }
            | Self::TransactionCanceled { code, .. }
            | Self::WriteFailure { code, .. } => code,
        }
    }
}

pub type Result<T> = std::result::Result<T, WriterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_codes() {
        let err = WriterError::transaction_canceled(vec![
            "item 2: ConditionalCheckFailed".to_string(),
            "item 4: ValidationError duplicate".to_string(),
        ]);
        assert_eq!(err.code(), "W002");
        assert_eq!(
            err.to_string(),
            "[W002] Transaction cancelled: item 2: ConditionalCheckFailed; item 4: ValidationError duplicate"
        );

        let err = WriterError::invalid_item("missing table".to_string());
        assert!(err.to_string().starts_with("[W001]"));
    }
}
