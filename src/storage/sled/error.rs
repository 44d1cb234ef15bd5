use std::str::Utf8Error;

use strum_macros::AsRefStr;
use thiserror::Error;

use crate::storage::{todo::TimestampOutOfRange, StorageError};

#[derive(Error, Debug, AsRefStr)]
pub enum SledStartupError {
    #[error("Failed to open sled storage")]
    OpenSledStorageError(#[source] sled::Error),
}

#[derive(Error, Debug, AsRefStr)]
pub enum SledStorageError {
    #[error("Data for key not found")]
    NotFound,

    #[error("Storage has been closed")]
    Closed,

    #[error("Failed to encode data")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Failed to decode data")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("Failed to restore record timestamp")]
    Timestamp(#[from] TimestampOutOfRange),

    #[error("Failed to convert to utf8")]
    Conversion(#[from] Utf8Error),

    #[error("Sled error")]
    Sled(#[from] sled::Error),

    #[error("Key without prefix: {0}")]
    InvalidKey(String),
}

impl From<SledStorageError> for sled::transaction::ConflictableTransactionError<SledStorageError> {
    fn from(value: SledStorageError) -> Self {
        sled::transaction::ConflictableTransactionError::Abort(value)
    }
}

impl From<sled::transaction::TransactionError<SledStorageError>> for SledStorageError {
    fn from(value: sled::transaction::TransactionError<SledStorageError>) -> Self {
        match value {
            sled::transaction::TransactionError::Abort(e) => e,
            sled::transaction::TransactionError::Storage(e) => Self::Sled(e),
        }
    }
}

impl From<SledStorageError> for StorageError {
    fn from(value: SledStorageError) -> Self {
        match value {
            SledStorageError::NotFound => {
                tracing::warn!(error = ?value, error_type = %value.as_ref(), "Record not found by id");
                Self::NotFound
            }
            SledStorageError::Closed => {
                tracing::error!(error = ?value, error_type = %value.as_ref(), "Storage used after close");
                Self::Closed
            }
            _ => {
                tracing::error!(error = ?value, error_type = %value.as_ref(), "Storage error");
                Self::Internal(value)
            }
        }
    }
}
