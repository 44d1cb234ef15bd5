use thiserror::Error;

pub(crate) use super::sled::error::SledStorageError;
use strum_macros::AsRefStr;

#[derive(Error, Debug, AsRefStr)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("Failed to parse id from string")]
    ParseIdFromString(#[from] uuid::Error),

    #[error("Storage is closed")]
    Closed,

    #[error("Internal storage error")]
    Internal(#[source] SledStorageError),

    #[error("Blocking task join error")]
    JoinError(#[from] tokio::task::JoinError),
}
