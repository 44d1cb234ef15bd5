pub(super) mod error;
mod connection_impl;
mod internal;
mod todos_impl;

#[cfg(any(test, feature = "integration_tests"))]
pub mod test_util;

use std::sync::atomic::{AtomicBool, Ordering};

use super::{StorageError, Todo, TodoId, TodoStorage, TodoVersion, UpdateTodo};
use crate::{config::SledConfig, utils::measure_metrics::measure_and_record_storage};
use bincode::config::{self};
use error::{SledStartupError, SledStorageError};
use tracing::{info_span, instrument};

pub(crate) static SLED_TODO_TREE: &str = "todos";
const BINCODE_CONFIG: config::Configuration = config::standard()
    .with_variable_int_encoding()
    .with_little_endian();

use bincode::{Decode, Encode};

type BincodeConfig = bincode::config::Configuration;

trait ToBytesWithConfig: Encode {
    type Error;

    fn to_bytes(&self, config: &BincodeConfig) -> Result<Vec<u8>, Self::Error>;
}

trait FromBytesWithConfig: Decode<()> {
    type Error;

    fn from_bytes(bytes: &[u8], config: &BincodeConfig) -> Result<Self, Self::Error>;
}

/// Todo store on top of an embedded sled database.
///
/// Owns the database handle; `close` flushes it and flips the store into a
/// state where every later call fails with [`SledStorageError::Closed`].
pub(crate) struct SledStorage {
    db: sled::Db,
    todo_tree: sled::Tree,
    bincode_config: config::Configuration,
    connected: AtomicBool,
}

impl SledStorage {
    #[instrument(name = "Storage::new")]
    pub fn new(sled_config: &SledConfig) -> Result<Self, SledStartupError> {
        measure_and_record_storage("Storage::new", || {
            let db = info_span!("sled::open_db").in_scope(|| {
                sled::Config::default()
                    .path(&sled_config.path)
                    .flush_every_ms(sled_config.flush_every_ms)
                    .open()
                    .map_err(|e| {
                        tracing::error!(error = %e, path = ?sled_config.path, "failed to open db");
                        SledStartupError::OpenSledStorageError(e)
                    })
            })?;

            Self::from_db(db)
        })
    }

    fn from_db(db: sled::Db) -> Result<Self, SledStartupError> {
        let todo_tree = info_span!("sled::open_todo_tree").in_scope(|| {
            db.open_tree(SLED_TODO_TREE).map_err(|e| {
                tracing::error!(error = %e, tree_name = SLED_TODO_TREE, "failed to open todo tree");
                SledStartupError::OpenSledStorageError(e)
            })
        })?;

        Ok(Self {
            db,
            todo_tree,
            bincode_config: BINCODE_CONFIG,
            connected: AtomicBool::new(true),
        })
    }

    fn ensure_connected(&self) -> Result<(), SledStorageError> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(SledStorageError::Closed)
        }
    }
}

impl FromBytesWithConfig for TodoVersion {
    type Error = SledStorageError;

    #[instrument(name = "TodoVersion::from_bytes", skip_all)]
    fn from_bytes(bytes: &[u8], config: &BincodeConfig) -> Result<Self, Self::Error> {
        let (todo, _len) = bincode::decode_from_slice::<TodoVersion, _>(bytes, *config)?;
        Ok(todo)
    }
}

impl ToBytesWithConfig for TodoVersion {
    type Error = SledStorageError;

    #[instrument(name = "TodoVersion::to_bytes", skip_all)]
    fn to_bytes(&self, config: &BincodeConfig) -> Result<Vec<u8>, Self::Error> {
        let bytes = bincode::encode_to_vec(self, *config)?;
        Ok(bytes)
    }
}

fn decode_todo(bytes: &[u8], config: &BincodeConfig) -> Result<Todo, SledStorageError> {
    let version: TodoVersion = internal::span_wrappers::deserialize_in_span(config, bytes)?;
    Ok(Todo::try_from(version)?)
}

fn encode_todo(todo: Todo, config: &BincodeConfig) -> Result<Vec<u8>, SledStorageError> {
    internal::span_wrappers::serialize_in_span(config, &TodoVersion::from(todo))
}
