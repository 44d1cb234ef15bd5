use std::sync::atomic::Ordering;

use super::error::SledStorageError;
use super::SledStorage;
use crate::{
    storage::{
        sled::{internal::span_wrappers::flush_tree_in_span, SLED_TODO_TREE},
        ConnectionStorage, StorageError,
    },
    trace_err,
    utils::measure_metrics::measure_and_record_storage,
};
use async_trait::async_trait;
use tracing::{info, instrument, warn};

#[async_trait]
impl ConnectionStorage for SledStorage {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    #[instrument(name = "SledStorage::flush", skip_all)]
    async fn flush(&self) -> Result<(), StorageError> {
        measure_and_record_storage("SledStorage::flush", || {
            self.ensure_connected()?;

            trace_err!(
                flush_tree_in_span(&self.todo_tree, SLED_TODO_TREE),
                "failed to flush todo_tree"
            )?;

            let bytes = trace_err!(self.db.flush(), "failed to flush sled db")?;
            info!(bytes = %bytes, "flushed sled db");

            Ok::<(), SledStorageError>(())
        })
        .map_err(Into::into)
    }

    #[instrument(name = "SledStorage::close", skip_all)]
    async fn close(&self) -> Result<(), StorageError> {
        if !self.is_connected() {
            warn!("storage already closed");
            return Ok(());
        }

        self.flush().await?;
        self.connected.store(false, Ordering::Release);
        info!("sled storage closed");

        Ok(())
    }
}
