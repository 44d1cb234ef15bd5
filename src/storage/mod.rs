mod error;
mod id;
mod sled;
mod todo;

#[cfg(any(test, feature = "integration_tests"))]
pub use self::sled::test_util;
pub(crate) use self::sled::{error::SledStartupError, SledStorage};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
pub(crate) use error::StorageError;
#[cfg(test)]
pub(crate) use error::SledStorageError;
pub use id::TodoId;
pub use todo::Todo;
pub(crate) use todo::{now, TodoVersion, UpdateTodo};

#[async_trait]
pub trait TodoStorage: Send + Sync {
    async fn get(&self, id: TodoId) -> Result<Todo, StorageError>;
    async fn put(&self, id: TodoId, item: Todo) -> Result<(), StorageError>;

    /// Applies `patch` atomically and returns the stored result.
    async fn update(
        &self,
        id: TodoId,
        patch: UpdateTodo,
        now: DateTime<Utc>,
    ) -> Result<Todo, StorageError>;

    /// Removes the record and returns what was stored.
    async fn delete(&self, id: TodoId) -> Result<Todo, StorageError>;

    /// All records, most recently created first.
    async fn get_all(&self) -> Result<Vec<Todo>, StorageError>;
}

#[async_trait]
pub trait ConnectionStorage: Send + Sync {
    fn is_connected(&self) -> bool;
    async fn flush(&self) -> Result<(), StorageError>;

    /// Flushes pending writes and rejects every later operation.
    async fn close(&self) -> Result<(), StorageError>;
}
