use crate::trace_err;
use crate::utils::blocking_task_guard::BlockingTaskGuard;
use crate::utils::measure_metrics::measure_and_record_storage;

use super::error::SledStorageError;
use super::internal::{
    span_wrappers::{
        get_value_in_transaction_with_span, get_value_with_span,
        insert_value_in_transaction_with_span, insert_value_with_span, remove_value_with_span,
        scan_prefix_with_span,
    },
    Key, KeyPrefix, PrefixKind,
};
use super::{decode_todo, encode_todo, BincodeConfig, SledStorage};
use super::{StorageError, Todo, TodoId, TodoStorage, UpdateTodo};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sled::transaction::{ConflictableTransactionError, ConflictableTransactionResult};
use sled::Tree;
use tracing::{info, info_span, instrument, Span};

#[async_trait]
impl TodoStorage for SledStorage {
    #[instrument(name = "SledStorage::get_todo", skip_all)]
    async fn get(&self, todo_id: TodoId) -> Result<Todo, StorageError> {
        info!(todo_id = %todo_id, "get todo");

        measure_and_record_storage("SledStorage::get_todo", || {
            self.ensure_connected()?;
            let key = Key::todo(&todo_id);

            let value = trace_err!(
                get_value_with_span(&key, &self.todo_tree),
                "failed to read todo from storage"
            )?;

            trace_err!(
                decode_todo(&value, &self.bincode_config),
                "failed to bin decode todo"
            )
        })
        .map_err(Into::into)
    }

    #[instrument(name = "SledStorage::put_todo", skip_all)]
    async fn put(&self, todo_id: TodoId, item: Todo) -> Result<(), StorageError> {
        info!(todo_id = %todo_id, "put todo");

        measure_and_record_storage("SledStorage::put_todo", || {
            self.ensure_connected()?;
            let key = Key::todo(&todo_id);

            let encoded = trace_err!(
                encode_todo(item, &self.bincode_config),
                "failed to bin encode todo"
            )?;

            trace_err!(
                insert_value_with_span(&key, &encoded, &self.todo_tree),
                "failed to write todo into storage"
            )
        })
        .map_err(Into::into)
    }

    #[instrument(name = "SledStorage::update_todo", skip_all)]
    async fn update(
        &self,
        todo_id: TodoId,
        patch: UpdateTodo,
        now: DateTime<Utc>,
    ) -> Result<Todo, StorageError> {
        self.ensure_connected()?;

        // cloning tree should be cheap: struct Tree{inner: Arc<TreeInner>}
        let (todo_tree, bincode_config) = info_span!("Cloning trees and config")
            .in_scope(|| (self.todo_tree.clone(), self.bincode_config));

        let span = Span::current();
        tokio::task::spawn_blocking(move || {
            let _guard = BlockingTaskGuard::new("update_todo");
            span.in_scope(|| update_todo(todo_id, &patch, now, &todo_tree, &bincode_config))
        })
        .await?
    }

    #[instrument(name = "SledStorage::delete_todo", skip_all)]
    async fn delete(&self, todo_id: TodoId) -> Result<Todo, StorageError> {
        info!(todo_id = %todo_id, "delete todo");

        measure_and_record_storage("SledStorage::delete_todo", || {
            self.ensure_connected()?;
            let key = Key::todo(&todo_id);

            let removed = trace_err!(
                remove_value_with_span(&key, &self.todo_tree),
                "failed to remove todo from storage"
            )?;

            trace_err!(
                decode_todo(&removed, &self.bincode_config),
                "failed to bin decode removed todo"
            )
        })
        .map_err(Into::into)
    }

    #[instrument(name = "SledStorage::get_all_todos", skip_all)]
    async fn get_all(&self) -> Result<Vec<Todo>, StorageError> {
        let result: Result<_, SledStorageError> =
            measure_and_record_storage("SledStorage::get_all_todos", || {
                self.ensure_connected()?;

                let items = trace_err!(
                    scan_prefix_with_span(
                        &KeyPrefix::from_kind(PrefixKind::Todo),
                        &self.todo_tree
                    ),
                    "failed to scan todo-s"
                )?;

                let mut todos = items
                    .iter()
                    .map(|(_, bytes)| decode_todo(bytes, &self.bincode_config))
                    .collect::<Result<Vec<_>, _>>()?;

                todos.sort_by(|a, b| {
                    b.created_at
                        .cmp(&a.created_at)
                        .then_with(|| b.id.cmp(&a.id))
                });

                info!(count = todos.len(), "get all todos");
                Ok(todos)
            });

        Ok(result?)
    }
}

#[instrument(name = "update_todo", skip_all)]
fn update_todo(
    todo_id: TodoId,
    patch: &UpdateTodo,
    now: DateTime<Utc>,
    todo_tree: &Tree,
    bincode_config: &BincodeConfig,
) -> Result<Todo, StorageError> {
    info!(todo_id = %todo_id, "update todo");

    let todo = measure_and_record_storage("SledStorage::update_todo_in_transaction", || {
        todo_tree.transaction(|tx| -> ConflictableTransactionResult<Todo, SledStorageError> {
            let key = Key::todo(&todo_id);
            let value = get_value_in_transaction_with_span(&key, tx)?;

            let Some(value) = value else {
                tracing::error!("failed to find todo in the storage");
                return Err(ConflictableTransactionError::Abort(SledStorageError::NotFound));
            };

            let mut todo = trace_err!(
                decode_todo(&value, bincode_config),
                "failed to bin decode todo"
            )?;

            todo.apply(patch, now);

            let encoded = trace_err!(
                encode_todo(todo.clone(), bincode_config),
                "failed to bin encode todo"
            )?;

            insert_value_in_transaction_with_span(&key, &encoded, tx)?;

            Ok(todo)
        })
    })
    .map_err(SledStorageError::from)?;

    Ok(todo)
}
