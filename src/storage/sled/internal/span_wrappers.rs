use sled::transaction::{TransactionalTree, UnabortableTransactionError};
use tracing::{info, instrument, warn};

use crate::storage::sled::{
    error::SledStorageError,
    internal::{Key, KeyPrefix},
    BincodeConfig, FromBytesWithConfig, ToBytesWithConfig,
};

#[instrument(name = "sled::get_value_by_key", skip_all)]
pub(crate) fn get_value_with_span(
    key: &Key,
    tree: &sled::Tree,
) -> Result<sled::IVec, SledStorageError> {
    info!(key = %key, "get value with key");
    tree.get(key.as_bytes())?.ok_or(SledStorageError::NotFound)
}

#[instrument(name = "sled::insert_value_with_key", skip_all)]
pub(crate) fn insert_value_with_span(
    key: &Key,
    value: &[u8],
    tree: &sled::Tree,
) -> Result<(), SledStorageError> {
    info!(key = %key, "insert value with key");
    let old_value = tree.insert(key.as_bytes(), value)?;
    if old_value.is_some() {
        warn!(key = %key, "insert replaced old value");
    }

    Ok(())
}

/// Removes the key and hands back the value it held.
#[instrument(name = "sled::remove_value_with_key", skip_all)]
pub(crate) fn remove_value_with_span(
    key: &Key,
    tree: &sled::Tree,
) -> Result<sled::IVec, SledStorageError> {
    info!(key = %key, "remove value with key");
    tree.remove(key.as_bytes())?.ok_or_else(|| {
        warn!(key = %key, "Tried to remove non-existing key");
        SledStorageError::NotFound
    })
}

#[instrument(name = "sled::scan_prefix", skip_all)]
pub(crate) fn scan_prefix_with_span(
    prefix: &KeyPrefix,
    tree: &sled::Tree,
) -> Result<Vec<(Key, sled::IVec)>, SledStorageError> {
    let mut items = Vec::new();
    for item in tree.scan_prefix(prefix.as_bytes()) {
        let (key_bytes, value_bytes) = item?;
        items.push((Key::from_bytes(&key_bytes)?, value_bytes));
    }
    info!(prefix = %prefix, count = items.len(), "scanned values with key prefix");

    Ok(items)
}

#[instrument(name = "sled::get_value_by_key", skip_all)]
pub(crate) fn get_value_in_transaction_with_span(
    key: &Key,
    tree: &TransactionalTree,
) -> Result<Option<sled::IVec>, UnabortableTransactionError> {
    info!(key = %key, "get value with key");
    tree.get(key.as_bytes())
}

#[instrument(name = "sled::insert_value_with_key", skip_all)]
pub(crate) fn insert_value_in_transaction_with_span(
    key: &Key,
    value: &[u8],
    tree: &TransactionalTree,
) -> Result<(), UnabortableTransactionError> {
    info!(key = %key, "insert value with key");
    tree.insert(key.as_bytes(), value)?;
    Ok(())
}

#[instrument(name = "convert_bytes_to_value", skip_all)]
pub(crate) fn deserialize_in_span<T: FromBytesWithConfig<Error = SledStorageError>>(
    config: &BincodeConfig,
    bytes: &[u8],
) -> Result<T, SledStorageError> {
    T::from_bytes(bytes, config)
}

#[instrument(name = "convert_value_to_bytes", skip_all)]
pub(crate) fn serialize_in_span<T: ToBytesWithConfig<Error = SledStorageError>>(
    config: &BincodeConfig,
    value: &T,
) -> Result<Vec<u8>, SledStorageError> {
    value.to_bytes(config)
}

#[instrument(name = "flush_tree", skip_all)]
pub(crate) fn flush_tree_in_span(
    tree: &sled::Tree,
    tree_name: &'static str,
) -> Result<(), SledStorageError> {
    let bytes = tree.flush()?;
    info!(bytes = %bytes, tree_name = %tree_name, "flushed sled tree");

    Ok(())
}
