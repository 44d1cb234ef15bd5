use opentelemetry::KeyValue;

use super::APP_NAME;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};

static BLOCKING_TASKS: Lazy<DashMap<&'static str, AtomicI64>> = Lazy::new(DashMap::new);

/// Counts a running `spawn_blocking` task under `name` until dropped.
pub struct BlockingTaskGuard {
    name: &'static str,
}

impl BlockingTaskGuard {
    pub fn new(name: &'static str) -> Self {
        BLOCKING_TASKS
            .entry(name)
            .or_insert(AtomicI64::new(0))
            .fetch_add(1, Ordering::Relaxed);

        Self { name }
    }

    #[cfg(test)]
    pub fn running(name: &'static str) -> i64 {
        BLOCKING_TASKS
            .get(name)
            .map(|count| count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

impl Drop for BlockingTaskGuard {
    fn drop(&mut self) {
        if let Some(count) = BLOCKING_TASKS.get(self.name) {
            count.fetch_sub(1, Ordering::Relaxed);
        }
    }
}

pub(crate) fn init_blocking_tasks_metric() {
    opentelemetry::global::meter(APP_NAME)
        .i64_observable_gauge("blocking_tasks_count")
        .with_callback(move |observer| {
            for entry in BLOCKING_TASKS.iter() {
                observer.observe(
                    entry.load(Ordering::Relaxed),
                    &[KeyValue::new("operation", *entry.key())],
                );
            }
        })
        .build();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_counts_while_alive() {
        let name = "test_guard_counts_while_alive";
        assert_eq!(BlockingTaskGuard::running(name), 0);

        let first = BlockingTaskGuard::new(name);
        let second = BlockingTaskGuard::new(name);
        assert_eq!(BlockingTaskGuard::running(name), 2);

        drop(first);
        assert_eq!(BlockingTaskGuard::running(name), 1);

        drop(second);
        assert_eq!(BlockingTaskGuard::running(name), 0);
    }
}
