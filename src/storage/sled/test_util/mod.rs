#![allow(dead_code)]
use std::sync::Arc;

use crate::storage::{now, ConnectionStorage, Todo, TodoId, TodoStorage};
use chrono::Duration;
use sled::Config;

use super::SledStorage;

pub struct TestStorageBuilder {
    todos: Vec<Todo>,
    storage: Arc<SledStorage>,
}

impl TestStorageBuilder {
    pub fn new() -> Self {
        let db = Config::new().temporary(true).open().unwrap();
        Self {
            todos: Vec::new(),
            storage: Arc::new(SledStorage::from_db(db).unwrap()),
        }
    }

    /// Seeds `count` todos created one second apart, oldest first.
    pub fn with_todos(mut self, count: usize) -> Self {
        let base = now() - Duration::seconds(count as i64);
        self.todos = (0..count)
            .map(|i| {
                let created = base + Duration::seconds(i as i64);
                Todo::new(TodoId::new(), &format!("todo {}", i), Some("seeded"), created)
            })
            .collect();
        self
    }

    pub async fn build_todo(&self) -> Arc<dyn TodoStorage> {
        for todo in &self.todos {
            self.storage.put(todo.id, todo.clone()).await.unwrap();
        }

        self.storage.clone()
    }

    pub async fn build_connection(&self) -> Arc<dyn ConnectionStorage> {
        self.storage.clone()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.todos.clone()
    }
}

impl Default for TestStorageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
