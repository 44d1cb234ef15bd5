#![allow(dead_code, unused_imports)]

mod client;
mod server;

use axum::Router;
pub use client::TestAppClient;
use todo_service::{build_app, Service, Settings, ShutdownTrigger, TestStorageBuilder};

pub use server::{spawn_test_app, TestAppHandle};

#[derive(Debug, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

pub struct TestApp {
    pub router: Router,
    pub service: Service,
    pub shutdown: ShutdownTrigger,
}

pub async fn create_test_app(builder: TestStorageBuilder) -> TestApp {
    let todo_storage = builder.build_todo().await;
    let connection_storage = builder.build_connection().await;

    let settings = Settings::from_file("test").unwrap();

    let service = Service::new(todo_storage, connection_storage);
    let shutdown = ShutdownTrigger::new();

    TestApp {
        router: build_app(service.clone(), settings, shutdown.clone()),
        service,
        shutdown,
    }
}

pub async fn spawn_default_app() -> (TestAppHandle, TestAppClient) {
    let app = create_test_app(TestStorageBuilder::new()).await;
    let handle = spawn_test_app(app.router).await;
    let client = TestAppClient::new(handle.address.clone());
    (handle, client)
}
