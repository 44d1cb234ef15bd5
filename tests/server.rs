mod common;
use common::{create_test_app, spawn_default_app, spawn_test_app, ErrorBody, TestAppClient};
use reqwest::StatusCode;
use serde_json::{json, Value};
use todo_service::{DatabaseState, TestStorageBuilder};

#[tokio::test]
async fn root_reports_running() {
    let (_handle, client) = spawn_default_app().await;

    let res = client.root().await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await.unwrap();
    assert_eq!(body["message"], "Todo Backend API Server is running!");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn health_reports_connected() {
    let (_handle, client) = spawn_default_app().await;

    let res = client.health().await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"]
        .as_str()
        .unwrap()
        .parse::<chrono::DateTime<chrono::Utc>>()
        .is_ok());
}

#[tokio::test]
async fn cors_headers_on_every_response() {
    let (_handle, client) = spawn_default_app().await;

    for res in [
        client.health().await,
        client.get_all_todos().await,
        client.get_todo("missing").await,
    ] {
        let headers = res.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            headers["access-control-allow-methods"],
            "GET, POST, PUT, DELETE, OPTIONS, PATCH"
        );
        assert_eq!(
            headers["access-control-expose-headers"],
            "Content-Range, X-Content-Range"
        );
        assert_eq!(headers["referrer-policy"], "no-referrer-when-downgrade");
    }
}

#[tokio::test]
async fn preflight_is_no_content_for_any_path() {
    let (_handle, client) = spawn_default_app().await;

    for path in ["api/todos", "api/todos/some-id", "no/such/route"] {
        let res = client.options(path).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT, "path {path}");
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert_eq!(res.headers()["access-control-max-age"], "86400");
        assert_eq!(
            res.headers()["access-control-allow-headers"],
            "Content-Type, Authorization, X-Requested-With, Accept, Origin"
        );
    }
}

#[tokio::test]
async fn restart_closes_storage_and_fires_shutdown() {
    let app = create_test_app(TestStorageBuilder::new().with_todos(1)).await;
    let shutdown = app.shutdown.clone();
    let service = app.service.clone();
    let handle = spawn_test_app(app.router).await;
    let client = TestAppClient::new(handle.address);

    assert!(!shutdown.is_fired());

    let res = client.restart().await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"message": "Server restarting"})
    );

    assert!(shutdown.is_fired());
    assert_eq!(service.database_state(), DatabaseState::Disconnected);

    let body = client.health().await.json::<Value>().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "disconnected");

    let res = client.get_all_todos().await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<ErrorBody>().await.unwrap();
    assert_eq!(body.error, "internal_storage");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (handle, _client) = spawn_default_app().await;

    let res = reqwest::get(handle.address.join("api-docs/openapi.json").unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let doc = res.json::<Value>().await.unwrap();
    assert!(doc["paths"]["/api/todos"].is_object());
    assert!(doc["paths"]["/api/todos/{id}"].is_object());
    assert!(doc["paths"]["/health"].is_object());
}
