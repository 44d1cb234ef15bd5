mod common;
use common::{create_test_app, spawn_default_app, spawn_test_app, ErrorBody, TestAppClient};
use reqwest::StatusCode;
use serde_json::json;
use todo_service::{DeletedTodoResponse, TestStorageBuilder, Todo, TodoId};

#[tokio::test]
async fn create_and_get_todo() {
    let (_handle, client) = spawn_default_app().await;

    let res = client
        .create_todo(json!({"title": "Buy milk", "description": "2L"}))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let created = res.json::<Todo>().await.unwrap();
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, "2L");
    assert!(!created.completed);
    assert_eq!(created.created_at, created.updated_at);

    let res = client.get_todo(&created.id.to_string()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Todo>().await.unwrap(), created);
}

#[tokio::test]
async fn create_todo_wire_format() {
    let (_handle, client) = spawn_default_app().await;

    let res = client.create_todo(json!({"title": "x"})).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<serde_json::Value>().await.unwrap();
    let object = body.as_object().unwrap();
    for field in ["id", "title", "description", "completed", "createdAt", "updatedAt"] {
        assert!(object.contains_key(field), "missing {field}");
    }
    assert_eq!(body["description"], "");
    assert_eq!(body["completed"], false);
}

#[tokio::test]
async fn create_todo_without_title_is_rejected() {
    let (_handle, client) = spawn_default_app().await;

    let res = client.create_todo(json!({"description": "no title"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<ErrorBody>().await.unwrap().error, "missing_title");

    let res = client.create_todo(json!({"title": ""})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<ErrorBody>().await.unwrap().error, "empty_title");

    let todos = client.get_all_todos().await.json::<Vec<Todo>>().await.unwrap();
    assert!(todos.is_empty());
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_not_found() {
    let (_handle, client) = spawn_default_app().await;

    let res = client.get_todo(&TodoId::new().to_string()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<ErrorBody>().await.unwrap().error, "not_found");

    let res = client.get_todo("definitely-not-an-id").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .update_todo("definitely-not-an-id", json!({"completed": true}))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete_todo("definitely-not-an-id").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_all_is_newest_first() {
    let builder = TestStorageBuilder::new().with_todos(5);
    let seeded = builder.todos();

    let app = create_test_app(builder).await;
    let handle = spawn_test_app(app.router).await;
    let client = TestAppClient::new(handle.address);

    let res = client.get_all_todos().await;
    assert_eq!(res.status(), StatusCode::OK);

    let todos = res.json::<Vec<Todo>>().await.unwrap();
    let expected: Vec<Todo> = seeded.into_iter().rev().collect();
    assert_eq!(todos, expected);
}

#[tokio::test]
async fn get_all_includes_new_todos_first() {
    let builder = TestStorageBuilder::new().with_todos(2);
    let app = create_test_app(builder).await;
    let handle = spawn_test_app(app.router).await;
    let client = TestAppClient::new(handle.address);

    let created = client
        .create_todo(json!({"title": "latest"}))
        .await
        .json::<Todo>()
        .await
        .unwrap();

    let todos = client.get_all_todos().await.json::<Vec<Todo>>().await.unwrap();
    assert_eq!(todos.len(), 3);
    assert_eq!(todos[0], created);
    assert!(todos
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[tokio::test]
async fn update_applies_only_present_fields() {
    let (_handle, client) = spawn_default_app().await;

    let created = client
        .create_todo(json!({"title": "Buy milk", "description": "2L"}))
        .await
        .json::<Todo>()
        .await
        .unwrap();
    let id = created.id.to_string();

    let res = client.update_todo(&id, json!({"completed": true})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let updated = res.json::<Todo>().await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Buy milk");
    assert_eq!(updated.description, "2L");
    assert!(updated.completed);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let res = client
        .update_todo(&id, json!({"title": "Buy oat milk", "description": ""}))
        .await;
    let updated = res.json::<Todo>().await.unwrap();
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.description, "");
    assert!(updated.completed);

    let fetched = client.get_todo(&id).await.json::<Todo>().await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_with_empty_title_changes_nothing() {
    let (_handle, client) = spawn_default_app().await;

    let created = client
        .create_todo(json!({"title": "keep me"}))
        .await
        .json::<Todo>()
        .await
        .unwrap();
    let id = created.id.to_string();

    let res = client
        .update_todo(&id, json!({"title": "", "completed": true}))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<ErrorBody>().await.unwrap().error, "empty_title");

    let fetched = client.get_todo(&id).await.json::<Todo>().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_with_empty_patch_refreshes_timestamp() {
    let (_handle, client) = spawn_default_app().await;

    let created = client
        .create_todo(json!({"title": "t"}))
        .await
        .json::<Todo>()
        .await
        .unwrap();

    let res = client.update_todo(&created.id.to_string(), json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let updated = res.json::<Todo>().await.unwrap();
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.completed, created.completed);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let (_handle, client) = spawn_default_app().await;

    let res = client
        .update_todo(&TodoId::new().to_string(), json!({"title": "ghost"}))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_removed_todo() {
    let (_handle, client) = spawn_default_app().await;

    let created = client
        .create_todo(json!({"title": "short lived"}))
        .await
        .json::<Todo>()
        .await
        .unwrap();
    let id = created.id.to_string();

    let res = client.delete_todo(&id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<DeletedTodoResponse>().await.unwrap();
    assert_eq!(body.message, "Todo deleted");
    assert_eq!(body.todo, created);

    assert_eq!(client.get_todo(&id).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(client.delete_todo(&id).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_todo_flow() {
    let (_handle, client) = spawn_default_app().await;

    let created = client
        .create_todo(json!({"title": "Buy milk"}))
        .await
        .json::<Todo>()
        .await
        .unwrap();
    let id = created.id.to_string();

    let todos = client.get_all_todos().await.json::<Vec<Todo>>().await.unwrap();
    assert_eq!(todos, vec![created.clone()]);

    let updated = client
        .update_todo(&id, json!({"completed": true}))
        .await
        .json::<Todo>()
        .await
        .unwrap();
    assert!(updated.completed);

    let deleted = client
        .delete_todo(&id)
        .await
        .json::<DeletedTodoResponse>()
        .await
        .unwrap();
    assert_eq!(deleted.todo, updated);

    let todos = client.get_all_todos().await.json::<Vec<Todo>>().await.unwrap();
    assert!(todos.is_empty());
}
