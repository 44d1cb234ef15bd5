#![allow(dead_code)]
use reqwest::{Method, Url};
use serde_json::Value;

pub struct TestAppClient {
    url: Url,
    client: reqwest::Client,
}

impl TestAppClient {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    fn todo_url(&self, todo_id: &str) -> Url {
        self.url
            .join("api/todos/")
            .unwrap()
            .join(todo_id)
            .unwrap()
    }

    pub async fn create_todo(&self, body: Value) -> reqwest::Response {
        self.client
            .post(self.url.join("api/todos").unwrap())
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_todo(&self, todo_id: &str) -> reqwest::Response {
        self.client
            .get(self.todo_url(todo_id))
            .send()
            .await
            .unwrap()
    }

    pub async fn get_all_todos(&self) -> reqwest::Response {
        self.client
            .get(self.url.join("api/todos").unwrap())
            .send()
            .await
            .unwrap()
    }

    pub async fn update_todo(&self, todo_id: &str, body: Value) -> reqwest::Response {
        self.client
            .put(self.todo_url(todo_id))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete_todo(&self, todo_id: &str) -> reqwest::Response {
        self.client
            .delete(self.todo_url(todo_id))
            .send()
            .await
            .unwrap()
    }

    pub async fn root(&self) -> reqwest::Response {
        self.client.get(self.url.clone()).send().await.unwrap()
    }

    pub async fn health(&self) -> reqwest::Response {
        self.client
            .get(self.url.join("health").unwrap())
            .send()
            .await
            .unwrap()
    }

    pub async fn restart(&self) -> reqwest::Response {
        self.client
            .post(self.url.join("restart").unwrap())
            .send()
            .await
            .unwrap()
    }

    pub async fn options(&self, path: &str) -> reqwest::Response {
        self.client
            .request(Method::OPTIONS, self.url.join(path).unwrap())
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "PUT")
            .send()
            .await
            .unwrap()
    }
}
