#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use kennel_core::dog::{DogPatch, NewDog};
use kennel_core::types::DbId;
use kennel_db::models::dog::Dog;
use kennel_db::DogStore;
use tokio::sync::Mutex;
use tower::ServiceExt;

use kennel_api::config::ServerConfig;
use kennel_api::router::build_app_router;
use kennel_api::state::AppState;

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// In-memory [`DogStore`] that counts every call it receives.
#[derive(Default)]
pub struct MemoryDogStore {
    dogs: Mutex<BTreeMap<DbId, Dog>>,
    last_id: AtomicI64,
    calls: AtomicUsize,
}

impl MemoryDogStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.dogs.lock().await.len()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DogStore for MemoryDogStore {
    async fn list(&self) -> Result<Vec<Dog>, sqlx::Error> {
        self.record_call();
        Ok(self.dogs.lock().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        self.record_call();
        Ok(self.dogs.lock().await.get(&id).cloned())
    }

    async fn create(&self, input: &NewDog) -> Result<Dog, sqlx::Error> {
        self.record_call();
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let dog = Dog {
            id,
            name: input.name.clone(),
            age: input.age,
            description: input.description.clone(),
            breed: input.breed.clone(),
        };
        self.dogs.lock().await.insert(id, dog.clone());
        Ok(dog)
    }

    async fn update(&self, id: DbId, patch: &DogPatch) -> Result<Option<Dog>, sqlx::Error> {
        self.record_call();
        let mut dogs = self.dogs.lock().await;
        let Some(dog) = dogs.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            dog.name = name.clone();
        }
        if let Some(age) = patch.age {
            dog.age = age;
        }
        if let Some(description) = &patch.description {
            dog.description = description.clone();
        }
        if let Some(breed) = &patch.breed {
            dog.breed = breed.clone();
        }
        Ok(Some(dog.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        self.record_call();
        Ok(self.dogs.lock().await.remove(&id))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

/// A store whose every call fails, as if the database were unreachable.
pub struct FailingDogStore;

#[async_trait]
impl DogStore for FailingDogStore {
    async fn list(&self) -> Result<Vec<Dog>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn create(&self, _input: &NewDog) -> Result<Dog, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(&self, _id: DbId, _patch: &DogPatch) -> Result<Option<Dog>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn delete(&self, _id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }
}

/// A store that panics on listing, to exercise panic recovery.
pub struct PanickingDogStore;

#[async_trait]
impl DogStore for PanickingDogStore {
    async fn list(&self) -> Result<Vec<Dog>, sqlx::Error> {
        panic!("store exploded");
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        Ok(None)
    }

    async fn create(&self, _input: &NewDog) -> Result<Dog, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn update(&self, _id: DbId, _patch: &DogPatch) -> Result<Option<Dog>, sqlx::Error> {
        Ok(None)
    }

    async fn delete(&self, _id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        Ok(None)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router around the given store.
pub fn build_test_app(store: Arc<dyn DogStore>) -> Router {
    build_app_router(AppState { store }, &test_config())
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, json: serde_json::Value) -> Response {
    send_raw(app, Method::POST, uri, json.to_string()).await
}

pub async fn patch_json(app: &Router, uri: &str, json: serde_json::Value) -> Response {
    send_raw(app, Method::PATCH, uri, json.to_string()).await
}

/// Send a body verbatim with a JSON content type.
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a dog through the API and return its ID.
pub async fn create_dog(app: &Router, json: serde_json::Value) -> i64 {
    let response = post_json(app, "/dogs", json).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
