//! The persistence seam used by the HTTP handlers.

use async_trait::async_trait;
use kennel_core::dog::{DogPatch, NewDog};
use kennel_core::types::DbId;

use crate::models::dog::Dog;
use crate::repositories::DogRepo;
use crate::DbPool;

/// CRUD access to dog records.
///
/// Every method is a single atomic call against the backing store; any I/O
/// problem surfaces as a `sqlx::Error`.
#[async_trait]
pub trait DogStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Dog>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Dog>, sqlx::Error>;

    async fn create(&self, input: &NewDog) -> Result<Dog, sqlx::Error>;

    /// Apply `patch`; `Ok(None)` means no dog has this ID.
    async fn update(&self, id: DbId, patch: &DogPatch) -> Result<Option<Dog>, sqlx::Error>;

    /// Remove a dog and hand it back; `Ok(None)` means no dog has this ID.
    async fn delete(&self, id: DbId) -> Result<Option<Dog>, sqlx::Error>;

    /// Confirm the store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// [`DogStore`] backed by a Postgres pool.
#[derive(Clone)]
pub struct PgDogStore {
    pool: DbPool,
}

impl PgDogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DogStore for PgDogStore {
    async fn list(&self) -> Result<Vec<Dog>, sqlx::Error> {
        DogRepo::list(&self.pool).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        DogRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, input: &NewDog) -> Result<Dog, sqlx::Error> {
        DogRepo::create(&self.pool, input).await
    }

    async fn update(&self, id: DbId, patch: &DogPatch) -> Result<Option<Dog>, sqlx::Error> {
        if patch.is_empty() {
            return DogRepo::find_by_id(&self.pool, id).await;
        }
        DogRepo::update(&self.pool, id, patch).await
    }

    async fn delete(&self, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        DogRepo::delete(&self.pool, id).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
