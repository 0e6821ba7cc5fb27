//! Repository for the `dogs` table.

use kennel_core::dog::{DogPatch, NewDog};
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::dog::Dog;

/// Column list for `dogs` queries.
const COLUMNS: &str = "id, name, age, description, breed";

/// Provides CRUD operations for dogs.
pub struct DogRepo;

impl DogRepo {
    /// List every dog, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs ORDER BY id");
        sqlx::query_as::<_, Dog>(&query).fetch_all(pool).await
    }

    /// Find a dog by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs WHERE id = $1");
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new dog, returning the row with its assigned ID.
    pub async fn create(pool: &PgPool, input: &NewDog) -> Result<Dog, sqlx::Error> {
        let query = format!(
            "INSERT INTO dogs (name, age, description, breed) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.description)
            .bind(&input.breed)
            .fetch_one(pool)
            .await
    }

    /// Partially update a dog. Returns `None` if no row has this ID.
    ///
    /// Uses `COALESCE` so only provided fields are changed. `breed` is
    /// nullable, so it carries an explicit "was provided" flag instead.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DogPatch,
    ) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!(
            "UPDATE dogs SET \
                 name = COALESCE($2, name), \
                 age = COALESCE($3, age), \
                 description = COALESCE($4, description), \
                 breed = CASE WHEN $5 THEN $6 ELSE breed END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.description)
            .bind(input.breed.is_some())
            .bind(input.breed.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a dog, returning the removed row. Returns `None` if no row has
    /// this ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!("DELETE FROM dogs WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
