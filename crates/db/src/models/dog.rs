//! Dog entity model.

use kennel_core::types::DbId;
use serde::{Serialize, Serializer};
use sqlx::FromRow;

/// A row from the `dogs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Dog {
    pub id: DbId,
    pub name: String,
    #[serde(serialize_with = "serialize_age")]
    pub age: f64,
    pub description: String,
    pub breed: Option<String>,
}

/// Whole ages go out as JSON integers so `4` round-trips as `4`, not `4.0`.
fn serialize_age<S: Serializer>(age: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if age.fract() == 0.0 && age.abs() < 9.0e15 {
        serializer.serialize_i64(*age as i64)
    } else {
        serializer.serialize_f64(*age)
    }
}
