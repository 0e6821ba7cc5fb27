pub mod dogs;
pub mod health;
