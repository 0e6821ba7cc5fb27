pub mod dogs;
pub mod fallback;
