//! Domain logic for the kennel service.
//!
//! Holds the dog field schema and request-body validation. Nothing in this
//! crate performs I/O.

pub mod dog;
pub mod error;
pub mod types;
