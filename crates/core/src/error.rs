#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Invalid id: {0:?}")]
    InvalidId(String),
}
