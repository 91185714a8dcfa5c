use thiserror::Error;

#[derive(Error, Debug)]
pub enum MealDbError {
    /// The snapshot document is structurally unusable. Load-time only and
    /// fatal: no store is constructed from a partially readable document.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MealDbError {
    pub fn not_found(collection: &str, id: impl ToString) -> Self {
        MealDbError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        MealDbError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MealDbError>;
