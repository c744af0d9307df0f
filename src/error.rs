use thiserror::Error;

/// A field-level rule a record broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    pub field: &'static str,
    pub reason: String,
}

impl Invalid {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the given id exists in the collection.
    #[error("record not found: {collection}:{id}")]
    NotFound { collection: &'static str, id: String },

    /// The record produced by a create or update breaks a field rule.
    #[error("invalid {collection} record: {field} {reason}")]
    ValidationFailed {
        collection: &'static str,
        field: &'static str,
        reason: String,
    },

    /// Two seed records share an id.
    #[error("duplicate {collection} id in seed: {id}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("record store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl StoreError {
    pub(crate) fn not_found(collection: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid(collection: &'static str, invalid: Invalid) -> Self {
        StoreError::ValidationFailed {
            collection,
            field: invalid.field,
            reason: invalid.reason,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
