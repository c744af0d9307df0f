//! Records - the generic CRUD store shared by artworks, clients and exhibitions.
//!
//! A record type describes three shapes: the stored record itself, the
//! `Draft` a caller supplies to create one (everything except the fields the
//! store assigns), and the sparse `Patch` used to update one.
//!
//! ## Example
//!
//! ```ignore
//! use atelier::{Artwork, ArtworkPatch, RecordStore};
//!
//! let store = RecordStore::<Artwork>::new(fixtures.artworks);
//! let created = store.create(draft)?;
//! store.update(created.id(), ArtworkPatch { price: Some(price), ..Default::default() })?;
//! let available = store.available()?;
//! ```

mod changes;
mod id;
mod store;

use std::fmt;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Invalid;

/// Types that live in a named collection and carry a unique id.
pub trait Keyed {
    /// The collection name for this record type (e.g., "artworks", "clients").
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record.
    fn id(&self) -> &str;
}

/// A record type a `RecordStore` can own.
pub trait Record: Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create input: the record minus the fields the store assigns.
    type Draft: Clone + Send + fmt::Debug;

    /// Sparse update. A `None` field is left untouched.
    type Patch: Clone + Default + Send + fmt::Debug;

    /// The draft a blank create form starts from.
    fn blank_draft(today: NaiveDate) -> Self::Draft;

    /// Build a stored record from a draft plus the store-assigned id and date.
    fn from_draft(id: String, draft: Self::Draft, today: NaiveDate) -> Self;

    /// The draft an edit form starts from.
    fn to_draft(&self) -> Self::Draft;

    /// A patch that sets every field a draft carries.
    fn patch_from_draft(draft: Self::Draft) -> Self::Patch;

    /// Merge a patch into this record by field presence.
    fn apply(&mut self, patch: Self::Patch);

    /// Required-field checks, run on create only.
    fn check_draft(draft: &Self::Draft) -> Result<(), Invalid>;

    /// Invariants every stored record keeps, run on create and update.
    fn validate(&self) -> Result<(), Invalid>;
}

#[cfg(feature = "emitter")]
pub use changes::ChangeFeed;
pub use changes::{ChangeKind, RecordChange};
pub use id::IdGenerator;
pub use store::RecordStore;

/// Shared required-string check used by the entity `check_draft` impls.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), Invalid> {
    if value.trim().is_empty() {
        Err(Invalid::new(field, "is required"))
    } else {
        Ok(())
    }
}

/// Shared non-negative amount check.
pub(crate) fn non_negative(
    field: &'static str,
    value: rust_decimal::Decimal,
) -> Result<(), Invalid> {
    if value < rust_decimal::Decimal::ZERO {
        Err(Invalid::new(field, format!("must not be negative (got {})", value)))
    } else {
        Ok(())
    }
}
