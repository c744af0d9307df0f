extern crate self as atelier;

mod artwork;
mod client;
mod clock;
mod config;
mod error;
mod exhibition;
mod fixtures;
mod form;
pub mod insights;
mod list_view;
mod record;
mod studio;

pub use artwork::{Artwork, ArtworkPatch, ArtworkStatus, NewArtwork, MEDIUM_OPTIONS};
pub use client::{Client, ClientPatch, ClientSegment, NewClient};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ClockConfig, ConfigError, DashboardConfig, SeedConfig, StudioConfig};
pub use error::{Invalid, StoreError};
pub use exhibition::{Exhibition, ExhibitionPatch, ExhibitionStatus, NewExhibition};
pub use fixtures::Fixtures;
pub use form::{optional_text, Form, FormMode};
pub use insights::DashboardSummary;
pub use list_view::{Filter, ListView, Listable};
pub use record::{ChangeKind, IdGenerator, Keyed, Record, RecordChange, RecordStore};
pub use studio::{IntegrityIssue, Studio, StudioError};

#[cfg(feature = "emitter")]
pub use record::ChangeFeed;

// Derive macro for Keyed; shares the trait's name in the macro namespace.
pub use atelier_macros::Keyed;
