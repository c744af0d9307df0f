//! Forms - staged drafts that write through to a store on submit.

use chrono::NaiveDate;

use crate::artwork::{Artwork, ArtworkStatus};
use crate::error::StoreError;
use crate::exhibition::Exhibition;
use crate::record::{Record, RecordStore};

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// A draft being edited for one record type.
///
/// Nothing reaches the store until `submit`, which calls exactly one of
/// `create` or `update` and consumes the form.
#[derive(Debug, Clone)]
pub struct Form<R: Record> {
    mode: FormMode,
    draft: R::Draft,
}

impl<R: Record> Form<R> {
    /// A blank create form.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Create,
            draft: R::blank_draft(today),
        }
    }

    /// An edit form pre-filled from `record`.
    pub fn edit(record: &R) -> Self {
        Self {
            mode: FormMode::Edit {
                id: record.id().to_string(),
            },
            draft: record.to_draft(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    /// Write the draft through to `store` and close the form.
    pub fn submit(self, store: &RecordStore<R>) -> Result<R, StoreError> {
        match self.mode {
            FormMode::Create => store.create(self.draft),
            FormMode::Edit { id } => store.update(&id, R::patch_from_draft(self.draft)),
        }
    }
}

/// Blank input means "not set" for the optional text fields forms edit.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Form<Artwork> {
    /// Add a tag. Blank tags and tags already present are ignored.
    /// Returns true if the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.draft.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.draft.tags.push(tag.to_string());
        true
    }

    /// Returns true if the tag was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.draft.tags.len();
        self.draft.tags.retain(|t| t != tag);
        self.draft.tags.len() != before
    }
}

impl Form<Exhibition> {
    /// Include or exclude an artwork.
    pub fn set_artwork(&mut self, artwork_id: &str, included: bool) {
        let present = self.draft.artwork_ids.iter().any(|id| id == artwork_id);
        if included && !present {
            self.draft.artwork_ids.push(artwork_id.to_string());
        } else if !included {
            self.draft.artwork_ids.retain(|id| id != artwork_id);
        }
    }

    /// Flip an artwork's membership. Returns true if it is now included.
    pub fn toggle_artwork(&mut self, artwork_id: &str) -> bool {
        let included = !self.draft.artwork_ids.iter().any(|id| id == artwork_id);
        self.set_artwork(artwork_id, included);
        included
    }

    /// Artworks the form offers: available ones, plus any already included.
    pub fn selectable_artworks<'a>(&self, artworks: &'a [Artwork]) -> Vec<&'a Artwork> {
        artworks
            .iter()
            .filter(|artwork| {
                artwork.status == ArtworkStatus::Available
                    || self.draft.artwork_ids.contains(&artwork.id)
            })
            .collect()
    }
}
