//! List views - ephemeral search, filter and selection state over one store.

use std::fmt;
use std::str::FromStr;

use crate::artwork::{Artwork, ArtworkStatus};
use crate::client::{Client, ClientSegment};
use crate::error::StoreError;
use crate::exhibition::{Exhibition, ExhibitionStatus};
use crate::form::Form;
use crate::record::{Record, RecordStore};

/// A record type a list can search and filter.
pub trait Listable: Record {
    /// The status or segment the list's selector filters on.
    type Facet: Copy + PartialEq + fmt::Debug + FromStr;

    fn facet(&self) -> Self::Facet;

    /// Case-insensitive substring match on the record's searchable text.
    /// `needle` is already lowercase.
    fn matches_search(&self, needle: &str) -> bool;
}

impl Listable for Artwork {
    type Facet = ArtworkStatus;

    fn facet(&self) -> ArtworkStatus {
        self.status
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.matches_lowercase(needle)
    }
}

impl Listable for Client {
    type Facet = ClientSegment;

    fn facet(&self) -> ClientSegment {
        self.segment
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.matches_lowercase(needle)
    }
}

impl Listable for Exhibition {
    type Facet = ExhibitionStatus;

    fn facet(&self) -> ExhibitionStatus {
        self.status
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.matches_lowercase(needle)
    }
}

/// Status/segment selector value. `All` lets every record through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter<F> {
    #[default]
    All,
    Only(F),
}

impl<F: PartialEq> Filter<F> {
    pub fn admits(&self, facet: &F) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == facet,
        }
    }
}

impl<F: FromStr> FromStr for Filter<F> {
    type Err = F::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

/// Search text, filter and selection for one list. Nothing here is shared
/// or persisted; the rows are recomputed from the store on every call.
#[derive(Debug, Clone)]
pub struct ListView<R: Listable> {
    search: String,
    filter: Filter<R::Facet>,
    selected: Option<String>,
}

impl<R: Listable> Default for ListView<R> {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: Filter::All,
            selected: None,
        }
    }
}

impl<R: Listable> ListView<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn filter(&self) -> Filter<R::Facet> {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter<R::Facet>) {
        self.filter = filter;
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Search and filter applied together.
    pub fn matches(&self, record: &R) -> bool {
        let needle = self.search.to_lowercase();
        record.matches_search(&needle) && self.filter.admits(&record.facet())
    }

    /// Visible rows of `records`, in order.
    pub fn rows<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        let needle = self.search.to_lowercase();
        records
            .iter()
            .filter(|record| record.matches_search(&needle) && self.filter.admits(&record.facet()))
            .collect()
    }

    /// Visible rows of the store's current collection.
    pub fn visible(&self, store: &RecordStore<R>) -> Result<Vec<R>, StoreError> {
        let needle = self.search.to_lowercase();
        store.find(|record| record.matches_search(&needle) && self.filter.admits(&record.facet()))
    }

    /// The selected record, if it still exists.
    pub fn selected(&self, store: &RecordStore<R>) -> Result<Option<R>, StoreError> {
        match &self.selected {
            Some(id) => store.get(id),
            None => Ok(None),
        }
    }

    /// An edit form for the selected record.
    pub fn edit_selected(&self, store: &RecordStore<R>) -> Result<Option<Form<R>>, StoreError> {
        Ok(self.selected(store)?.map(|record| Form::edit(&record)))
    }

    /// Delete a row. Clears the selection if it pointed at that row.
    pub fn delete(&mut self, store: &RecordStore<R>, id: &str) -> Result<R, StoreError> {
        let removed = store.delete(id)?;
        if self.selected.as_deref() == Some(removed.id()) {
            self.selected = None;
        }
        Ok(removed)
    }
}
