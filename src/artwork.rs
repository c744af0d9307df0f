//! Artworks - the inventory, and the artwork-specific store operations.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Invalid, StoreError};
use crate::record::{non_negative, require, Record, RecordStore};
use crate::Keyed;

/// Mediums offered by the artwork form.
pub const MEDIUM_OPTIONS: &[&str] = &[
    "Oil on Canvas",
    "Acrylic on Canvas",
    "Watercolor",
    "Mixed Media",
    "Digital Art",
    "Photography",
    "Sculpture",
    "Charcoal",
    "Pastel",
    "Ink",
];

/// Availability lifecycle of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkStatus {
    Available,
    Sold,
    Reserved,
    Exhibition,
}

impl ArtworkStatus {
    pub const ALL: [ArtworkStatus; 4] = [
        ArtworkStatus::Available,
        ArtworkStatus::Sold,
        ArtworkStatus::Reserved,
        ArtworkStatus::Exhibition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArtworkStatus::Available => "available",
            ArtworkStatus::Sold => "sold",
            ArtworkStatus::Reserved => "reserved",
            ArtworkStatus::Exhibition => "exhibition",
        }
    }
}

impl fmt::Display for ArtworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtworkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtworkStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown artwork status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Keyed)]
#[keyed(collection = "artworks")]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub medium: String,
    pub dimensions: String,
    pub year_created: i32,
    pub price: Decimal,
    pub status: ArtworkStatus,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date_added: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Artwork {
    pub fn is_sold(&self) -> bool {
        self.status == ArtworkStatus::Sold
    }

    /// Price shown on the artwork card: the sale price once sold, else the list price.
    pub fn display_price(&self) -> Decimal {
        match (self.status, self.sold_price) {
            (ArtworkStatus::Sold, Some(sold)) => sold,
            _ => self.price,
        }
    }

    /// Case-insensitive substring match on title, medium and tags.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.medium.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Create input for an artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtwork {
    pub title: String,
    pub medium: String,
    pub dimensions: String,
    pub year_created: i32,
    pub price: Decimal,
    pub status: ArtworkStatus,
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sold_date: Option<NaiveDate>,
    #[serde(default)]
    pub sold_price: Option<Decimal>,
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Sparse update for an artwork. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtworkPatch {
    pub title: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub year_created: Option<i32>,
    pub price: Option<Decimal>,
    pub status: Option<ArtworkStatus>,
    pub image_url: Option<String>,
    pub description: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub sold_date: Option<Option<NaiveDate>>,
    pub sold_price: Option<Option<Decimal>>,
    pub client_id: Option<Option<String>>,
}

impl Record for Artwork {
    type Draft = NewArtwork;
    type Patch = ArtworkPatch;

    fn blank_draft(today: NaiveDate) -> NewArtwork {
        NewArtwork {
            title: String::new(),
            medium: String::new(),
            dimensions: String::new(),
            year_created: today.year(),
            price: Decimal::ZERO,
            status: ArtworkStatus::Available,
            image_url: String::new(),
            description: None,
            tags: Vec::new(),
            sold_date: None,
            sold_price: None,
            client_id: None,
        }
    }

    fn from_draft(id: String, draft: NewArtwork, today: NaiveDate) -> Self {
        Artwork {
            id,
            title: draft.title,
            medium: draft.medium,
            dimensions: draft.dimensions,
            year_created: draft.year_created,
            price: draft.price,
            status: draft.status,
            image_url: draft.image_url,
            description: draft.description,
            tags: draft.tags,
            date_added: today,
            sold_date: draft.sold_date,
            sold_price: draft.sold_price,
            client_id: draft.client_id,
        }
    }

    fn to_draft(&self) -> NewArtwork {
        NewArtwork {
            title: self.title.clone(),
            medium: self.medium.clone(),
            dimensions: self.dimensions.clone(),
            year_created: self.year_created,
            price: self.price,
            status: self.status,
            image_url: self.image_url.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            sold_date: self.sold_date,
            sold_price: self.sold_price,
            client_id: self.client_id.clone(),
        }
    }

    fn patch_from_draft(draft: NewArtwork) -> ArtworkPatch {
        ArtworkPatch {
            title: Some(draft.title),
            medium: Some(draft.medium),
            dimensions: Some(draft.dimensions),
            year_created: Some(draft.year_created),
            price: Some(draft.price),
            status: Some(draft.status),
            image_url: Some(draft.image_url),
            description: Some(draft.description),
            tags: Some(draft.tags),
            sold_date: Some(draft.sold_date),
            sold_price: Some(draft.sold_price),
            client_id: Some(draft.client_id),
        }
    }

    fn apply(&mut self, patch: ArtworkPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(medium) = patch.medium {
            self.medium = medium;
        }
        if let Some(dimensions) = patch.dimensions {
            self.dimensions = dimensions;
        }
        if let Some(year_created) = patch.year_created {
            self.year_created = year_created;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(sold_date) = patch.sold_date {
            self.sold_date = sold_date;
        }
        if let Some(sold_price) = patch.sold_price {
            self.sold_price = sold_price;
        }
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
    }

    fn check_draft(draft: &NewArtwork) -> Result<(), Invalid> {
        require("title", &draft.title)
    }

    fn validate(&self) -> Result<(), Invalid> {
        non_negative("price", self.price)?;
        if let Some(sold_price) = self.sold_price {
            non_negative("soldPrice", sold_price)?;
        }
        for (i, tag) in self.tags.iter().enumerate() {
            if self.tags[..i].contains(tag) {
                return Err(Invalid::new("tags", format!("contains duplicate tag {:?}", tag)));
            }
        }
        Ok(())
    }
}

/// Artwork-specific operations on top of the generic store.
impl RecordStore<Artwork> {
    /// Mark an artwork sold: status, sale price, today's sale date and the
    /// buyer land in one atomic update.
    pub fn mark_as_sold(
        &self,
        id: &str,
        sold_price: Decimal,
        client_id: Option<String>,
    ) -> Result<Artwork, StoreError> {
        self.update(
            id,
            ArtworkPatch {
                status: Some(ArtworkStatus::Sold),
                sold_price: Some(Some(sold_price)),
                sold_date: Some(Some(self.today())),
                client_id: Some(client_id),
                ..Default::default()
            },
        )
    }

    pub fn available(&self) -> Result<Vec<Artwork>, StoreError> {
        self.by_status(ArtworkStatus::Available)
    }

    pub fn by_status(&self, status: ArtworkStatus) -> Result<Vec<Artwork>, StoreError> {
        self.find(|artwork| artwork.status == status)
    }
}
