//! Studio - the three stores, built once and passed around.
//!
//! Stores stay independent of each other. Anything that crosses collections
//! (the dashboard, a sale to a known client, reference checks) lives here.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::artwork::Artwork;
use crate::client::Client;
use crate::clock::Clock;
use crate::config::{ConfigError, StudioConfig};
use crate::error::StoreError;
use crate::exhibition::Exhibition;
use crate::fixtures::Fixtures;
use crate::insights::{self, DashboardSummary, DEFAULT_RECENT_SALES};
use crate::record::RecordStore;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown client: {id}")]
    UnknownClient { id: String },
    #[error("invalid fixtures: {0}")]
    Fixtures(#[from] serde_json::Error),
    #[error("failed to read fixtures {}: {source}", .path.display())]
    ReadFixtures {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A cross-collection inconsistency found by [`Studio::audit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IntegrityIssue {
    /// An artwork names a buyer that is not in the client store.
    #[serde(rename_all = "camelCase")]
    DanglingClient { artwork_id: String, client_id: String },
    /// An exhibition lists an artwork that is not in the artwork store.
    #[serde(rename_all = "camelCase")]
    DanglingExhibitionArtwork {
        exhibition_id: String,
        artwork_id: String,
    },
    /// Sold, but the sale price or sale date is missing.
    #[serde(rename_all = "camelCase")]
    SoldWithoutSale { artwork_id: String },
    /// Not sold, yet a sale price or sale date is recorded.
    #[serde(rename_all = "camelCase")]
    SaleOnUnsold { artwork_id: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DanglingClient {
                artwork_id,
                client_id,
            } => write!(f, "artwork {} references missing client {}", artwork_id, client_id),
            IntegrityIssue::DanglingExhibitionArtwork {
                exhibition_id,
                artwork_id,
            } => write!(
                f,
                "exhibition {} references missing artwork {}",
                exhibition_id, artwork_id
            ),
            IntegrityIssue::SoldWithoutSale { artwork_id } => {
                write!(f, "artwork {} is sold without a sale price and date", artwork_id)
            }
            IntegrityIssue::SaleOnUnsold { artwork_id } => {
                write!(f, "artwork {} has sale fields but is not sold", artwork_id)
            }
        }
    }
}

#[derive(Clone)]
pub struct Studio {
    artworks: RecordStore<Artwork>,
    clients: RecordStore<Client>,
    exhibitions: RecordStore<Exhibition>,
    clock: Arc<dyn Clock>,
    recent_sales_limit: usize,
}

impl fmt::Debug for Studio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Studio")
            .field("clock", &self.clock)
            .field("recent_sales_limit", &self.recent_sales_limit)
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// Seed every store from `fixtures`; all stores share `clock`.
    pub fn new(fixtures: Fixtures, clock: Arc<dyn Clock>) -> Self {
        Self {
            artworks: RecordStore::with_clock(fixtures.artworks, Arc::clone(&clock)),
            clients: RecordStore::with_clock(fixtures.clients, Arc::clone(&clock)),
            exhibitions: RecordStore::with_clock(fixtures.exhibitions, Arc::clone(&clock)),
            clock,
            recent_sales_limit: DEFAULT_RECENT_SALES,
        }
    }

    /// Like `new`, but rejects fixtures with duplicate ids or records that
    /// break a field rule.
    pub fn try_new(fixtures: Fixtures, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        Ok(Self {
            artworks: RecordStore::try_with_clock(fixtures.artworks, Arc::clone(&clock))?,
            clients: RecordStore::try_with_clock(fixtures.clients, Arc::clone(&clock))?,
            exhibitions: RecordStore::try_with_clock(fixtures.exhibitions, Arc::clone(&clock))?,
            clock,
            recent_sales_limit: DEFAULT_RECENT_SALES,
        })
    }

    /// A studio with three empty collections.
    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self::new(Fixtures::default(), clock)
    }

    /// Build a studio as `config` describes: seeded from the built-in sample,
    /// from a JSON fixture file, or empty. Seeds are checked as `try_new` does.
    pub fn from_config(config: &StudioConfig) -> Result<Self, StudioError> {
        let fixtures = if !config.seed.fixtures {
            Fixtures::default()
        } else if let Some(path) = &config.seed.path {
            let json = fs::read_to_string(path).map_err(|source| StudioError::ReadFixtures {
                path: path.clone(),
                source,
            })?;
            Fixtures::from_json(&json)?
        } else {
            Fixtures::sample()?
        };

        info!(
            artworks = fixtures.artworks.len(),
            clients = fixtures.clients.len(),
            exhibitions = fixtures.exhibitions.len(),
            "studio seeded"
        );

        Ok(Self::try_new(fixtures, config.clock())?
            .with_recent_sales_limit(config.dashboard.recent_sales_limit))
    }

    pub fn with_recent_sales_limit(mut self, limit: usize) -> Self {
        self.recent_sales_limit = limit;
        self
    }

    pub fn artworks(&self) -> &RecordStore<Artwork> {
        &self.artworks
    }

    pub fn clients(&self) -> &RecordStore<Client> {
        &self.clients
    }

    pub fn exhibitions(&self) -> &RecordStore<Exhibition> {
        &self.exhibitions
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Dashboard numbers over the current collections.
    pub fn dashboard(&self) -> Result<DashboardSummary, StoreError> {
        let artworks = self.artworks.snapshot()?;
        let clients = self.clients.snapshot()?;
        let exhibitions = self.exhibitions.snapshot()?;
        Ok(DashboardSummary::compute(
            &artworks,
            &clients,
            &exhibitions,
            self.today(),
            self.recent_sales_limit,
        ))
    }

    /// Mark an artwork sold, checking that the buyer exists first.
    pub fn sell_artwork(
        &self,
        artwork_id: &str,
        sold_price: Decimal,
        client_id: Option<&str>,
    ) -> Result<Artwork, StudioError> {
        if let Some(client_id) = client_id {
            if !self.clients.contains(client_id)? {
                warn!(artwork_id, client_id, "sale to unknown client rejected");
                return Err(StudioError::UnknownClient {
                    id: client_id.to_string(),
                });
            }
        }

        let sold = self
            .artworks
            .mark_as_sold(artwork_id, sold_price, client_id.map(str::to_string))?;
        info!(artwork_id, price = %sold_price, "artwork sold");
        Ok(sold)
    }

    /// Artworks shown in an exhibition, or None if there is no such exhibition.
    pub fn exhibition_artworks(&self, exhibition_id: &str) -> Result<Option<Vec<Artwork>>, StoreError> {
        let Some(exhibition) = self.exhibitions.get(exhibition_id)? else {
            return Ok(None);
        };
        let artworks = self.artworks.snapshot()?;
        Ok(Some(
            insights::exhibition_artworks(&exhibition, &artworks)
                .into_iter()
                .cloned()
                .collect(),
        ))
    }

    /// Artworks sold to a client.
    pub fn client_purchases(&self, client_id: &str) -> Result<Vec<Artwork>, StoreError> {
        let artworks = self.artworks.snapshot()?;
        Ok(insights::client_purchases(client_id, &artworks)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Cross-collection consistency report. Reports, never repairs.
    pub fn audit(&self) -> Result<Vec<IntegrityIssue>, StoreError> {
        let artworks = self.artworks.snapshot()?;
        let clients = self.clients.snapshot()?;
        let exhibitions = self.exhibitions.snapshot()?;
        let mut issues = Vec::new();

        for artwork in artworks.iter() {
            if let Some(client_id) = &artwork.client_id {
                if !clients.iter().any(|client| &client.id == client_id) {
                    issues.push(IntegrityIssue::DanglingClient {
                        artwork_id: artwork.id.clone(),
                        client_id: client_id.clone(),
                    });
                }
            }

            let has_sale = artwork.sold_price.is_some() || artwork.sold_date.is_some();
            let complete_sale = artwork.sold_price.is_some() && artwork.sold_date.is_some();
            if artwork.is_sold() && !complete_sale {
                issues.push(IntegrityIssue::SoldWithoutSale {
                    artwork_id: artwork.id.clone(),
                });
            } else if !artwork.is_sold() && has_sale {
                issues.push(IntegrityIssue::SaleOnUnsold {
                    artwork_id: artwork.id.clone(),
                });
            }
        }

        for exhibition in exhibitions.iter() {
            for artwork_id in &exhibition.artwork_ids {
                if !artworks.iter().any(|artwork| &artwork.id == artwork_id) {
                    issues.push(IntegrityIssue::DanglingExhibitionArtwork {
                        exhibition_id: exhibition.id.clone(),
                        artwork_id: artwork_id.clone(),
                    });
                }
            }
        }

        debug!(issues = issues.len(), "studio audited");
        Ok(issues)
    }
}
