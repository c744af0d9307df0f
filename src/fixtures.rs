//! Fixtures - the seed collections every studio starts from.

use serde::{Deserialize, Serialize};

use crate::artwork::Artwork;
use crate::client::Client;
use crate::exhibition::Exhibition;

const SEED_JSON: &str = include_str!("../fixtures/seed.json");

/// One seed set per collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub artworks: Vec<Artwork>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub exhibitions: Vec<Exhibition>,
}

impl Fixtures {
    /// The built-in sample inventory: three artworks, two clients, two exhibitions.
    pub fn sample() -> Result<Self, serde_json::Error> {
        Self::from_json(SEED_JSON)
    }

    /// Parse fixtures from JSON using the records' camelCase field names.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
