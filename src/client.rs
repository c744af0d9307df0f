use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Invalid, StoreError};
use crate::record::{non_negative, require, Record, RecordStore};
use crate::Keyed;

/// Client classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientSegment {
    Collector,
    Gallery,
    Institution,
    Casual,
}

impl ClientSegment {
    pub const ALL: [ClientSegment; 4] = [
        ClientSegment::Collector,
        ClientSegment::Gallery,
        ClientSegment::Institution,
        ClientSegment::Casual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClientSegment::Collector => "collector",
            ClientSegment::Gallery => "gallery",
            ClientSegment::Institution => "institution",
            ClientSegment::Casual => "casual",
        }
    }
}

impl fmt::Display for ClientSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientSegment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientSegment::ALL
            .into_iter()
            .find(|segment| segment.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown client segment: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Keyed)]
#[keyed(collection = "clients")]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub segment: ClientSegment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub total_purchases: Decimal,
    pub date_added: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_medium: Option<String>,
}

impl Client {
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// Create input for a client. `total_purchases` always starts at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    pub segment: ClientSegment,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub last_contact: Option<NaiveDate>,
    #[serde(default)]
    pub preferred_medium: Option<String>,
}

/// Sparse update for a client. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Option<String>>,
    pub segment: Option<ClientSegment>,
    pub notes: Option<Option<String>>,
    pub total_purchases: Option<Decimal>,
    pub last_contact: Option<Option<NaiveDate>>,
    pub preferred_medium: Option<Option<String>>,
}

impl Record for Client {
    type Draft = NewClient;
    type Patch = ClientPatch;

    fn blank_draft(_today: NaiveDate) -> NewClient {
        NewClient {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: None,
            segment: ClientSegment::Casual,
            notes: None,
            last_contact: None,
            preferred_medium: None,
        }
    }

    fn from_draft(id: String, draft: NewClient, today: NaiveDate) -> Self {
        Client {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            segment: draft.segment,
            notes: draft.notes,
            total_purchases: Decimal::ZERO,
            date_added: today,
            last_contact: draft.last_contact,
            preferred_medium: draft.preferred_medium,
        }
    }

    fn to_draft(&self) -> NewClient {
        NewClient {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            segment: self.segment,
            notes: self.notes.clone(),
            last_contact: self.last_contact,
            preferred_medium: self.preferred_medium.clone(),
        }
    }

    fn patch_from_draft(draft: NewClient) -> ClientPatch {
        ClientPatch {
            name: Some(draft.name),
            email: Some(draft.email),
            phone: Some(draft.phone),
            address: Some(draft.address),
            segment: Some(draft.segment),
            notes: Some(draft.notes),
            total_purchases: None,
            last_contact: Some(draft.last_contact),
            preferred_medium: Some(draft.preferred_medium),
        }
    }

    fn apply(&mut self, patch: ClientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(segment) = patch.segment {
            self.segment = segment;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(total_purchases) = patch.total_purchases {
            self.total_purchases = total_purchases;
        }
        if let Some(last_contact) = patch.last_contact {
            self.last_contact = last_contact;
        }
        if let Some(preferred_medium) = patch.preferred_medium {
            self.preferred_medium = preferred_medium;
        }
    }

    fn check_draft(draft: &NewClient) -> Result<(), Invalid> {
        require("name", &draft.name)?;
        require("email", &draft.email)?;
        require("phone", &draft.phone)
    }

    fn validate(&self) -> Result<(), Invalid> {
        non_negative("totalPurchases", self.total_purchases)
    }
}

impl RecordStore<Client> {
    pub fn by_segment(&self, segment: ClientSegment) -> Result<Vec<Client>, StoreError> {
        self.find(|client| client.segment == segment)
    }
}
