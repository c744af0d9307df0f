use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Invalid, StoreError};
use crate::insights;
use crate::record::{non_negative, require, Record, RecordStore};
use crate::Keyed;

/// Scheduling lifecycle of an exhibition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhibitionStatus {
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

impl ExhibitionStatus {
    pub const ALL: [ExhibitionStatus; 4] = [
        ExhibitionStatus::Scheduled,
        ExhibitionStatus::Active,
        ExhibitionStatus::Completed,
        ExhibitionStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExhibitionStatus::Scheduled => "scheduled",
            ExhibitionStatus::Active => "active",
            ExhibitionStatus::Completed => "completed",
            ExhibitionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ExhibitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExhibitionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExhibitionStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown exhibition status: {}", s))
    }
}

/// An exhibition. Artwork ids are plain references; one artwork may hang in
/// several exhibitions and nothing checks that the ids resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Keyed)]
#[keyed(collection = "exhibitions")]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    pub id: String,
    pub title: String,
    pub venue: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ExhibitionStatus,
    #[serde(default)]
    pub artwork_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Percentage, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sales: Option<Decimal>,
}

impl Exhibition {
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.venue.to_lowercase().contains(needle)
    }
}

/// Create input for an exhibition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExhibition {
    pub title: String,
    pub venue: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ExhibitionStatus,
    #[serde(default)]
    pub artwork_ids: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub total_sales: Option<Decimal>,
}

/// Sparse update for an exhibition. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExhibitionPatch {
    pub title: Option<String>,
    pub venue: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ExhibitionStatus>,
    pub artwork_ids: Option<Vec<String>>,
    pub description: Option<Option<String>>,
    pub commission: Option<Option<Decimal>>,
    pub total_sales: Option<Option<Decimal>>,
}

impl Record for Exhibition {
    type Draft = NewExhibition;
    type Patch = ExhibitionPatch;

    fn blank_draft(today: NaiveDate) -> NewExhibition {
        NewExhibition {
            title: String::new(),
            venue: String::new(),
            start_date: today,
            end_date: today,
            status: ExhibitionStatus::Scheduled,
            artwork_ids: Vec::new(),
            description: None,
            commission: Some(Decimal::ZERO),
            total_sales: Some(Decimal::ZERO),
        }
    }

    // Exhibitions carry no date_added.
    fn from_draft(id: String, draft: NewExhibition, _today: NaiveDate) -> Self {
        Exhibition {
            id,
            title: draft.title,
            venue: draft.venue,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status,
            artwork_ids: draft.artwork_ids,
            description: draft.description,
            commission: draft.commission,
            total_sales: draft.total_sales,
        }
    }

    fn to_draft(&self) -> NewExhibition {
        NewExhibition {
            title: self.title.clone(),
            venue: self.venue.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            artwork_ids: self.artwork_ids.clone(),
            description: self.description.clone(),
            commission: self.commission,
            total_sales: self.total_sales,
        }
    }

    fn patch_from_draft(draft: NewExhibition) -> ExhibitionPatch {
        ExhibitionPatch {
            title: Some(draft.title),
            venue: Some(draft.venue),
            start_date: Some(draft.start_date),
            end_date: Some(draft.end_date),
            status: Some(draft.status),
            artwork_ids: Some(draft.artwork_ids),
            description: Some(draft.description),
            commission: Some(draft.commission),
            total_sales: Some(draft.total_sales),
        }
    }

    fn apply(&mut self, patch: ExhibitionPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(venue) = patch.venue {
            self.venue = venue;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(artwork_ids) = patch.artwork_ids {
            self.artwork_ids = artwork_ids;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(commission) = patch.commission {
            self.commission = commission;
        }
        if let Some(total_sales) = patch.total_sales {
            self.total_sales = total_sales;
        }
    }

    fn check_draft(draft: &NewExhibition) -> Result<(), Invalid> {
        require("title", &draft.title)?;
        require("venue", &draft.venue)
    }

    // start_date <= end_date is deliberately not checked.
    fn validate(&self) -> Result<(), Invalid> {
        if let Some(commission) = self.commission {
            if commission < Decimal::ZERO || commission > Decimal::ONE_HUNDRED {
                return Err(Invalid::new(
                    "commission",
                    format!("must be between 0 and 100 (got {})", commission),
                ));
            }
        }
        if let Some(total_sales) = self.total_sales {
            non_negative("totalSales", total_sales)?;
        }
        Ok(())
    }
}

impl RecordStore<Exhibition> {
    /// Exhibitions starting after today, plus every scheduled one.
    pub fn upcoming(&self) -> Result<Vec<Exhibition>, StoreError> {
        let today = self.today();
        self.find(|exhibition| insights::is_upcoming(exhibition, today))
    }

    /// Exhibitions marked active, plus any whose date range covers today.
    pub fn active(&self) -> Result<Vec<Exhibition>, StoreError> {
        let today = self.today();
        self.find(|exhibition| insights::is_active(exhibition, today))
    }

    pub fn by_status(&self, status: ExhibitionStatus) -> Result<Vec<Exhibition>, StoreError> {
        self.find(|exhibition| exhibition.status == status)
    }
}
