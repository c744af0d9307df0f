//! Insights - pure, recomputed-on-read views over the collections.
//!
//! Every function here borrows its inputs, never mutates them, and returns
//! results in collection order.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::artwork::{Artwork, ArtworkStatus};
use crate::client::{Client, ClientSegment};
use crate::exhibition::{Exhibition, ExhibitionStatus};

/// How many sold artworks the dashboard lists by default.
pub const DEFAULT_RECENT_SALES: usize = 5;

/// Sum of `sold_price` over sold artworks. A sold artwork with no price
/// recorded contributes nothing.
pub fn total_revenue(artworks: &[Artwork]) -> Decimal {
    artworks
        .iter()
        .filter(|artwork| artwork.is_sold())
        .map(|artwork| artwork.sold_price.unwrap_or(Decimal::ZERO))
        .sum()
}

pub fn available_artworks(artworks: &[Artwork]) -> Vec<&Artwork> {
    artworks
        .iter()
        .filter(|artwork| artwork.status == ArtworkStatus::Available)
        .collect()
}

pub fn sold_artworks(artworks: &[Artwork]) -> Vec<&Artwork> {
    artworks.iter().filter(|artwork| artwork.is_sold()).collect()
}

/// The first `limit` sold artworks in collection order (not by sale date).
pub fn recent_sales(artworks: &[Artwork], limit: usize) -> Vec<&Artwork> {
    artworks
        .iter()
        .filter(|artwork| artwork.is_sold())
        .take(limit)
        .collect()
}

/// Starts after today, or is scheduled. A scheduled exhibition whose start
/// date has passed still counts.
pub fn is_upcoming(exhibition: &Exhibition, today: NaiveDate) -> bool {
    exhibition.start_date > today || exhibition.status == ExhibitionStatus::Scheduled
}

/// Marked active, or today falls within its date range (inclusive).
pub fn is_active(exhibition: &Exhibition, today: NaiveDate) -> bool {
    exhibition.status == ExhibitionStatus::Active
        || (exhibition.start_date <= today && today <= exhibition.end_date)
}

pub fn upcoming_exhibitions(exhibitions: &[Exhibition], today: NaiveDate) -> Vec<&Exhibition> {
    exhibitions
        .iter()
        .filter(|exhibition| is_upcoming(exhibition, today))
        .collect()
}

pub fn active_exhibitions(exhibitions: &[Exhibition], today: NaiveDate) -> Vec<&Exhibition> {
    exhibitions
        .iter()
        .filter(|exhibition| is_active(exhibition, today))
        .collect()
}

/// Count records per key, in the order of `keys`. Keys with no records are
/// reported with a zero count.
fn tally<T, K: Copy + PartialEq>(items: &[T], keys: &[K], key_of: impl Fn(&T) -> K) -> Vec<(K, usize)> {
    keys.iter()
        .map(|&key| (key, items.iter().filter(|item| key_of(*item) == key).count()))
        .collect()
}

pub fn artworks_by_status(artworks: &[Artwork]) -> Vec<(ArtworkStatus, usize)> {
    tally(artworks, &ArtworkStatus::ALL, |artwork| artwork.status)
}

pub fn clients_by_segment(clients: &[Client]) -> Vec<(ClientSegment, usize)> {
    tally(clients, &ClientSegment::ALL, |client| client.segment)
}

pub fn exhibitions_by_status(exhibitions: &[Exhibition]) -> Vec<(ExhibitionStatus, usize)> {
    tally(exhibitions, &ExhibitionStatus::ALL, |exhibition| exhibition.status)
}

/// Artworks an exhibition references, in artwork collection order.
/// Ids that no longer resolve are skipped.
pub fn exhibition_artworks<'a>(exhibition: &Exhibition, artworks: &'a [Artwork]) -> Vec<&'a Artwork> {
    artworks
        .iter()
        .filter(|artwork| exhibition.artwork_ids.contains(&artwork.id))
        .collect()
}

/// Sold artworks attributed to a client.
pub fn client_purchases<'a>(client_id: &str, artworks: &'a [Artwork]) -> Vec<&'a Artwork> {
    artworks
        .iter()
        .filter(|artwork| artwork.is_sold() && artwork.client_id.as_deref() == Some(client_id))
        .collect()
}

/// Headline numbers and lists for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: Decimal,
    pub sold_count: usize,
    pub available_count: usize,
    pub total_artworks: usize,
    pub client_count: usize,
    pub upcoming_count: usize,
    pub recent_sales: Vec<Artwork>,
    pub upcoming_exhibitions: Vec<Exhibition>,
}

impl DashboardSummary {
    pub fn compute(
        artworks: &[Artwork],
        clients: &[Client],
        exhibitions: &[Exhibition],
        today: NaiveDate,
        recent_limit: usize,
    ) -> Self {
        let upcoming = upcoming_exhibitions(exhibitions, today);
        Self {
            total_revenue: total_revenue(artworks),
            sold_count: sold_artworks(artworks).len(),
            available_count: available_artworks(artworks).len(),
            total_artworks: artworks.len(),
            client_count: clients.len(),
            upcoming_count: upcoming.len(),
            recent_sales: recent_sales(artworks, recent_limit)
                .into_iter()
                .cloned()
                .collect(),
            upcoming_exhibitions: upcoming.into_iter().cloned().collect(),
        }
    }
}
