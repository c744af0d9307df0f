//! Integration tests for the record stores and the aggregations over them.

mod support;

use std::sync::Arc;

use atelier::insights::{active_exhibitions, total_revenue, upcoming_exhibitions};
use atelier::{
    Artwork, ArtworkPatch, ArtworkStatus, Client, Exhibition, ExhibitionStatus, Keyed,
    NewArtwork, NewClient, NewExhibition, Record, RecordStore, StoreError,
};
use rust_decimal::Decimal;
use support::{artwork, artwork_store, clock, date, init_tracing};

#[test]
fn mark_as_sold_scenario() {
    let store = artwork_store(vec![
        artwork("1", ArtworkStatus::Available, 100, None),
        artwork("2", ArtworkStatus::Sold, 200, Some(200)),
    ]);

    let sold = store.mark_as_sold("1", Decimal::from(150), Some("c1".into())).unwrap();
    assert_eq!(sold.status, ArtworkStatus::Sold);
    assert_eq!(sold.sold_price, Some(Decimal::from(150)));
    assert_eq!(sold.sold_date, Some(date(2024, 6, 1)));
    assert_eq!(sold.client_id.as_deref(), Some("c1"));

    let all = store.snapshot().unwrap();
    assert_eq!(all[0], sold);
    assert_eq!(total_revenue(&all), Decimal::from(350));
}

#[test]
fn adding_a_sold_artwork_raises_revenue_by_its_price() {
    let store = artwork_store(vec![
        artwork("1", ArtworkStatus::Sold, 100, Some(120)),
        artwork("2", ArtworkStatus::Available, 300, None),
    ]);
    let before = total_revenue(&store.snapshot().unwrap());

    store
        .create(NewArtwork {
            title: "Harbor".into(),
            status: ArtworkStatus::Sold,
            sold_price: Some(Decimal::from(500)),
            sold_date: Some(date(2024, 6, 1)),
            ..Artwork::blank_draft(date(2024, 6, 1))
        })
        .unwrap();

    let after = total_revenue(&store.snapshot().unwrap());
    assert_eq!(after - before, Decimal::from(500));
}

#[test]
fn scheduled_exhibition_in_the_past_is_still_upcoming() {
    init_tracing();
    let store = RecordStore::<Exhibition>::with_clock(Vec::new(), clock());
    let old = store
        .create(NewExhibition {
            title: "Retrospective".into(),
            venue: "Old Hall".into(),
            start_date: date(2020, 1, 1),
            end_date: date(2020, 2, 1),
            status: ExhibitionStatus::Scheduled,
            ..Exhibition::blank_draft(date(2024, 6, 1))
        })
        .unwrap();

    let upcoming = store.upcoming().unwrap();
    assert_eq!(upcoming, vec![old.clone()]);
    assert!(store.active().unwrap().is_empty());

    let snapshot = store.snapshot().unwrap();
    assert_eq!(upcoming_exhibitions(&snapshot, date(2024, 6, 1)).len(), 1);
    assert!(active_exhibitions(&snapshot, date(2024, 6, 1)).is_empty());
}

#[test]
fn exhibition_running_today_is_active_whatever_its_status() {
    init_tracing();
    let store = RecordStore::<Exhibition>::with_clock(Vec::new(), clock());
    let running = store
        .create(NewExhibition {
            title: "Summer Light".into(),
            venue: "Pier 9".into(),
            start_date: date(2024, 5, 1),
            end_date: date(2024, 6, 1),
            status: ExhibitionStatus::Completed,
            ..Exhibition::blank_draft(date(2024, 6, 1))
        })
        .unwrap();
    assert_eq!(store.active().unwrap(), vec![running]);
    assert!(store.upcoming().unwrap().is_empty());
}

#[test]
fn create_assigns_distinct_ids_even_within_one_millisecond() {
    let store = artwork_store(Vec::new());
    let ids: Vec<String> = (0..20)
        .map(|i| {
            store
                .create(NewArtwork {
                    title: format!("Study {}", i),
                    ..Artwork::blank_draft(date(2024, 6, 1))
                })
                .unwrap()
                .id()
                .to_string()
        })
        .collect();

    for (i, id) in ids.iter().enumerate() {
        assert!(!ids[..i].contains(id), "duplicate id {}", id);
    }
    assert_eq!(store.len().unwrap(), 20);
}

#[test]
fn update_applies_only_the_patched_fields() {
    let store = artwork_store(vec![
        artwork("1", ArtworkStatus::Available, 100, None),
        artwork("2", ArtworkStatus::Available, 200, None),
    ]);
    let before = store.get("2").unwrap().unwrap();

    let updated = store
        .update(
            "2",
            ArtworkPatch {
                dimensions: Some("12\" x 12\"".into()),
                description: Some(Some("small study".into())),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.dimensions, "12\" x 12\"");
    assert_eq!(updated.description.as_deref(), Some("small study"));
    assert_eq!(updated.title, before.title);
    assert_eq!(updated.price, before.price);
    assert_eq!(updated.date_added, before.date_added);

    let ids: Vec<_> = store.list().unwrap().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn absent_ids_leave_every_collection_untouched() {
    let store = artwork_store(vec![artwork("1", ArtworkStatus::Available, 100, None)]);
    let before = store.snapshot().unwrap();

    assert!(store.update("9", ArtworkPatch::default()).unwrap_err().is_not_found());
    assert!(store.delete("9").unwrap_err().is_not_found());
    assert!(store
        .mark_as_sold("9", Decimal::ONE, None)
        .unwrap_err()
        .is_not_found());

    assert!(Arc::ptr_eq(&before, &store.snapshot().unwrap()));
}

#[test]
fn client_requires_name_email_and_phone() {
    init_tracing();
    let store = RecordStore::<Client>::with_clock(Vec::new(), clock());
    let mut draft = NewClient {
        name: "Sarah Johnson".into(),
        email: "sarah@email.com".into(),
        phone: String::new(),
        ..Client::blank_draft(date(2024, 6, 1))
    };

    let err = store.create(draft.clone()).unwrap_err();
    assert!(matches!(err, StoreError::ValidationFailed { field: "phone", .. }));
    assert_eq!(
        err.to_string(),
        "invalid clients record: phone is required"
    );

    draft.phone = "+1-555-0123".into();
    let created = store.create(draft).unwrap();
    assert!(created.total_purchases.is_zero());
    assert_eq!(created.date_added, date(2024, 6, 1));
}

#[test]
fn stores_are_independent() {
    init_tracing();
    let artworks = artwork_store(vec![artwork("1", ArtworkStatus::Available, 100, None)]);
    let exhibitions = RecordStore::<Exhibition>::with_clock(Vec::new(), clock());
    exhibitions
        .create(NewExhibition {
            title: "Show".into(),
            venue: "Hall".into(),
            artwork_ids: vec!["1".into()],
            ..Exhibition::blank_draft(date(2024, 6, 1))
        })
        .unwrap();

    artworks.delete("1").unwrap();
    let remaining = exhibitions.list().unwrap();
    assert_eq!(remaining[0].artwork_ids, vec!["1"]);
}

#[cfg(feature = "emitter")]
#[test]
fn change_listeners_are_scoped_to_their_store() {
    use atelier::{ChangeKind, RecordChange};
    use std::sync::Mutex;

    let artworks = artwork_store(Vec::new());
    let clients = RecordStore::<Client>::with_clock(Vec::new(), clock());
    let seen: Arc<Mutex<Vec<RecordChange>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let listener = artworks
        .on_change(move |change| sink.lock().unwrap().push(change))
        .unwrap();

    let created = artworks
        .create(NewArtwork {
            title: "Watched".into(),
            ..Artwork::blank_draft(date(2024, 6, 1))
        })
        .unwrap();
    clients
        .create(NewClient {
            name: "Unwatched".into(),
            email: "u@example.com".into(),
            phone: "1".into(),
            ..Client::blank_draft(date(2024, 6, 1))
        })
        .unwrap();

    assert!(artworks.remove_listener(&listener).unwrap());
    artworks.delete(&created.id).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].collection, "artworks");
    assert_eq!(seen[0].id, created.id);
    assert_eq!(seen[0].kind, ChangeKind::Created);
}
