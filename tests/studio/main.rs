//! Integration tests for the studio: seeding, forms and list views over
//! the sample inventory, and the cross-collection checks.

use std::fs;
use std::sync::Arc;

use atelier::{
    Artwork, ArtworkStatus, Client, ClientSegment, Exhibition, FixedClock, Filter, Fixtures,
    Form, IntegrityIssue, ListView, StoreError, Studio, StudioConfig, StudioError,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
}

fn studio() -> Studio {
    Studio::new(Fixtures::sample().unwrap(), Arc::new(FixedClock::new(today())))
}

#[test]
fn sample_dashboard() {
    let summary = studio().dashboard().unwrap();

    assert_eq!(summary.total_revenue, Decimal::from(1800));
    assert_eq!(summary.sold_count, 1);
    assert_eq!(summary.available_count, 1);
    assert_eq!(summary.total_artworks, 3);
    assert_eq!(summary.client_count, 2);
    assert_eq!(summary.upcoming_count, 1);
    assert_eq!(summary.upcoming_exhibitions[0].title, "Spring Collection 2024");

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["soldCount"], 1);
    assert_eq!(json["recentSales"][0]["title"], "Urban Reflections");
}

#[test]
fn config_seeds_from_a_fixture_file() {
    let fixtures = Fixtures {
        artworks: Fixtures::sample().unwrap().artworks.into_iter().take(1).collect(),
        ..Fixtures::default()
    };
    let path = std::env::temp_dir().join(format!("atelier-seed-{}.json", std::process::id()));
    fs::write(&path, fixtures.to_json().unwrap()).unwrap();

    let config = StudioConfig::from_toml_str(&format!(
        "[seed]\npath = {:?}\n[clock]\ntoday = \"2024-03-20\"\n[dashboard]\nrecent_sales_limit = 0",
        path.display().to_string()
    ))
    .unwrap();
    let studio = Studio::from_config(&config);
    fs::remove_file(&path).unwrap();
    let studio = studio.unwrap();

    assert_eq!(studio.artworks().len().unwrap(), 1);
    assert!(studio.clients().is_empty().unwrap());
    assert_eq!(studio.today(), today());
    assert!(studio.dashboard().unwrap().recent_sales.is_empty());
}

#[test]
fn bad_fixture_json_is_reported() {
    let path = std::env::temp_dir().join(format!("atelier-bad-{}.json", std::process::id()));
    fs::write(&path, "{ \"artworks\": [ { \"id\": 1 } ] }").unwrap();

    let mut config = StudioConfig::default();
    config.seed.path = Some(path.clone());
    let result = Studio::from_config(&config);
    fs::remove_file(&path).unwrap();

    assert!(matches!(result.unwrap_err(), StudioError::Fixtures(_)));
}

fn load_fixtures(name: &str, fixtures: &Fixtures) -> Result<Studio, StudioError> {
    let path = std::env::temp_dir().join(format!("atelier-{}-{}.json", name, std::process::id()));
    fs::write(&path, fixtures.to_json().unwrap()).unwrap();

    let mut config = StudioConfig::default();
    config.seed.path = Some(path.clone());
    let result = Studio::from_config(&config);
    fs::remove_file(&path).unwrap();
    result
}

#[test]
fn fixture_file_with_duplicate_ids_is_rejected() {
    let mut fixtures = Fixtures::sample().unwrap();
    fixtures.artworks[1].id = "1".into();

    let err = load_fixtures("dup", &fixtures).unwrap_err();
    assert!(matches!(
        err,
        StudioError::Store(StoreError::DuplicateId { collection: "artworks", ref id }) if id == "1"
    ));
}

#[test]
fn fixture_file_breaking_field_rules_is_rejected() {
    let mut fixtures = Fixtures::sample().unwrap();
    fixtures.artworks[0].price = Decimal::from(-5);
    let err = load_fixtures("negative", &fixtures).unwrap_err();
    assert!(matches!(
        err,
        StudioError::Store(StoreError::ValidationFailed { field: "price", .. })
    ));

    let mut fixtures = Fixtures::sample().unwrap();
    fixtures.artworks[2].tags = vec!["x".into(), "x".into()];
    let err = load_fixtures("tags", &fixtures).unwrap_err();
    assert!(matches!(
        err,
        StudioError::Store(StoreError::ValidationFailed { field: "tags", .. })
    ));

    let studio = load_fixtures("clean", &Fixtures::sample().unwrap()).unwrap();
    assert_eq!(studio.artworks().len().unwrap(), 3);
}

#[test]
fn create_form_then_search_finds_the_new_artwork() {
    let studio = studio();
    let mut form = Form::<Artwork>::new(studio.today());
    form.draft_mut().title = "Night Harbor".into();
    form.draft_mut().medium = "Watercolor".into();
    form.draft_mut().price = Decimal::from(640);
    form.add_tag("harbor");
    let created = form.submit(studio.artworks()).unwrap();

    let mut view = ListView::<Artwork>::new();
    view.set_search("HARBOR");
    assert_eq!(view.visible(studio.artworks()).unwrap(), vec![created.clone()]);

    view.set_search("");
    view.set_filter(Filter::Only(ArtworkStatus::Available));
    let ids: Vec<_> = view
        .visible(studio.artworks())
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec!["1".to_string(), created.id]);
}

#[test]
fn edit_client_through_selection() {
    let studio = studio();
    let mut view = ListView::<Client>::new();
    view.set_filter("gallery".parse().unwrap());
    let rows = view.visible(studio.clients()).unwrap();
    assert_eq!(rows.len(), 1);

    view.select(rows[0].id.clone());
    let mut form = view.edit_selected(studio.clients()).unwrap().unwrap();
    form.draft_mut().segment = ClientSegment::Institution;
    let updated = form.submit(studio.clients()).unwrap();

    assert_eq!(updated.segment, ClientSegment::Institution);
    assert_eq!(updated.total_purchases, Decimal::from(45000));
    assert!(view.visible(studio.clients()).unwrap().is_empty());
}

#[test]
fn exhibition_form_and_resolution() {
    let studio = studio();
    let artworks = studio.artworks().list().unwrap();
    let mut form = Form::<Exhibition>::new(studio.today());
    let offered: Vec<_> = form
        .selectable_artworks(&artworks)
        .into_iter()
        .map(|a| a.id.clone())
        .collect();
    assert_eq!(offered, vec!["1"]);

    form.draft_mut().title = "Small Works".into();
    form.draft_mut().venue = "Studio Annex".into();
    form.set_artwork("1", true);
    let exhibition = form.submit(studio.exhibitions()).unwrap();

    let shown = studio.exhibition_artworks(&exhibition.id).unwrap().unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Sunset Dreams");
}

#[test]
fn sale_flow_and_audit() {
    let studio = studio();
    assert!(matches!(
        studio.sell_artwork("1", Decimal::from(2500), Some("42")),
        Err(StudioError::UnknownClient { .. })
    ));

    studio.sell_artwork("1", Decimal::from(2500), Some("1")).unwrap();
    assert_eq!(studio.client_purchases("1").unwrap().len(), 1);
    assert_eq!(studio.dashboard().unwrap().total_revenue, Decimal::from(4300));
    assert!(studio.audit().unwrap().is_empty());

    studio.clients().delete("1").unwrap();
    assert_eq!(
        studio.audit().unwrap(),
        vec![IntegrityIssue::DanglingClient {
            artwork_id: "1".into(),
            client_id: "1".into(),
        }]
    );
}
