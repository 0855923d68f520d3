use serde_json::json;

use super::*;

fn application(reference: &str, status: &str) -> serde_json::Value {
    json!({
        "application": {
            "reference": reference,
            "status": status,
            "receivedAt": "2024-03-01T09:30:00.000+00:00"
        },
        "property": {
            "address": {
                "singleLine": "123 Test St",
                "latitude": 51.5,
                "longitude": -0.5
            }
        },
        "proposal": { "description": "Test Proposal" }
    })
}

fn page(entries: Vec<serde_json::Value>) -> RawPage {
    serde_json::from_value(json!({ "data": entries, "links": { "next": null } })).unwrap()
}

// -----------------------------------------------------------------------
// normalize_application
// -----------------------------------------------------------------------

#[test]
fn normalize_application_flattens_nested_fields() {
    let app: RawApplication = serde_json::from_value(application("21-12345", "Pending")).unwrap();
    let record = normalize_application(app, 7);

    assert_eq!(record.key, 7);
    assert_eq!(record.title, "123 Test St");
    assert_eq!(record.latitude, Some(51.5));
    assert_eq!(record.longitude, Some(-0.5));
    assert_eq!(record.status, "Pending");
    assert_eq!(record.reference, Reference::Known("21-12345".to_owned()));
    assert_eq!(record.description, "Test Proposal");
    assert_eq!(record.received_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert!(record.public_url.is_none());
}

#[test]
fn normalize_application_attaches_nested_consultation_url() {
    let mut raw = application("21-12345", "Pending");
    raw["application"]["consultation"] = json!({ "publicUrl": "https://example.org/c/1" });
    let app: RawApplication = serde_json::from_value(raw).unwrap();

    assert_eq!(
        normalize_application(app, 0).public_url.as_deref(),
        Some("https://example.org/c/1")
    );
}

#[test]
fn normalize_application_attaches_top_level_consultation_url() {
    let mut raw = application("21-12345", "Pending");
    raw["consultation"] = json!({ "publicUrl": "https://example.org/c/2" });
    let app: RawApplication = serde_json::from_value(raw).unwrap();

    assert_eq!(
        normalize_application(app, 0).public_url.as_deref(),
        Some("https://example.org/c/2")
    );
}

#[test]
fn normalize_application_falls_back_to_top_level_url_when_nested_has_none() {
    let mut raw = application("21-12345", "Pending");
    raw["application"]["consultation"] = json!({});
    raw["consultation"] = json!({ "publicUrl": "https://example.org/c/3" });
    let app: RawApplication = serde_json::from_value(raw).unwrap();

    assert_eq!(
        normalize_application(app, 0).public_url.as_deref(),
        Some("https://example.org/c/3")
    );
}

#[test]
fn normalize_application_consultation_without_url_is_omitted() {
    let mut raw = application("21-12345", "Pending");
    raw["application"]["consultation"] = json!({ "publicUrl": "" });
    let app: RawApplication = serde_json::from_value(raw).unwrap();

    let record = normalize_application(app, 0);
    assert!(record.public_url.is_none());
    let json = serde_json::to_value(&record).unwrap();
    assert!(json.get("publicUrl").is_none());
}

#[test]
fn normalize_application_tolerates_missing_sections() {
    let app: RawApplication = serde_json::from_value(json!({})).unwrap();
    let record = normalize_application(app, 3);
    assert_eq!(record, Record::blank(3));
}

#[test]
fn normalize_application_placeholder_reference_is_unknown() {
    let raw = application("translation missing: en.planning_application.reference", "Pending");
    let app: RawApplication = serde_json::from_value(raw).unwrap();
    assert_eq!(normalize_application(app, 0).reference, Reference::Unknown);
}

// -----------------------------------------------------------------------
// normalize_entry
// -----------------------------------------------------------------------

#[test]
fn normalize_entry_keeps_blank_record_for_unreadable_entry() {
    assert_eq!(normalize_entry(json!("not an object"), 4), Record::blank(4));
    assert_eq!(
        normalize_entry(json!({ "property": "oops" }), 5),
        Record::blank(5)
    );
}

// -----------------------------------------------------------------------
// normalize_page
// -----------------------------------------------------------------------

#[test]
fn normalize_page_offsets_keys_by_page_ordinal() {
    let store = normalize_page(
        page(vec![application("a", "Pending"), application("b", "Pending")]),
        2,
        50,
        RecordStore::new(),
    );
    let keys: Vec<usize> = store.keys().collect();
    assert_eq!(keys, vec![100, 101]);
}

#[test]
fn normalize_pages_fold_into_dense_keys() {
    let page_size = 3;
    let pages = vec![
        page(vec![
            application("a", "Pending"),
            application("b", "Pending"),
            application("c", "Pending"),
        ]),
        page(vec![
            application("d", "Pending"),
            json!(42),
            application("f", "Pending"),
        ]),
        page(vec![application("g", "Returned")]),
    ];

    let store = pages
        .into_iter()
        .enumerate()
        .fold(RecordStore::new(), |store, (ordinal, p)| {
            normalize_page(p, ordinal, page_size, store)
        });

    assert_eq!(store.len(), 7);
    let keys: Vec<usize> = store.keys().collect();
    assert_eq!(keys, (0..7).collect::<Vec<_>>());
    assert_eq!(store.get(4), Some(&Record::blank(4)));
    assert_eq!(store.get(6).unwrap().status, "Returned");
}

#[test]
fn normalize_page_preserves_payload_order() {
    let store = normalize_page(
        page(vec![application("first", "Pending"), application("second", "Pending")]),
        0,
        50,
        RecordStore::new(),
    );
    let refs: Vec<&str> = store.iter().map(|r| r.reference.as_str()).collect();
    assert_eq!(refs, vec!["first", "second"]);
}

// -----------------------------------------------------------------------
// parse_received_date
// -----------------------------------------------------------------------

#[test]
fn parse_received_date_takes_first_ten_characters() {
    assert_eq!(
        parse_received_date("2023-11-20T14:05:00Z"),
        NaiveDate::from_ymd_opt(2023, 11, 20)
    );
    assert_eq!(
        parse_received_date("2023-11-20"),
        NaiveDate::from_ymd_opt(2023, 11, 20)
    );
}

#[test]
fn parse_received_date_rejects_short_or_invalid_input() {
    assert!(parse_received_date("2023-11").is_none());
    assert!(parse_received_date("not-a-date-at-all").is_none());
    assert!(parse_received_date("").is_none());
}
