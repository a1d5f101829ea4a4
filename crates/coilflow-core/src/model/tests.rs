use super::*;
use crate::{
    location::LocationCodec,
    status::{CoilStatus, LoadStatus, StatusDot},
    types::{Date, LoadId, Timestamp},
};

fn codec() -> LocationCodec {
    LocationCodec::default()
}

#[test]
fn new_coil_resolves_location_once() {
    let coil = Coil::from_new(
        NewCoil::new("x1", 10, 20).location("41203"),
        &codec(),
        Timestamp::from_seconds(5),
    );

    assert_eq!(coil.location.as_deref(), Some("41203"));
    assert_eq!(coil.coordinate.map(|c| (c.section, c.column, c.row)), Some((4, 12, 3)));
    assert_eq!(coil.created_at, Timestamp::from_seconds(5));
    assert!(coil.updated_at.is_none());
    assert!(!coil.is_assigned());
}

#[test]
fn relocating_to_garbage_clears_the_coordinate() {
    let mut coil = Coil::from_new(NewCoil::new("x1", 10, 20).location("30101"), &codec(), Timestamp::EPOCH);

    coil.relocate(&codec(), "ab");

    assert_eq!(coil.location.as_deref(), Some("ab"));
    assert!(coil.coordinate.is_none());
}

#[test]
fn filter_matches_conjunctively() {
    let mut coil = Coil::from_new(
        NewCoil::new("x1", 10, 20)
            .status(CoilStatus::Rts)
            .location("s3")
            .scheduled_for(Date::EPOCH),
        &codec(),
        Timestamp::EPOCH,
    );
    let load = LoadId::from_u128(3);
    coil.set_load(Some(load));

    assert!(CoilFilter::default().matches(&coil));
    assert!(
        CoilFilter {
            status: Some(CoilStatus::Rts),
            location: Some(" S3".to_string()),
            scheduled_for_date: Some(Date::EPOCH),
            load_id: Some(load),
            coil_id: Some("X1".into()),
        }
        .matches(&coil)
    );
    assert!(
        !CoilFilter {
            status: Some(CoilStatus::Rts),
            load_id: Some(LoadId::from_u128(4)),
            ..CoilFilter::default()
        }
        .matches(&coil)
    );
}

#[test]
fn new_coil_json_accepts_lowercase_ids_and_omitted_fields() {
    let input: NewCoil = serde_json::from_str(r#"{"coil_id":"ab-1","width":5,"weight":6}"#).unwrap();

    assert_eq!(input.coil_id, "AB-1");
    assert!(input.status.is_none());
    assert!(input.location.is_none());
}

#[test]
fn new_load_json_defaults_coil_ids() {
    let input: NewLoad = serde_json::from_str(
        r#"{"load_number":12,"customer_name":"Acme","created_for_date":"2026-10-16","scheduled_time":"08:15:00"}"#,
    )
    .unwrap();

    assert!(input.coil_ids.is_empty());
    assert_eq!(input.scheduled_time.map(|t| (t.hour(), t.minute())), Some((8, 15)));
}

#[test]
fn mark_shipped_keeps_the_first_stamp() {
    let mut load = Load::from_new(
        LoadId::from_u128(1),
        &NewLoad::new(5, " Acme ", Date::EPOCH),
        Timestamp::EPOCH,
    );
    assert_eq!(load.customer_name, "Acme");
    assert_eq!(load.status, LoadStatus::Missing);

    load.mark_shipped(Timestamp::from_seconds(10));
    load.mark_shipped(Timestamp::from_seconds(20));

    assert!(load.is_shipped());
    assert_eq!(load.shipped_at, Some(Timestamp::from_seconds(10)));
}

#[test]
fn load_view_flattens_the_load() {
    let load = Load::from_new(
        LoadId::from_u128(1),
        &NewLoad::new(5, "Acme", Date::EPOCH),
        Timestamp::EPOCH,
    );
    let view = LoadView {
        load,
        coils: Vec::new(),
        ready_fraction: "0/0".to_string(),
        status_dot: StatusDot::Red,
    };

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["load_number"], 5);
    assert_eq!(json["status"], "MISSING");
    assert_eq!(json["status_dot"], "red");
    assert!(json["coils"].as_array().unwrap().is_empty());
}
