use coilflow::{
    ErrorKind, ErrorOrigin,
    prelude::*,
};

fn noon() -> Timestamp {
    // 2026-10-16T12:00:00Z
    Timestamp::from_seconds(1_792_152_000)
}

fn session() -> YardSession {
    YardSession::in_memory().with_clock(noon)
}

#[test]
fn load_goes_ready_once_every_coil_is_staged_at_the_dock() {
    let mut db = session();
    let today = Date::new_checked(2026, 10, 16).unwrap();

    db.create_coil(NewCoil::new("a-100", 1200, 8000).status(CoilStatus::Rts).location("30101"))
        .unwrap();
    db.create_coil(NewCoil::new("a-101", 1200, 8000).location("10203"))
        .unwrap();

    let view = db
        .create_load(NewLoad::new(551_234, "Acme Steel", today).coils(["a-100", "a-101"]))
        .unwrap();
    assert_eq!(view.status(), LoadStatus::Missing);
    assert_eq!(view.ready_fraction, "1/2");

    let id = CoilId::new("A-101");
    db.update_coil(&id, CoilPatch::default().status(CoilStatus::Rts).location("30202"))
        .unwrap();

    let view = db.load(view.id()).unwrap();
    assert_eq!(view.status(), LoadStatus::Ready);
    assert_eq!(view.status_dot, StatusDot::Green);

    let grid = db.section_grid(3).unwrap();
    assert_eq!(grid.coil_count(), 2);
    assert_eq!(grid.cell(2, 2).map(|cell| cell.coil_count), Some(1));

    let board = db.dashboard_today();
    assert_eq!(board.quick_counts.ready_loads, 1);
    assert_eq!(board.loads[0].ready_fraction, "2/2");
}

#[test]
fn shipped_loads_are_frozen_and_errors_map_to_public_kinds() {
    let mut db = session();
    let today = Date::new_checked(2026, 10, 16).unwrap();

    db.create_coil(NewCoil::new("b-1", 900, 4000).status(CoilStatus::Rts).location("30101"))
        .unwrap();
    db.create_coil(NewCoil::new("b-2", 900, 4000)).unwrap();
    let load = db
        .create_load(NewLoad::new(7, "Globex", today).coils(["b-1"]))
        .unwrap()
        .id();

    let shipped = db
        .update_load(load, LoadPatch::default().status(LoadStatus::Shipped))
        .unwrap();
    assert_eq!(shipped.status(), LoadStatus::Shipped);
    assert_eq!(shipped.status_dot, StatusDot::Grey);
    assert!(shipped.load.shipped_at.is_some());

    let err: coilflow::Error = db.assign_coil(load, &CoilId::new("b-2")).unwrap_err().into();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.origin, ErrorOrigin::Load);

    let err: coilflow::Error = db.coil(&CoilId::new("zz")).unwrap_err().into();
    assert!(err.is_not_found());
    assert_eq!(err.origin, ErrorOrigin::Coil);
}

#[test]
fn public_views_serialize_for_a_web_layer() {
    let mut db = session();
    let today = Date::new_checked(2026, 10, 16).unwrap();

    db.create_load(NewLoad::new(42, "Initech", today)).unwrap();

    let board = serde_json::to_value(db.dashboard(today)).unwrap();
    assert_eq!(board["quick_counts"]["totalLoads"], 1);
    assert_eq!(board["loads"][0]["statusDot"], "green");
    assert_eq!(board["loads"][0]["status"], "MISSING");

    let summary = db.summary(today, today, GroupBy::Month).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["summary"]["groupBy"], "month");
    assert_eq!(json["periods"][0]["period"], "2026-10");

    assert!(!coilflow::VERSION.is_empty());
}
