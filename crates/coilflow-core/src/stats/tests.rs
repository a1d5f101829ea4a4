use super::*;
use crate::{
    location::LocationCodec,
    model::{NewCoil, NewLoad},
    types::Timestamp,
};

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn at_noon(s: &str) -> Timestamp {
    let days = u64::try_from(date(s).get()).unwrap();
    Timestamp::from_seconds(days * 86_400 + 12 * 3600)
}

fn coil(id: &str, status: CoilStatus, location: &str, created: &str) -> Coil {
    Coil::from_new(
        NewCoil::new(id, 1200, 9000).status(status).location(location),
        &LocationCodec::default(),
        at_noon(created),
    )
}

fn load(n: u128, number: u64, day: &str) -> Load {
    Load::from_new(
        LoadId::from_u128(n),
        &NewLoad::new(number, "Acme Steel", date(day)),
        at_noon(day),
    )
}

#[test]
fn period_keys_follow_iso_calendar() {
    assert_eq!(GroupBy::Week.period_key(date("2026-10-16")), "2026-W42");
    assert_eq!(GroupBy::Week.period_key(date("2027-01-01")), "2026-W53");
    assert_eq!(GroupBy::Month.period_key(date("2026-03-09")), "2026-03");
    assert_eq!(GroupBy::Year.period_key(date("2026-03-09")), "2026");
}

#[test]
fn group_by_parses_case_insensitively() {
    assert_eq!("Month".parse::<GroupBy>(), Ok(GroupBy::Month));
    assert_eq!(" year ".parse::<GroupBy>(), Ok(GroupBy::Year));
    assert!("quarter".parse::<GroupBy>().is_err());
}

#[test]
fn card_reports_readiness_of_a_partial_load() {
    let engine = StatusEngine::default();
    let load = load(1, 4_400_123_456, "2026-10-16");
    let a = coil("A", CoilStatus::Rts, "30101", "2026-10-15");
    let b = coil("B", CoilStatus::Wip, "30102", "2026-10-15");

    let card = LoadCard::build(&engine, &load, &[&a, &b]);

    assert_eq!(card.last4, "3456");
    assert_eq!(card.full_load_number, 4_400_123_456);
    assert_eq!(card.total_coils, 2);
    assert_eq!(card.ready_coils, 1);
    assert_eq!(card.ready_fraction, "1/2");
    assert_eq!(card.status_dot, StatusDot::Red);
    assert_eq!(card.status, LoadStatus::Missing);
    assert!(!card.is_shipped);
}

#[test]
fn short_load_numbers_keep_all_digits() {
    let load = load(1, 42, "2026-10-16");

    assert_eq!(load.last4(), "42");
}

#[test]
fn shipped_card_is_grey() {
    let engine = StatusEngine::default();
    let mut load = load(1, 1001, "2026-10-16");
    load.mark_shipped(at_noon("2026-10-16"));

    let card = LoadCard::build(&engine, &load, &[]);

    assert_eq!(card.status_dot, StatusDot::Grey);
    assert_eq!(card.status, LoadStatus::Shipped);
    assert!(card.is_shipped);
    assert_eq!(card.ready_fraction, "0/0");
}

#[test]
fn dashboard_counts_match_cards() {
    let engine = StatusEngine::default();
    let ready = load(1, 1001, "2026-10-16");
    let empty = load(2, 1002, "2026-10-16");
    let staged = coil("A", CoilStatus::Rts, "TRUCK", "2026-10-16");
    let docked = coil("B", CoilStatus::Rts, "30404", "2026-10-16");

    let board = Dashboard::build(
        &engine,
        date("2026-10-16"),
        &[(&ready, vec![&docked]), (&empty, Vec::new())],
    );

    assert_eq!(board.loads.len(), 2);
    assert_eq!(board.loads[0].status_dot, StatusDot::Green);
    assert_eq!(board.loads[1].status_dot, StatusDot::Green);
    assert_eq!(board.loads[1].status, LoadStatus::Missing);
    assert_eq!(board.quick_counts.total_loads, 2);
    assert_eq!(board.quick_counts.ready_loads, 2);
    assert_eq!(board.quick_counts.missing_loads, 0);

    // A coil in a special slot has no section, so it never counts as staged.
    let truck = Dashboard::build(&engine, date("2026-10-16"), &[(&ready, vec![&staged])]);
    assert_eq!(truck.quick_counts.ready_loads, 0);
}

#[test]
fn card_serializes_with_board_field_names() {
    let engine = StatusEngine::default();
    let load = load(1, 1001, "2026-10-16");
    let json = serde_json::to_value(LoadCard::build(&engine, &load, &[])).unwrap();

    assert_eq!(json["readyFraction"], "0/0");
    assert_eq!(json["statusDot"], "red");
    assert_eq!(json["isShipped"], false);
    assert_eq!(json["last4"], "1001");
}

#[test]
fn summary_groups_by_month_within_range() {
    let mut shipped = load(1, 1, "2026-09-30");
    shipped.mark_shipped(at_noon("2026-09-30"));
    let loads = vec![
        shipped,
        load(2, 2, "2026-10-01"),
        load(3, 3, "2026-10-20"),
        load(4, 4, "2026-11-01"),
    ];
    let coils = vec![
        coil("A", CoilStatus::Wip, "", "2026-09-15"),
        coil("B", CoilStatus::Scrap, "", "2026-10-02"),
        coil("C", CoilStatus::Rts, "", "2026-10-31"),
        coil("D", CoilStatus::Scrap, "", "2026-08-31"),
    ];

    let summary = Summary::build(
        date("2026-09-01"),
        date("2026-10-31"),
        GroupBy::Month,
        &loads,
        &coils,
    );

    assert_eq!(summary.summary.total_coils, 3);
    assert_eq!(summary.summary.trucks_shipped, 1);
    assert_eq!(summary.summary.scrap_coils, 1);
    assert_eq!(summary.periods.len(), 2);

    let september = &summary.periods[0];
    assert_eq!(september.period, "2026-09");
    assert_eq!((september.loads, september.coils, september.scrap), (1, 1, 0));

    let october = &summary.periods[1];
    assert_eq!(october.period, "2026-10");
    assert_eq!((october.loads, october.coils, october.scrap), (2, 2, 1));
}

#[test]
fn summary_over_empty_range_has_no_periods() {
    let loads = vec![load(1, 1, "2026-10-16")];

    let summary = Summary::build(
        date("2025-01-01"),
        date("2025-12-31"),
        GroupBy::Year,
        &loads,
        &Vec::new(),
    );

    assert!(summary.periods.is_empty());
    assert_eq!(summary.summary.total_coils, 0);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["summary"]["groupBy"], "year");
    assert_eq!(json["summary"]["from"], "2025-01-01");
}
