use super::*;

#[derive(Clone, Copy, Debug)]
struct TestCoil {
    status: CoilStatus,
    coordinate: Option<Coordinate>,
}

impl TestCoil {
    const fn at(status: CoilStatus, section: u32) -> Self {
        Self {
            status,
            coordinate: Some(Coordinate::new(section, 1, 1)),
        }
    }

    const fn unplaced(status: CoilStatus) -> Self {
        Self {
            status,
            coordinate: None,
        }
    }
}

impl CoilState for TestCoil {
    fn status(&self) -> CoilStatus {
        self.status
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

const fn staged() -> TestCoil {
    TestCoil::at(CoilStatus::Rts, 3)
}

#[test]
fn empty_load_is_missing() {
    let engine = StatusEngine::default();
    let coils: [TestCoil; 0] = [];

    assert_eq!(engine.derive(LoadStatus::Missing, &coils), LoadStatus::Missing);
    assert_eq!(engine.derive(LoadStatus::Ready, &coils), LoadStatus::Missing);
}

#[test]
fn all_rts_in_dock_section_is_ready() {
    let engine = StatusEngine::default();
    let coils = [staged(), staged(), staged()];

    assert_eq!(engine.derive(LoadStatus::Missing, &coils), LoadStatus::Ready);
}

#[test]
fn one_wip_coil_makes_the_load_missing() {
    let engine = StatusEngine::default();
    let coils = [staged(), staged(), TestCoil::at(CoilStatus::Wip, 3)];

    assert_eq!(engine.derive(LoadStatus::Ready, &coils), LoadStatus::Missing);
}

#[test]
fn rts_coil_outside_dock_makes_the_load_missing() {
    let engine = StatusEngine::default();

    let elsewhere = [staged(), TestCoil::at(CoilStatus::Rts, 2)];
    assert_eq!(engine.derive(LoadStatus::Missing, &elsewhere), LoadStatus::Missing);

    let special_slot = [staged(), TestCoil::unplaced(CoilStatus::Rts)];
    assert_eq!(engine.derive(LoadStatus::Missing, &special_slot), LoadStatus::Missing);
}

#[test]
fn shipped_is_sticky_regardless_of_coils() {
    let engine = StatusEngine::default();
    let coils: [TestCoil; 0] = [];
    let mixed = [TestCoil::at(CoilStatus::Wip, 1), TestCoil::unplaced(CoilStatus::OnHold)];

    assert_eq!(engine.derive(LoadStatus::Shipped, &coils), LoadStatus::Shipped);
    assert_eq!(engine.derive(LoadStatus::Shipped, &mixed), LoadStatus::Shipped);
    assert_eq!(engine.derive(LoadStatus::Shipped, &[staged()]), LoadStatus::Shipped);
}

#[test]
fn dock_section_comes_from_the_engine() {
    let engine = StatusEngine::new(1);

    assert_eq!(
        engine.derive(LoadStatus::Missing, &[TestCoil::at(CoilStatus::Rts, 1)]),
        LoadStatus::Ready
    );
    assert_eq!(engine.derive(LoadStatus::Missing, &[staged()]), LoadStatus::Missing);
}

#[test]
fn ready_fraction_counts_rts_anywhere() {
    let coils = [
        staged(),
        TestCoil::at(CoilStatus::Rts, 1),
        TestCoil::at(CoilStatus::Wip, 3),
        TestCoil::unplaced(CoilStatus::Rework),
        TestCoil::at(CoilStatus::OnHold, 3),
    ];

    assert_eq!(ready_count(&coils), 2);
    assert_eq!(ready_fraction(&coils), "2/5");
}

#[test]
fn ready_fraction_of_empty_load() {
    let coils: [TestCoil; 0] = [];

    assert_eq!(ready_fraction(&coils), "0/0");
}

#[test]
fn status_dot_states() {
    let engine = StatusEngine::default();
    let empty: [TestCoil; 0] = [];

    assert_eq!(engine.status_dot(LoadStatus::Shipped, &[staged()]), StatusDot::Grey);
    assert_eq!(engine.status_dot(LoadStatus::Missing, &[staged()]), StatusDot::Green);
    assert_eq!(
        engine.status_dot(LoadStatus::Ready, &[TestCoil::at(CoilStatus::Wip, 3)]),
        StatusDot::Red
    );
    assert_eq!(engine.status_dot(LoadStatus::Missing, &empty), StatusDot::Green);
}

#[test]
fn quick_counts_split_ready_and_missing() {
    let engine = StatusEngine::default();
    let ready = vec![staged(), staged()];
    let missing = vec![staged(), TestCoil::at(CoilStatus::Wip, 3)];
    let shipped_short = vec![TestCoil::at(CoilStatus::Wip, 1)];
    let shipped_ready = vec![staged()];
    let empty = Vec::new();

    let counts = engine.quick_counts([
        (LoadStatus::Missing, ready.as_slice()),
        (LoadStatus::Missing, missing.as_slice()),
        (LoadStatus::Shipped, shipped_short.as_slice()),
        (LoadStatus::Shipped, shipped_ready.as_slice()),
        (LoadStatus::Missing, empty.as_slice()),
    ]);

    assert_eq!(
        counts,
        QuickCounts {
            total_loads: 5,
            ready_loads: 3,
            missing_loads: 1,
        }
    );
}

#[test]
fn statuses_parse_case_insensitively() {
    assert_eq!("rts".parse::<CoilStatus>(), Ok(CoilStatus::Rts));
    assert_eq!("onhold".parse::<CoilStatus>(), Ok(CoilStatus::OnHold));
    assert_eq!(" Shipped ".parse::<LoadStatus>(), Ok(LoadStatus::Shipped));
    assert!("lost".parse::<CoilStatus>().is_err());
}

#[test]
fn statuses_serialize_uppercase() {
    assert_eq!(serde_json::to_string(&CoilStatus::OnHold).unwrap(), "\"ONHOLD\"");
    assert_eq!(serde_json::to_string(&LoadStatus::Ready).unwrap(), "\"READY\"");
    assert_eq!(serde_json::to_string(&StatusDot::Grey).unwrap(), "\"grey\"");
}
