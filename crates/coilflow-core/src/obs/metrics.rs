use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for session operations.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub sections: BTreeMap<u32, SectionCounters>,
    pub since: Timestamp,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            sections: BTreeMap::new(),
            since: Timestamp::now(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Coil writes
    pub coils_created: u64,
    pub coils_updated: u64,
    pub coils_removed: u64,

    // Load writes
    pub loads_created: u64,
    pub loads_updated: u64,
    pub loads_removed: u64,
    pub loads_shipped: u64,

    // Assignment
    pub coils_assigned: u64,
    pub coils_unassigned: u64,
    pub coils_skipped: u64,
    pub assign_rejected_scrap: u64,
    pub assign_rejected_shipped: u64,
    pub unassign_rejected: u64,

    // Reads
    pub status_derivations: u64,
    pub derived_ready: u64,
    pub derived_missing: u64,
}

///
/// SectionCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SectionCounters {
    pub grid_calls: u64,
    pub coils_drawn: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `since`.
    pub counters: Option<EventState>,
    /// Per-section grid counters, busiest first.
    pub section_counters: Vec<SectionSummary>,
}

///
/// SectionSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SectionSummary {
    pub section: u32,
    pub grid_calls: u64,
    pub coils_drawn: u64,
    pub avg_coils_per_grid: f64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mut section_counters: Vec<SectionSummary> = snap
        .sections
        .iter()
        .map(|(section, counters)| {
            let avg = if counters.grid_calls > 0 {
                counters.coils_drawn as f64 / counters.grid_calls as f64
            } else {
                0.0
            };

            SectionSummary {
                section: *section,
                grid_calls: counters.grid_calls,
                coils_drawn: counters.coils_drawn,
                avg_coils_per_grid: avg,
            }
        })
        .collect();

    section_counters.sort_by(|a, b| {
        b.coils_drawn
            .cmp(&a.coils_drawn)
            .then_with(|| a.section.cmp(&b.section))
    });

    EventReport {
        counters: Some(snap),
        section_counters,
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.coils_created = 3;
            m.ops.loads_shipped = 1;
            m.sections.insert(
                3,
                SectionCounters {
                    grid_calls: 1,
                    ..Default::default()
                },
            );
        });

        reset_all();

        with_state(|m| {
            assert_eq!(m.ops, EventOps::default());
            assert!(m.sections.is_empty());
        });
    }

    #[test]
    fn report_sorts_sections_by_coils_drawn() {
        reset_all();
        with_state_mut(|m| {
            m.sections.insert(
                1,
                SectionCounters {
                    grid_calls: 2,
                    coils_drawn: 4,
                },
            );
            m.sections.insert(
                2,
                SectionCounters {
                    grid_calls: 1,
                    coils_drawn: 9,
                },
            );
            m.sections.insert(
                3,
                SectionCounters {
                    grid_calls: 4,
                    coils_drawn: 4,
                },
            );
        });

        let report = report();
        let sections: Vec<_> = report.section_counters.iter().map(|s| s.section).collect();

        assert_eq!(sections, [2, 1, 3]);
        assert_eq!(report.section_counters[1].avg_coils_per_grid, 2.0);
        assert_eq!(report.section_counters[2].avg_coils_per_grid, 1.0);
    }
}
