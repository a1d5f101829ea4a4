//! Metrics sink boundary.
//!
//! Session logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{obs::metrics, status::LoadStatus};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// RejectKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectKind {
    Scrap,
    Shipped,
    NotOnLoad,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    CoilCreated,
    CoilUpdated,
    CoilRemoved,
    LoadCreated,
    LoadUpdated,
    LoadRemoved,
    LoadShipped,
    CoilAssigned,
    CoilUnassigned,
    CoilSkipped,
    AssignRejected { reason: RejectKind },
    StatusDerived { status: LoadStatus },
    GridAssembled { section: u32, coils: u64 },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.
/// Used whenever no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| {
            let ops = &mut m.ops;

            match event {
                MetricsEvent::CoilCreated => ops.coils_created = ops.coils_created.saturating_add(1),
                MetricsEvent::CoilUpdated => ops.coils_updated = ops.coils_updated.saturating_add(1),
                MetricsEvent::CoilRemoved => ops.coils_removed = ops.coils_removed.saturating_add(1),

                MetricsEvent::LoadCreated => ops.loads_created = ops.loads_created.saturating_add(1),
                MetricsEvent::LoadUpdated => ops.loads_updated = ops.loads_updated.saturating_add(1),
                MetricsEvent::LoadRemoved => ops.loads_removed = ops.loads_removed.saturating_add(1),
                MetricsEvent::LoadShipped => ops.loads_shipped = ops.loads_shipped.saturating_add(1),

                MetricsEvent::CoilAssigned => {
                    ops.coils_assigned = ops.coils_assigned.saturating_add(1);
                }
                MetricsEvent::CoilUnassigned => {
                    ops.coils_unassigned = ops.coils_unassigned.saturating_add(1);
                }
                MetricsEvent::CoilSkipped => ops.coils_skipped = ops.coils_skipped.saturating_add(1),
                MetricsEvent::AssignRejected { reason } => match reason {
                    RejectKind::Scrap => {
                        ops.assign_rejected_scrap = ops.assign_rejected_scrap.saturating_add(1);
                    }
                    RejectKind::Shipped => {
                        ops.assign_rejected_shipped = ops.assign_rejected_shipped.saturating_add(1);
                    }
                    RejectKind::NotOnLoad => {
                        ops.unassign_rejected = ops.unassign_rejected.saturating_add(1);
                    }
                },

                MetricsEvent::StatusDerived { status } => {
                    ops.status_derivations = ops.status_derivations.saturating_add(1);
                    match status {
                        LoadStatus::Ready => ops.derived_ready = ops.derived_ready.saturating_add(1),
                        LoadStatus::Missing => {
                            ops.derived_missing = ops.derived_missing.saturating_add(1);
                        }
                        LoadStatus::Shipped => {}
                    }
                }

                MetricsEvent::GridAssembled { section, coils } => {
                    let entry = m.sections.entry(section).or_default();
                    entry.grid_calls = entry.grid_calls.saturating_add(1);
                    entry.coils_drawn = entry.coils_drawn.saturating_add(coils);
                }
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` restores the previous pointer before returning,
        //   including on unwind via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        // - Only a shared reference is materialized, matching the borrow used
        //   to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on every exit, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<MetricsEvent>>,
    }

    impl MetricsSink for CaptureSink {
        fn record(&self, event: MetricsEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn global_sink_updates_counters() {
        metrics_reset_all();

        record(MetricsEvent::CoilCreated);
        record(MetricsEvent::LoadCreated);
        record(MetricsEvent::CoilAssigned);
        record(MetricsEvent::CoilAssigned);
        record(MetricsEvent::AssignRejected {
            reason: RejectKind::Scrap,
        });
        record(MetricsEvent::GridAssembled {
            section: 3,
            coils: 5,
        });

        let report = metrics_report();
        let counters = report.counters.unwrap();

        assert_eq!(counters.ops.coils_created, 1);
        assert_eq!(counters.ops.loads_created, 1);
        assert_eq!(counters.ops.coils_assigned, 2);
        assert_eq!(counters.ops.assign_rejected_scrap, 1);
        assert_eq!(report.section_counters[0].section, 3);
        assert_eq!(report.section_counters[0].coils_drawn, 5);
    }

    #[test]
    fn override_captures_events_and_restores_global() {
        metrics_reset_all();
        let sink = CaptureSink::default();

        with_metrics_sink(&sink, || {
            record(MetricsEvent::CoilRemoved);
            record(MetricsEvent::LoadShipped);
        });
        record(MetricsEvent::CoilRemoved);

        assert_eq!(
            *sink.events.borrow(),
            [MetricsEvent::CoilRemoved, MetricsEvent::LoadShipped]
        );

        let counters = metrics_report().counters.unwrap();
        assert_eq!(counters.ops.coils_removed, 1);
        assert_eq!(counters.ops.loads_shipped, 0);
    }

    #[test]
    fn override_is_restored_after_panic() {
        metrics_reset_all();
        let sink = CaptureSink::default();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            with_metrics_sink::<()>(&sink, || panic!("boom"));
        }));
        assert!(result.is_err());

        record(MetricsEvent::CoilCreated);
        assert!(sink.events.borrow().is_empty());
        assert_eq!(metrics_report().counters.unwrap().ops.coils_created, 1);
    }
}
