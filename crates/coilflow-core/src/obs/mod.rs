//! Observability: runtime counters and the sink boundary.
//!
//! Session logic never touches the counters directly; every event goes
//! through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, SectionCounters, SectionSummary};
pub use sink::{MetricsEvent, MetricsSink, RejectKind, metrics_report, metrics_reset_all, with_metrics_sink};
