//! Session facade over the coil and load stores.
//!
//! Every rule that spans both stores (exclusive assignment, the SCRAP
//! guard, the SHIPPED terminal state, releasing coils when a load goes
//! away) is enforced here and nowhere else.

mod coil;
mod error;
mod load;
mod location;
mod stats;


pub use error::{AssignError, LoadUpdateError, ValidationError};
pub use location::SectionsView;

use crate::{
    config::YardConfig,
    db::store::{CoilStore, LoadStore, MemoryCoilStore, MemoryLoadStore},
    grid::GridAssembler,
    location::LocationCodec,
    model::{Coil, Load, LoadView},
    obs::sink::{self, MetricsEvent, MetricsSink, with_metrics_sink},
    status::{self, StatusEngine},
    types::{LoadId, Timestamp},
};

///
/// YardSession
///
/// Owns both stores plus the rule components built from one
/// [`YardConfig`]. Mutations take `&mut self`, so assignment changes are
/// serialized by ownership.
///

pub struct YardSession<C = MemoryCoilStore, L = MemoryLoadStore> {
    coils: C,
    loads: L,
    config: YardConfig,
    codec: LocationCodec,
    engine: StatusEngine,
    assembler: GridAssembler,
    clock: fn() -> Timestamp,
    debug: bool,
    metrics: Option<&'static dyn MetricsSink>,
}

impl YardSession {
    /// In-memory session with the default configuration.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryCoilStore::new(), MemoryLoadStore::new(), YardConfig::default())
    }
}

impl Default for YardSession {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<C: CoilStore, L: LoadStore> YardSession<C, L> {
    #[must_use]
    pub fn new(coils: C, loads: L, config: YardConfig) -> Self {
        Self {
            coils,
            loads,
            codec: config.codec(),
            engine: config.status_engine(),
            assembler: config.assembler(),
            config,
            clock: Timestamp::now,
            debug: false,
            metrics: None,
        }
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn metrics_sink(mut self, sink: &'static dyn MetricsSink) -> Self {
        self.metrics = Some(sink);
        self
    }

    /// Replace the wall clock used for timestamps and "today".
    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &YardConfig {
        &self.config
    }

    #[must_use]
    pub const fn codec(&self) -> &LocationCodec {
        &self.codec
    }

    #[must_use]
    pub const fn status_engine(&self) -> &StatusEngine {
        &self.engine
    }

    #[must_use]
    pub const fn coil_store(&self) -> &C {
        &self.coils
    }

    #[must_use]
    pub const fn load_store(&self) -> &L {
        &self.loads
    }

    fn now(&self) -> Timestamp {
        (self.clock)()
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    // Printed regardless of `debug`.
    fn warn_log(s: impl AsRef<str>) {
        println!("[warn] {}", s.as_ref());
    }

    fn record(&self, event: MetricsEvent) {
        if let Some(sink) = self.metrics {
            with_metrics_sink(sink, || sink::record(event));
        } else {
            sink::record(event);
        }
    }

    // Coils currently assigned to `load`, in coil-id order.
    fn coils_on(&self, load: LoadId) -> Vec<&Coil> {
        self.coils
            .iter()
            .filter(|coil| coil.load_id() == Some(load))
            .collect()
    }

    // Read-side projection: derived status applied, coils attached.
    fn view(&self, load: &Load) -> LoadView {
        let coils = self.coils_on(load.id);
        let derived = self.engine.derive(load.status, &coils);
        self.record(MetricsEvent::StatusDerived { status: derived });

        let mut load = load.clone();
        load.status = derived;

        LoadView {
            ready_fraction: status::ready_fraction(&coils),
            status_dot: self.engine.status_dot(load.status, &coils),
            coils: coils.into_iter().cloned().collect(),
            load,
        }
    }
}
