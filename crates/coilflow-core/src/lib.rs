//! Core of coilflow: location codes, load readiness, floor-plan assembly,
//! and the session that keeps coil/load assignment consistent.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod grid;
pub mod location;
pub mod model;
pub mod obs;
pub mod stats;
pub mod status;
pub mod types;

///
/// Prelude
///
/// Domain vocabulary only. Sessions, stores and errors are imported from
/// their modules.
///

pub mod prelude {
    pub use crate::{
        grid::{GridCell, SectionGrid},
        location::Coordinate,
        model::{Coil, Load, LoadView},
        status::{CoilStatus, LoadStatus, StatusDot},
        types::{CoilId, Date, LoadId, ScheduledTime, Timestamp},
    };
}
