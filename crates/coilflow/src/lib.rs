//! ## Crate layout
//! - `core`: location codec, status engine, grid assembly, stores and the
//!   session facade.
//! - `error`: the stable public error type.
//!
//! The `prelude` module re-exports what an embedding service needs to drive
//! a yard session.

pub use coilflow_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::YardConfig,
        db::{CoilStore as _, LoadStore as _, YardSession},
        model::{CoilFilter, CoilPatch, LoadPatch, NewCoil, NewLoad},
        prelude::*,
        stats::{Dashboard, GroupBy, Summary},
    };
    pub use crate::error::Error;
}
