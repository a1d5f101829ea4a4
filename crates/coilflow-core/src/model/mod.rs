//! Stored records and their create/update inputs.

mod coil;
mod load;

#[cfg(test)]
mod tests;

pub use coil::{Coil, CoilFilter, CoilPatch, NewCoil};
pub use load::{Load, LoadPatch, LoadView, NewLoad};
