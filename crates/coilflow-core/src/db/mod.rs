//! Record stores and the session that enforces the yard's assignment rules
//! on top of them.

mod session;
mod store;


pub use session::{AssignError, LoadUpdateError, SectionsView, ValidationError, YardSession};
pub use store::{CoilStore, LoadStore, MemoryCoilStore, MemoryLoadStore, StoreError};
