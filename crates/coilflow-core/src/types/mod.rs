mod clock;
mod date;
mod id;
mod timestamp;


pub use clock::ScheduledTime;
pub use date::Date;
pub use id::{CoilId, LoadId};
pub use timestamp::Timestamp;
