use crate::types::Date;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const SECS_PER_DAY: u64 = 86_400;

///
/// Timestamp
/// (in seconds)
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(u64::MIN);

    /// Construct from seconds.
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs)
    }

    /// Current wall-clock timestamp in seconds.
    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn now() -> Self {
        let secs = OffsetDateTime::now_utc().unix_timestamp().max(0);
        Self(secs as u64)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// UTC calendar day containing this instant.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn date(self) -> Date {
        Date::from_days((self.0 / SECS_PER_DAY) as i32)
    }
}
