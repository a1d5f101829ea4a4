use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use time::{Time, macros::format_description};

///
/// ScheduledTime
///
/// Wall-clock time of day a load is due at the dock, minute precision.
/// Accepts `HH:MM` and `HH:MM:SS`; seconds are dropped.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ScheduledTime {
    hour: u8,
    minute: u8,
}

impl ScheduledTime {
    #[must_use]
    pub const fn new_checked(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let time = Time::parse(s, format_description!("[hour]:[minute]:[second]"))
            .or_else(|_| Time::parse(s, format_description!("[hour]:[minute]")))
            .ok()?;

        Self::new_checked(time.hour(), time.minute())
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }
}

impl Display for ScheduledTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ScheduledTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduledTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid time: {s}")))
    }
}
