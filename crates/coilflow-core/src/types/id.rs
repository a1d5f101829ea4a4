use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

///
/// CoilId
///
/// Mill-assigned coil identifier. Always trimmed and uppercased so lookups
/// are case-insensitive.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(from = "String", into = "String")]
pub struct CoilId(String);

impl CoilId {
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for CoilId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CoilId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for CoilId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<CoilId> for String {
    fn from(id: CoilId) -> Self {
        id.0
    }
}

impl PartialEq<str> for CoilId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CoilId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

///
/// LoadId
///
/// Store-generated load key (ULID, serialized as its 26-char string).
///

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct LoadId(Ulid);

impl LoadId {
    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(Ulid(n))
    }

    #[must_use]
    pub const fn ulid(self) -> Ulid {
        self.0
    }
}
