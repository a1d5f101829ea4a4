use crate::{
    grid::PlacedCoil,
    location::{Coordinate, LocationCodec},
    status::{CoilState, CoilStatus},
    types::{CoilId, Date, LoadId, Timestamp},
};
use serde::{Deserialize, Serialize};

///
/// Coil
///
/// A tracked coil. The load reference is owned by the store and only
/// changes through the session's assignment operations.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Coil {
    pub coil_id: CoilId,
    pub width: u32,
    pub weight: u32,
    pub status: CoilStatus,
    pub location: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub scheduled_for_date: Option<Date>,
    load_id: Option<LoadId>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Coil {
    /// Build a coil from its creation input, resolving the location code.
    #[must_use]
    pub fn from_new(input: NewCoil, codec: &LocationCodec, now: Timestamp) -> Self {
        let mut coil = Self {
            coil_id: input.coil_id,
            width: input.width,
            weight: input.weight,
            status: input.status.unwrap_or_default(),
            location: None,
            coordinate: None,
            scheduled_for_date: input.scheduled_for_date,
            load_id: None,
            created_at: now,
            updated_at: None,
        };

        if let Some(location) = input.location.as_deref() {
            coil.relocate(codec, location);
        }

        coil
    }

    #[must_use]
    pub const fn load_id(&self) -> Option<LoadId> {
        self.load_id
    }

    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.load_id.is_some()
    }

    /// Move the coil to a new location code.
    ///
    /// A code that does not resolve to a coordinate clears the coordinate
    /// but keeps the text.
    pub fn relocate(&mut self, codec: &LocationCodec, location: &str) {
        let resolved = codec.resolve(location);

        self.location = Some(resolved.text);
        self.coordinate = resolved.coordinate;
    }

    pub(crate) const fn set_load(&mut self, load: Option<LoadId>) {
        self.load_id = load;
    }
}

impl CoilState for Coil {
    fn status(&self) -> CoilStatus {
        self.status
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

impl PlacedCoil for Coil {
    fn coil_id(&self) -> &CoilId {
        &self.coil_id
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn load_id(&self) -> Option<LoadId> {
        self.load_id
    }
}

///
/// NewCoil
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewCoil {
    pub coil_id: CoilId,
    pub width: u32,
    pub weight: u32,

    #[serde(default)]
    pub status: Option<CoilStatus>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub scheduled_for_date: Option<Date>,
}

impl NewCoil {
    #[must_use]
    pub fn new(coil_id: impl Into<CoilId>, width: u32, weight: u32) -> Self {
        Self {
            coil_id: coil_id.into(),
            width,
            weight,
            status: None,
            location: None,
            scheduled_for_date: None,
        }
    }

    #[must_use]
    pub const fn status(mut self, status: CoilStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub const fn scheduled_for(mut self, date: Date) -> Self {
        self.scheduled_for_date = Some(date);
        self
    }
}

///
/// CoilPatch
///
/// Partial coil update; `None` leaves a field untouched.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CoilPatch {
    pub width: Option<u32>,
    pub weight: Option<u32>,
    pub status: Option<CoilStatus>,
    pub location: Option<String>,
    pub scheduled_for_date: Option<Date>,
}

impl CoilPatch {
    #[must_use]
    pub const fn status(mut self, status: CoilStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

///
/// CoilFilter
///
/// Conjunctive filter over stored coils; unset fields match anything.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CoilFilter {
    pub status: Option<CoilStatus>,
    pub location: Option<String>,
    pub scheduled_for_date: Option<Date>,
    pub load_id: Option<LoadId>,
    pub coil_id: Option<CoilId>,
}

impl CoilFilter {
    #[must_use]
    pub fn matches(&self, coil: &Coil) -> bool {
        self.status.is_none_or(|status| coil.status == status)
            && self.location.as_deref().is_none_or(|location| {
                coil.location
                    .as_deref()
                    .is_some_and(|stored| stored.eq_ignore_ascii_case(location.trim()))
            })
            && self
                .scheduled_for_date
                .is_none_or(|date| coil.scheduled_for_date == Some(date))
            && self.load_id.is_none_or(|load| coil.load_id == Some(load))
            && self.coil_id.as_ref().is_none_or(|id| coil.coil_id == *id)
    }
}
