use crate::{
    model::Coil,
    status::{LoadStatus, StatusDot},
    types::{CoilId, Date, LoadId, ScheduledTime, Timestamp},
};
use serde::{Deserialize, Serialize};

///
/// Load
///
/// An outbound shipment. Its coil set lives on the coil side; `status` is
/// the stored value, which is only authoritative once it is SHIPPED.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Load {
    pub id: LoadId,
    pub load_number: u64,
    pub customer_name: String,
    pub scheduled_time: Option<ScheduledTime>,
    pub status: LoadStatus,
    pub created_for_date: Date,
    pub shipped_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Load {
    #[must_use]
    pub fn from_new(id: LoadId, input: &NewLoad, now: Timestamp) -> Self {
        Self {
            id,
            load_number: input.load_number,
            customer_name: input.customer_name.trim().to_string(),
            scheduled_time: input.scheduled_time,
            status: LoadStatus::Missing,
            created_for_date: input.created_for_date,
            shipped_at: None,
            created_at: now,
            updated_at: None,
        }
    }

    #[must_use]
    pub const fn is_shipped(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move into SHIPPED, stamping `shipped_at` once.
    pub const fn mark_shipped(&mut self, now: Timestamp) {
        self.status = LoadStatus::Shipped;
        if self.shipped_at.is_none() {
            self.shipped_at = Some(now);
        }
    }

    /// Last four digits of the load number, as printed on dock cards.
    #[must_use]
    pub fn last4(&self) -> String {
        let digits = self.load_number.to_string();
        let start = digits.len().saturating_sub(4);

        digits[start..].to_string()
    }
}

///
/// NewLoad
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewLoad {
    pub load_number: u64,
    pub customer_name: String,

    #[serde(default)]
    pub scheduled_time: Option<ScheduledTime>,

    pub created_for_date: Date,

    /// Coils to assign on creation; scrap or unknown coils are skipped.
    #[serde(default)]
    pub coil_ids: Vec<CoilId>,
}

impl NewLoad {
    #[must_use]
    pub fn new(load_number: u64, customer_name: impl Into<String>, created_for_date: Date) -> Self {
        Self {
            load_number,
            customer_name: customer_name.into(),
            scheduled_time: None,
            created_for_date,
            coil_ids: Vec::new(),
        }
    }

    #[must_use]
    pub const fn scheduled_at(mut self, time: ScheduledTime) -> Self {
        self.scheduled_time = Some(time);
        self
    }

    #[must_use]
    pub fn coils<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CoilId>,
    {
        self.coil_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

///
/// LoadPatch
///
/// Partial load update. `coil_ids`, when present, replaces the whole
/// assignment set.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct LoadPatch {
    pub customer_name: Option<String>,
    pub scheduled_time: Option<ScheduledTime>,
    pub status: Option<LoadStatus>,
    pub coil_ids: Option<Vec<CoilId>>,
}

impl LoadPatch {
    #[must_use]
    pub const fn status(mut self, status: LoadStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn coils<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CoilId>,
    {
        self.coil_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

///
/// LoadView
///
/// A load as read back: stored fields with the derived status applied,
/// plus its current coils.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LoadView {
    #[serde(flatten)]
    pub load: Load,
    pub coils: Vec<Coil>,
    pub ready_fraction: String,
    pub status_dot: StatusDot,
}

impl LoadView {
    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.load.status
    }

    #[must_use]
    pub const fn id(&self) -> LoadId {
        self.load.id
    }
}
