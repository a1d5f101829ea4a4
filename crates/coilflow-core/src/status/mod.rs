//! Load readiness: derives a load's status from the coils assigned to it,
//! plus the per-load and per-day figures shown on the dispatch dashboard.

#[cfg(test)]
mod tests;

use crate::location::Coordinate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

/// Section whose coils count as staged at the dock.
pub const DOCK_SECTION: u32 = 3;

///
/// StatusParseError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("unknown {kind} status '{value}'")]
pub struct StatusParseError {
    pub kind: &'static str,
    pub value: String,
}

///
/// CoilStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoilStatus {
    #[default]
    Wip,
    Rts,
    Scrap,
    OnHold,
    Rework,
}

impl CoilStatus {
    pub const ALL: [Self; 5] = [Self::Wip, Self::Rts, Self::Scrap, Self::OnHold, Self::Rework];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wip => "WIP",
            Self::Rts => "RTS",
            Self::Scrap => "SCRAP",
            Self::OnHold => "ONHOLD",
            Self::Rework => "REWORK",
        }
    }
}

impl fmt::Display for CoilStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoilStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| StatusParseError {
                kind: "coil",
                value: s.to_string(),
            })
    }
}

///
/// LoadStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadStatus {
    Ready,
    #[default]
    Missing,
    Shipped,
}

impl LoadStatus {
    pub const ALL: [Self; 3] = [Self::Ready, Self::Missing, Self::Shipped];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Missing => "MISSING",
            Self::Shipped => "SHIPPED",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Shipped)
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| StatusParseError {
                kind: "load",
                value: s.to_string(),
            })
    }
}

///
/// StatusDot
///
/// Tri-state readiness indicator for a load card.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusDot {
    Green,
    Red,
    Grey,
}

///
/// CoilState
///
/// The slice of a coil the status engine reads.
///

pub trait CoilState {
    fn status(&self) -> CoilStatus;

    fn coordinate(&self) -> Option<Coordinate>;

    fn section(&self) -> Option<u32> {
        self.coordinate().map(|c| c.section)
    }
}

impl<T: CoilState + ?Sized> CoilState for &T {
    fn status(&self) -> CoilStatus {
        (**self).status()
    }

    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }
}

///
/// StatusEngine
///
/// Pure derivation of load status. Holds only the dock section, which is
/// where a coil has to sit to count as ready.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusEngine {
    dock_section: u32,
}

impl StatusEngine {
    #[must_use]
    pub const fn new(dock_section: u32) -> Self {
        Self { dock_section }
    }

    #[must_use]
    pub const fn dock_section(&self) -> u32 {
        self.dock_section
    }

    /// A coil is staged when it is RTS and sits in the dock section.
    #[must_use]
    pub fn is_staged<C: CoilState>(&self, coil: &C) -> bool {
        coil.status() == CoilStatus::Rts && coil.section() == Some(self.dock_section)
    }

    /// Every coil is staged. Vacuously true for an empty load.
    #[must_use]
    pub fn all_staged<C: CoilState>(&self, coils: &[C]) -> bool {
        coils.iter().all(|coil| self.is_staged(coil))
    }

    /// Derive a load's status from its stored status and coil set.
    ///
    /// SHIPPED is sticky: recomputation never moves a load out of it. A load
    /// with no coils is MISSING.
    #[must_use]
    pub fn derive<C: CoilState>(&self, stored: LoadStatus, coils: &[C]) -> LoadStatus {
        if stored.is_terminal() {
            LoadStatus::Shipped
        } else if !coils.is_empty() && self.all_staged(coils) {
            LoadStatus::Ready
        } else {
            LoadStatus::Missing
        }
    }

    /// Grey once shipped, green when every coil is staged, red otherwise.
    ///
    /// Unlike [`Self::derive`], an empty load shows green.
    #[must_use]
    pub fn status_dot<C: CoilState>(&self, stored: LoadStatus, coils: &[C]) -> StatusDot {
        if stored.is_terminal() {
            StatusDot::Grey
        } else if self.all_staged(coils) {
            StatusDot::Green
        } else {
            StatusDot::Red
        }
    }

    /// Tally dashboard counts over `(stored status, coils)` pairs.
    #[must_use]
    pub fn quick_counts<'a, C, I>(&self, loads: I) -> QuickCounts
    where
        C: CoilState + 'a,
        I: IntoIterator<Item = (LoadStatus, &'a [C])>,
    {
        let mut counts = QuickCounts::default();

        for (stored, coils) in loads {
            let staged = self.all_staged(coils);

            counts.total_loads += 1;
            if staged {
                counts.ready_loads += 1;
            }
            if !stored.is_terminal() && !staged {
                counts.missing_loads += 1;
            }
        }

        counts
    }
}

impl Default for StatusEngine {
    fn default() -> Self {
        Self::new(DOCK_SECTION)
    }
}

/// Number of coils with status RTS, wherever they sit.
#[must_use]
pub fn ready_count<C: CoilState>(coils: &[C]) -> usize {
    coils
        .iter()
        .filter(|coil| coil.status() == CoilStatus::Rts)
        .count()
}

/// `"{ready}/{total}"`, or `"0/0"` for an empty load.
#[must_use]
pub fn ready_fraction<C: CoilState>(coils: &[C]) -> String {
    format!("{}/{}", ready_count(coils), coils.len())
}

///
/// QuickCounts
///
/// Per-day load totals for the dashboard header.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickCounts {
    pub total_loads: usize,
    pub ready_loads: usize,
    pub missing_loads: usize,
}
