//! Dispatch dashboard cards and date-range summaries.

#[cfg(test)]
mod tests;

use crate::{
    model::{Coil, Load},
    status::{self, CoilStatus, LoadStatus, QuickCounts, StatusDot, StatusEngine},
    types::{Date, LoadId, ScheduledTime},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// LoadCard
///
/// One load as drawn on the dispatch board.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LoadCard {
    pub id: LoadId,
    pub last4: String,
    pub full_load_number: u64,
    pub customer_name: String,
    pub scheduled_time: Option<ScheduledTime>,
    pub total_coils: usize,
    pub ready_coils: usize,
    #[serde(rename = "readyFraction")]
    pub ready_fraction: String,
    #[serde(rename = "statusDot")]
    pub status_dot: StatusDot,
    pub status: LoadStatus,
    #[serde(rename = "isShipped")]
    pub is_shipped: bool,
}

impl LoadCard {
    #[must_use]
    pub fn build(engine: &StatusEngine, load: &Load, coils: &[&Coil]) -> Self {
        Self {
            id: load.id,
            last4: load.last4(),
            full_load_number: load.load_number,
            customer_name: load.customer_name.clone(),
            scheduled_time: load.scheduled_time,
            total_coils: coils.len(),
            ready_coils: status::ready_count(coils),
            ready_fraction: status::ready_fraction(coils),
            status_dot: engine.status_dot(load.status, coils),
            status: engine.derive(load.status, coils),
            is_shipped: load.is_shipped(),
        }
    }
}

///
/// Dashboard
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Dashboard {
    pub date: Date,
    pub loads: Vec<LoadCard>,
    pub quick_counts: QuickCounts,
}

impl Dashboard {
    /// Build the board for `date` from loads already in display order.
    #[must_use]
    pub fn build(engine: &StatusEngine, date: Date, loads: &[(&Load, Vec<&Coil>)]) -> Self {
        let cards = loads
            .iter()
            .map(|(load, coils)| LoadCard::build(engine, load, coils))
            .collect();
        let quick_counts =
            engine.quick_counts(loads.iter().map(|(load, coils)| (load.status, coils.as_slice())));

        Self {
            date,
            loads: cards,
            quick_counts,
        }
    }
}

///
/// GroupByParseError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("unknown summary grouping '{0}'")]
pub struct GroupByParseError(pub String);

///
/// GroupBy
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Week,
    Month,
    Year,
}

impl GroupBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Period key a date falls into: `YYYY-Www`, `YYYY-MM` or `YYYY`.
    #[must_use]
    pub fn period_key(self, date: Date) -> String {
        match self {
            Self::Week => {
                let (year, week) = date.iso_week();
                format!("{year:04}-W{week:02}")
            }
            Self::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Year => format!("{:04}", date.year()),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = GroupByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(GroupByParseError(s.to_string())),
        }
    }
}

///
/// Period
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Period {
    pub period: String,
    pub loads: usize,
    pub coils: usize,
    pub scrap: usize,
}

///
/// SummaryTotals
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SummaryTotals {
    pub total_coils: usize,
    pub trucks_shipped: usize,
    pub scrap_coils: usize,
    pub from: Date,
    pub to: Date,
    #[serde(rename = "groupBy")]
    pub group_by: GroupBy,
}

///
/// Summary
///
/// Totals over an inclusive date range. Loads count by their created-for
/// date; coils by the day they were created.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub summary: SummaryTotals,
    pub periods: Vec<Period>,
}

impl Summary {
    /// Build a summary. Inputs outside `from..=to` are ignored.
    #[must_use]
    pub fn build<'a>(
        from: Date,
        to: Date,
        group_by: GroupBy,
        loads: impl IntoIterator<Item = &'a Load>,
        coils: impl IntoIterator<Item = &'a Coil>,
    ) -> Self {
        let in_range = |date: Date| from <= date && date <= to;
        let mut periods: BTreeMap<String, Period> = BTreeMap::new();

        let mut trucks_shipped = 0;
        for load in loads.into_iter().filter(|l| in_range(l.created_for_date)) {
            period_slot(&mut periods, group_by, load.created_for_date).loads += 1;
            if load.status == LoadStatus::Shipped {
                trucks_shipped += 1;
            }
        }

        let mut total_coils = 0;
        let mut scrap_coils = 0;
        for coil in coils.into_iter().filter(|c| in_range(c.created_at.date())) {
            let period = period_slot(&mut periods, group_by, coil.created_at.date());
            period.coils += 1;
            total_coils += 1;
            if coil.status == CoilStatus::Scrap {
                period.scrap += 1;
                scrap_coils += 1;
            }
        }

        Self {
            summary: SummaryTotals {
                total_coils,
                trucks_shipped,
                scrap_coils,
                from,
                to,
                group_by,
            },
            periods: periods.into_values().collect(),
        }
    }
}

// Period bucket for `date`, created empty on first use.
fn period_slot(periods: &mut BTreeMap<String, Period>, group_by: GroupBy, date: Date) -> &mut Period {
    let key = group_by.period_key(date);

    periods.entry(key.clone()).or_insert_with(|| Period {
        period: key,
        ..Period::default()
    })
}
