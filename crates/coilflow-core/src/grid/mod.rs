//! Floor-plan assembly: projects a section's coils onto its column × row
//! grid and appends the dock's special staging slots.

mod floor_plan;


pub use floor_plan::FloorPlan;

use crate::{
    location::{self, SpecialLocations},
    status::{CoilState, CoilStatus, DOCK_SECTION},
    types::{CoilId, LoadId},
};
use serde::{Deserialize, Serialize};

///
/// PlacedCoil
///
/// The slice of a coil the grid reads: its state plus identity, raw
/// location text and load reference.
///

pub trait PlacedCoil: CoilState {
    fn coil_id(&self) -> &CoilId;

    fn location(&self) -> Option<&str>;

    fn load_id(&self) -> Option<LoadId>;
}

impl<T: PlacedCoil + ?Sized> PlacedCoil for &T {
    fn coil_id(&self) -> &CoilId {
        (**self).coil_id()
    }

    fn location(&self) -> Option<&str> {
        (**self).location()
    }

    fn load_id(&self) -> Option<LoadId> {
        (**self).load_id()
    }
}

///
/// GridLayout
///
/// Columns × rows drawn per section. Every section shares one layout.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 6,
        }
    }
}

///
/// CoilSummary
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CoilSummary {
    pub coil_id: CoilId,
    pub status: CoilStatus,
    pub load_id: Option<LoadId>,
}

impl CoilSummary {
    fn of<C: PlacedCoil>(coil: &C) -> Self {
        Self {
            coil_id: coil.coil_id().clone(),
            status: coil.status(),
            load_id: coil.load_id(),
        }
    }
}

///
/// GridCell
///
/// One floor-plan slot. Coordinate cells carry a column and row; special
/// slots carry neither and are keyed by their label.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GridCell {
    pub section: u32,
    pub column: Option<u32>,
    pub row: Option<u32>,
    pub location: String,
    pub coil_count: usize,
    pub coils: Vec<CoilSummary>,
}

impl GridCell {
    fn new(
        section: u32,
        column: Option<u32>,
        row: Option<u32>,
        location: String,
        coils: Vec<CoilSummary>,
    ) -> Self {
        Self {
            section,
            column,
            row,
            location,
            coil_count: coils.len(),
            coils,
        }
    }

    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.column.is_none() && self.row.is_none()
    }
}

///
/// SectionGrid
///
/// Storage-order view: rows ascending, columns ascending within a row,
/// then any special slots.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SectionGrid {
    pub section: u32,
    pub layout: GridLayout,
    pub grid: Vec<GridCell>,
}

impl SectionGrid {
    /// Coordinate cells only.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.grid.iter().filter(|cell| !cell.is_special())
    }

    /// Special slots only, in registry order.
    pub fn special_slots(&self) -> impl Iterator<Item = &GridCell> {
        self.grid.iter().filter(|cell| cell.is_special())
    }

    #[must_use]
    pub fn cell(&self, column: u32, row: u32) -> Option<&GridCell> {
        self.cells()
            .find(|cell| cell.column == Some(column) && cell.row == Some(row))
    }

    #[must_use]
    pub fn special_slot(&self, label: &str) -> Option<&GridCell> {
        self.special_slots()
            .find(|cell| cell.location.eq_ignore_ascii_case(label.trim()))
    }

    #[must_use]
    pub fn coil_count(&self) -> usize {
        self.grid.iter().map(|cell| cell.coil_count).sum()
    }

    /// Floor-plan view with both axes reversed.
    #[must_use]
    pub fn floor_plan(&self) -> FloorPlan {
        FloorPlan::from_grid(self)
    }
}

///
/// GridAssembler
///
/// Builds section grids. Does not check the section number; callers
/// validate it against the coordinate rules first.
///

#[derive(Clone, Debug)]
pub struct GridAssembler {
    layout: GridLayout,
    dock_section: u32,
    specials: SpecialLocations,
}

impl GridAssembler {
    #[must_use]
    pub const fn new(layout: GridLayout, dock_section: u32, specials: SpecialLocations) -> Self {
        Self {
            layout,
            dock_section,
            specials,
        }
    }

    #[must_use]
    pub const fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Assemble the storage-order grid for `section`.
    ///
    /// `coils` may hold coils from anywhere; grid cells take the coils whose
    /// coordinate falls in this section, and on the dock section the special
    /// slots take the coils whose raw location names them.
    #[must_use]
    pub fn assemble<C: PlacedCoil>(&self, section: u32, coils: &[C]) -> SectionGrid {
        let mut grid = Vec::with_capacity(self.cell_capacity());

        for row in 1..=self.layout.rows {
            for column in 1..=self.layout.columns {
                let summaries = coils
                    .iter()
                    .filter(|coil| {
                        coil.coordinate().is_some_and(|c| {
                            c.section == section && c.column == column && c.row == row
                        })
                    })
                    .map(CoilSummary::of)
                    .collect();

                grid.push(GridCell::new(
                    section,
                    Some(column),
                    Some(row),
                    location::format(section, column, row),
                    summaries,
                ));
            }
        }

        if section == self.dock_section {
            grid.extend(self.special_cells(section, coils));
        }

        SectionGrid {
            section,
            layout: self.layout,
            grid,
        }
    }

    fn special_cells<'a, C: PlacedCoil>(
        &'a self,
        section: u32,
        coils: &'a [C],
    ) -> impl Iterator<Item = GridCell> + 'a {
        self.specials.iter().filter_map(move |slot| {
            let summaries: Vec<_> = coils
                .iter()
                .filter(|coil| coil.location().is_some_and(|text| slot.matches(text)))
                .map(CoilSummary::of)
                .collect();

            (slot.always_render || !summaries.is_empty())
                .then(|| GridCell::new(section, None, None, slot.label.clone(), summaries))
        })
    }

    fn cell_capacity(&self) -> usize {
        let cells = self.layout.columns.saturating_mul(self.layout.rows);

        usize::try_from(cells).unwrap_or(0) + self.specials.len()
    }
}

impl Default for GridAssembler {
    fn default() -> Self {
        Self::new(GridLayout::default(), DOCK_SECTION, SpecialLocations::canonical())
    }
}
