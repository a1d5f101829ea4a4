use crate::grid::{GridCell, SectionGrid};
use serde::{Deserialize, Serialize};

///
/// FloorPlan
///
/// Presentation view of a section as seen from the aisle: visual rows run
/// from the highest storage row down to row 1, and visual columns from the
/// highest column down to column 1. Visual `(0, 0)` is therefore storage
/// `(row = rows, column = columns)` and the last visual cell is `(1, 1)`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FloorPlan {
    pub section: u32,
    pub rows: Vec<Vec<GridCell>>,
    pub specials: Vec<GridCell>,
}

impl FloorPlan {
    pub(crate) fn from_grid(grid: &SectionGrid) -> Self {
        let layout = grid.layout;

        let rows = (1..=layout.rows)
            .rev()
            .map(|row| {
                (1..=layout.columns)
                    .rev()
                    .filter_map(|column| grid.cell(column, row).cloned())
                    .collect()
            })
            .collect();

        Self {
            section: grid.section,
            rows,
            specials: grid.special_slots().cloned().collect(),
        }
    }

    /// Cell at a visual position, if any.
    #[must_use]
    pub fn at(&self, visual_row: usize, visual_column: usize) -> Option<&GridCell> {
        self.rows.get(visual_row)?.get(visual_column)
    }

    /// Visual cells in reading order (top-left first).
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flatten()
    }
}
