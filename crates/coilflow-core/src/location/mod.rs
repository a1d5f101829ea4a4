//! Location codes: translation between a coil's textual location and its
//! structured (section, column, row) coordinate, plus the registry of
//! special non-grid slots.

mod special;


pub use special::{SpecialLocation, SpecialLocations};

use serde::{Deserialize, Serialize};
use std::{fmt, ops::RangeInclusive};

/// Valid warehouse sections.
pub const SECTIONS: RangeInclusive<u32> = 1..=4;

/// Valid column numbers inside a section.
pub const COLUMNS: RangeInclusive<u32> = 1..=99;

/// Valid row numbers inside a column.
pub const ROWS: RangeInclusive<u32> = 1..=6;

// Codes shorter than this never carry a full coordinate.
const MIN_CODE_LEN: usize = 3;

///
/// Coordinate
///
/// Structured storage address. Values straight out of [`parse`] may be out
/// of range; only [`validate`]d coordinates are ever stored on a coil.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Coordinate {
    pub section: u32,
    pub column: u32,
    pub row: u32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(section: u32, column: u32, row: u32) -> Self {
        Self {
            section,
            column,
            row,
        }
    }

    /// Build a coordinate only if every component is in range.
    #[must_use]
    pub fn new_checked(section: u32, column: u32, row: u32) -> Option<Self> {
        let coordinate = Self::new(section, column, row);
        validate(&coordinate).then_some(coordinate)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate(self)
    }

    /// Canonical location label for this coordinate.
    #[must_use]
    pub fn label(&self) -> String {
        format(self.section, self.column, self.row)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parse a location code into a coordinate without range checks.
///
/// The first digit is the section. A 3-character code carries one digit
/// each for column and row; anything longer takes two digits of column and
/// the remaining digits as the row. Any non-digit fails the whole parse.
#[must_use]
pub fn parse(text: &str) -> Option<Coordinate> {
    let code = text.trim();
    if code.len() < MIN_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match code.len() {
        3 => Some(Coordinate::new(
            digits(&code[0..1])?,
            digits(&code[1..2])?,
            digits(&code[2..3])?,
        )),
        _ => Some(Coordinate::new(
            digits(&code[0..1])?,
            digits(&code[1..3])?,
            digits(&code[3..])?,
        )),
    }
}

// Only called on ASCII digit slices; fails on overflow or an empty slice.
fn digits(slice: &str) -> Option<u32> {
    slice.parse().ok()
}

/// Check a coordinate against the warehouse bounds.
#[must_use]
pub fn validate(coordinate: &Coordinate) -> bool {
    SECTIONS.contains(&coordinate.section)
        && COLUMNS.contains(&coordinate.column)
        && ROWS.contains(&coordinate.row)
}

/// Parse then validate; `None` if either step fails.
#[must_use]
pub fn parse_and_validate(text: &str) -> Option<Coordinate> {
    parse(text).filter(validate)
}

/// Whether a section number names a real warehouse section.
#[must_use]
pub fn is_valid_section(section: u32) -> bool {
    SECTIONS.contains(&section)
}

/// Canonical location label, e.g. `(3, 1, 4)` → `"30104"`.
///
/// Column and row are zero-padded to two digits, so single-digit columns
/// produce the historical `{section}0{column}0{row}` form and wider columns
/// still parse back to the same coordinate.
#[must_use]
pub fn format(section: u32, column: u32, row: u32) -> String {
    format!("{section}{column:02}{row:02}")
}

///
/// ResolvedLocation
///
/// Outcome of reading a location code as a coil would store it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolvedLocation {
    /// Text to store as the coil's location.
    pub text: String,

    /// Structured coordinate, absent for special or unreadable codes.
    pub coordinate: Option<Coordinate>,

    pub special: bool,
}

///
/// LocationCodec
///
/// Registry-aware front end over the pure codec functions.
///

#[derive(Clone, Debug, Default)]
pub struct LocationCodec {
    specials: SpecialLocations,
}

impl LocationCodec {
    #[must_use]
    pub const fn new(specials: SpecialLocations) -> Self {
        Self { specials }
    }

    #[must_use]
    pub const fn specials(&self) -> &SpecialLocations {
        &self.specials
    }

    #[must_use]
    pub fn is_special(&self, text: &str) -> bool {
        self.specials.lookup(text).is_some()
    }

    /// Resolve a location code for storage.
    ///
    /// Special slots win over coordinate parsing and are stored uppercased.
    /// Unreadable or out-of-range codes keep their (trimmed) text with no
    /// coordinate.
    #[must_use]
    pub fn resolve(&self, text: &str) -> ResolvedLocation {
        let trimmed = text.trim();

        if self.is_special(trimmed) {
            return ResolvedLocation {
                text: trimmed.to_uppercase(),
                coordinate: None,
                special: true,
            };
        }

        ResolvedLocation {
            text: trimmed.to_string(),
            coordinate: parse_and_validate(trimmed),
            special: false,
        }
    }
}
