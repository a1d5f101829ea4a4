//! Yard configuration: special slots, grid layout, the dock section and
//! section metadata, loaded from TOML.


use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    grid::{GridAssembler, GridLayout},
    location::{self, COLUMNS, LocationCodec, ROWS, SpecialLocations},
    status::{DOCK_SECTION, StatusEngine},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("dock section {section} is not a warehouse section")]
    DockSection { section: u32 },

    #[error("special location '{name}' is declared more than once")]
    DuplicateSpecial { name: String },

    #[error("special location label must not be empty")]
    EmptySpecial,

    #[error("grid layout {columns}x{rows} exceeds the coordinate bounds")]
    Layout { columns: u32, rows: u32 },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("section {section} is not a warehouse section")]
    Section { section: u32 },
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Validation, ErrorOrigin::Config, err.to_string())
    }
}

///
/// SectionMeta
///
/// Display metadata for one warehouse section.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SectionMeta {
    pub number: u32,
    pub name: String,

    #[serde(default)]
    pub position_x: Option<i32>,

    #[serde(default)]
    pub position_y: Option<i32>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl SectionMeta {
    #[must_use]
    pub fn new(number: u32, name: impl Into<String>, position: (i32, i32), notes: &str) -> Self {
        Self {
            number,
            name: name.into(),
            position_x: Some(position.0),
            position_y: Some(position.1),
            notes: Some(notes.to_string()),
        }
    }

    /// The four standard sections; section 3 is the shipping dock.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(1, "Section 1", (0, 0), "Top-left"),
            Self::new(2, "Section 2", (1, 0), "Top-right"),
            Self::new(3, "Section 3 (Dock)", (1, 1), "Bottom-right - Shipping dock"),
            Self::new(4, "Section 4", (0, 1), "Bottom-left"),
        ]
    }
}

///
/// YardConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct YardConfig {
    pub special_locations: SpecialLocations,
    pub layout: GridLayout,
    pub dock_section: u32,
    pub sections: Vec<SectionMeta>,
}

impl YardConfig {
    /// Parse and validate a TOML document. Missing tables take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(s)?;
        config.special_locations.normalize_all();
        config.sections.sort_by_key(|meta| meta.number);
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_toml_str(&contents)
    }

    /// Check the configuration against the coordinate rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !location::is_valid_section(self.dock_section) {
            return Err(ConfigError::DockSection {
                section: self.dock_section,
            });
        }

        let GridLayout { columns, rows } = self.layout;
        if !COLUMNS.contains(&columns) || !ROWS.contains(&rows) {
            return Err(ConfigError::Layout { columns, rows });
        }

        if let Some(meta) = self
            .sections
            .iter()
            .find(|meta| !location::is_valid_section(meta.number))
        {
            return Err(ConfigError::Section {
                section: meta.number,
            });
        }

        let mut seen = BTreeSet::new();
        for slot in self.special_locations.iter() {
            for name in slot.names() {
                if name.is_empty() {
                    return Err(ConfigError::EmptySpecial);
                }
                if !seen.insert(name) {
                    return Err(ConfigError::DuplicateSpecial {
                        name: name.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn section(&self, number: u32) -> Option<&SectionMeta> {
        self.sections.iter().find(|meta| meta.number == number)
    }

    #[must_use]
    pub fn codec(&self) -> LocationCodec {
        LocationCodec::new(self.special_locations.clone())
    }

    #[must_use]
    pub const fn status_engine(&self) -> StatusEngine {
        StatusEngine::new(self.dock_section)
    }

    #[must_use]
    pub fn assembler(&self) -> GridAssembler {
        GridAssembler::new(
            self.layout,
            self.dock_section,
            self.special_locations.clone(),
        )
    }
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            special_locations: SpecialLocations::canonical(),
            layout: GridLayout::default(),
            dock_section: DOCK_SECTION,
            sections: SectionMeta::defaults(),
        }
    }
}
