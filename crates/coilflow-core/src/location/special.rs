use serde::{Deserialize, Serialize};

///
/// SpecialLocation
///
/// A named staging area outside the section grid. Aliases resolve to the
/// same slot when the floor plan is assembled.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SpecialLocation {
    pub label: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    /// Render the slot on the floor plan even when it holds no coils.
    #[serde(default)]
    pub always_render: bool,
}

impl SpecialLocation {
    #[must_use]
    pub fn new(label: impl AsRef<str>, always_render: bool) -> Self {
        Self {
            label: normalize(label.as_ref()),
            aliases: Vec::new(),
            always_render,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl AsRef<str>) -> Self {
        self.aliases.push(normalize(alias.as_ref()));
        self
    }

    /// Whether a location text names this slot, by label or alias.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let key = normalize(text);

        self.label == key || self.aliases.iter().any(|alias| *alias == key)
    }

    /// Every spelling that resolves to this slot, label first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

///
/// SpecialLocations
///
/// Ordered registry of special slots; order is floor-plan order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpecialLocations(Vec<SpecialLocation>);

impl SpecialLocations {
    #[must_use]
    pub const fn new(entries: Vec<SpecialLocation>) -> Self {
        Self(entries)
    }

    /// The dock's standard slots: `S3`, line `126`, and the truck bay
    /// (which also answers to `TRUCK RESERVING AREA`).
    #[must_use]
    pub fn canonical() -> Self {
        Self(vec![
            SpecialLocation::new("S3", true),
            SpecialLocation::new("126", true),
            SpecialLocation::new("TRUCK", true).with_alias("TRUCK RESERVING AREA"),
        ])
    }

    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<&SpecialLocation> {
        self.0.iter().find(|slot| slot.matches(text))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialLocation> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalize every label and alias in place.
    pub(crate) fn normalize_all(&mut self) {
        for slot in &mut self.0 {
            slot.label = normalize(&slot.label);
            for alias in &mut slot.aliases {
                *alias = normalize(alias);
            }
        }
    }
}

impl Default for SpecialLocations {
    fn default() -> Self {
        Self::canonical()
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_uppercase()
}
