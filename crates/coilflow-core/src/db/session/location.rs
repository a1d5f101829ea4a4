use crate::{
    config::SectionMeta,
    db::{
        session::{ValidationError, YardSession},
        store::{CoilStore, LoadStore},
    },
    error::InternalError,
    grid::{FloorPlan, GridLayout, SectionGrid},
    location,
    model::Coil,
    obs::sink::MetricsEvent,
};
use serde::{Deserialize, Serialize};

///
/// SectionsView
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SectionsView {
    pub sections: Vec<SectionMeta>,
    pub layout: GridLayout,
}

impl<C: CoilStore, L: LoadStore> YardSession<C, L> {
    /// Section metadata in section order, plus the shared grid layout.
    #[must_use]
    pub fn sections(&self) -> SectionsView {
        SectionsView {
            sections: self.config.sections.clone(),
            layout: self.config.layout,
        }
    }

    /// Storage-order grid for one section.
    pub fn section_grid(&self, section: u32) -> Result<SectionGrid, InternalError> {
        if !location::is_valid_section(section) {
            return Err(ValidationError::InvalidSection { section }.into());
        }

        let coils: Vec<&Coil> = self.coils.iter().collect();
        let grid = self.assembler.assemble(section, &coils);

        self.debug_log(format!(
            "grid assembled: section={section} cells={} coils={}",
            grid.grid.len(),
            grid.coil_count()
        ));
        self.record(MetricsEvent::GridAssembled {
            section,
            coils: grid.coil_count() as u64,
        });

        Ok(grid)
    }

    /// Floor-plan view of one section, both axes reversed.
    pub fn section_floor_plan(&self, section: u32) -> Result<FloorPlan, InternalError> {
        Ok(self.section_grid(section)?.floor_plan())
    }
}
