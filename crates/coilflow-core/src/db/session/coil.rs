use crate::{
    db::{
        StoreError,
        session::{AssignError, ValidationError, YardSession},
        store::{CoilStore, LoadStore},
    },
    error::InternalError,
    model::{Coil, CoilFilter, CoilPatch, NewCoil},
    obs::sink::MetricsEvent,
    status::CoilStatus,
    types::{CoilId, Date},
};

impl<C: CoilStore, L: LoadStore> YardSession<C, L> {
    /// Create a coil. The id is normalized to uppercase and must be unique.
    pub fn create_coil(&mut self, input: NewCoil) -> Result<Coil, InternalError> {
        if input.coil_id.is_empty() {
            return Err(ValidationError::EmptyCoilId.into());
        }
        check_dimensions(Some(input.width), Some(input.weight))?;

        let coil = Coil::from_new(input, &self.codec, self.now());
        self.coils.insert(coil.clone())?;

        self.debug_log(format!(
            "coil created: {} location={:?} coordinate={:?}",
            coil.coil_id, coil.location, coil.coordinate
        ));
        self.record(MetricsEvent::CoilCreated);

        Ok(coil)
    }

    /// Apply a partial update. A new location is re-resolved; scrapping an
    /// assigned coil is refused so a load never holds SCRAP.
    pub fn update_coil(&mut self, id: &CoilId, patch: CoilPatch) -> Result<Coil, InternalError> {
        check_dimensions(patch.width, patch.weight)?;

        let now = self.now();
        let coil = self.coils.try_get_mut(id)?;

        if patch.status == Some(CoilStatus::Scrap)
            && let Some(load_id) = coil.load_id()
        {
            return Err(AssignError::AssignedScrap {
                coil_id: coil.coil_id.clone(),
                load_id,
            }
            .into());
        }

        if let Some(width) = patch.width {
            coil.width = width;
        }
        if let Some(weight) = patch.weight {
            coil.weight = weight;
        }
        if let Some(status) = patch.status {
            coil.status = status;
        }
        if let Some(location) = patch.location.as_deref() {
            coil.relocate(&self.codec, location);
        }
        if let Some(date) = patch.scheduled_for_date {
            coil.scheduled_for_date = Some(date);
        }
        coil.updated_at = Some(now);

        let coil = coil.clone();
        self.debug_log(format!("coil updated: {} status={}", coil.coil_id, coil.status));
        self.record(MetricsEvent::CoilUpdated);

        Ok(coil)
    }

    pub fn coil(&self, id: &CoilId) -> Result<&Coil, InternalError> {
        Ok(self.coils.try_get(id)?)
    }

    /// Coils matching every set field of `filter`, in coil-id order.
    #[must_use]
    pub fn find_coils(&self, filter: &CoilFilter) -> Vec<&Coil> {
        self.coils.iter().filter(|coil| filter.matches(coil)).collect()
    }

    /// Coils scheduled for `date` that are not on any load.
    #[must_use]
    pub fn unassigned_coils(&self, date: Date) -> Vec<&Coil> {
        self.coils
            .iter()
            .filter(|coil| coil.scheduled_for_date == Some(date) && !coil.is_assigned())
            .collect()
    }

    /// Delete a coil. An open load simply loses it; a coil on a shipped
    /// load cannot be deleted.
    pub fn remove_coil(&mut self, id: &CoilId) -> Result<Coil, InternalError> {
        self.check_movable(id)?;

        let coil = self.coils.remove(id).ok_or_else(|| {
            InternalError::from(StoreError::CoilNotFound {
                coil_id: id.clone(),
            })
        })?;

        self.debug_log(format!("coil removed: {}", coil.coil_id));
        self.record(MetricsEvent::CoilRemoved);

        Ok(coil)
    }
}

fn check_dimensions(width: Option<u32>, weight: Option<u32>) -> Result<(), ValidationError> {
    if width == Some(0) {
        return Err(ValidationError::NonPositiveWidth);
    }
    if weight == Some(0) {
        return Err(ValidationError::NonPositiveWeight);
    }

    Ok(())
}
