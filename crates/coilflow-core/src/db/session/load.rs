use crate::{
    db::{
        session::{AssignError, LoadUpdateError, ValidationError, YardSession},
        store::{CoilStore, LoadStore},
    },
    error::InternalError,
    model::{Load, LoadPatch, LoadView, NewLoad},
    obs::sink::{MetricsEvent, RejectKind},
    status::{CoilStatus, LoadStatus},
    types::{CoilId, Date, LoadId},
};

impl<C: CoilStore, L: LoadStore> YardSession<C, L> {
    /// Create a load and attach any listed coils.
    ///
    /// Unknown or SCRAP coils in `coil_ids` are skipped with a warning
    /// rather than failing the whole load.
    pub fn create_load(&mut self, input: NewLoad) -> Result<LoadView, InternalError> {
        if input.customer_name.trim().is_empty() {
            return Err(ValidationError::EmptyCustomer.into());
        }

        let id = self.loads.next_id()?;
        let load = Load::from_new(id, &input, self.now());
        self.loads.put(load);

        let attached = self.attach(id, &input.coil_ids);
        self.debug_log(format!(
            "load created: {id} number={} coils={attached}/{}",
            input.load_number,
            input.coil_ids.len()
        ));
        self.record(MetricsEvent::LoadCreated);

        self.load(id)
    }

    /// A load with its derived status and current coils.
    pub fn load(&self, id: LoadId) -> Result<LoadView, InternalError> {
        let load = self.loads.try_get(id)?;

        Ok(self.view(load))
    }

    /// Loads created for `date`, by scheduled time; unscheduled loads last.
    #[must_use]
    pub fn loads_for(&self, date: Date) -> Vec<LoadView> {
        self.loads_on(date)
            .into_iter()
            .map(|load| self.view(load))
            .collect()
    }

    #[must_use]
    pub fn loads_today(&self) -> Vec<LoadView> {
        self.loads_for(self.today())
    }

    #[must_use]
    pub fn loads_tomorrow(&self) -> Vec<LoadView> {
        self.loads_for(self.today().add_days(1))
    }

    /// Apply a partial update.
    ///
    /// `coil_ids` replaces the whole coil set, with the same skipping rules
    /// as [`Self::create_load`]. A shipped load accepts only field edits.
    pub fn update_load(&mut self, id: LoadId, patch: LoadPatch) -> Result<LoadView, InternalError> {
        let shipped = self.loads.try_get(id)?.is_shipped();

        if shipped {
            if let Some(requested) = patch.status.filter(|s| !s.is_terminal()) {
                return Err(LoadUpdateError::LeaveShipped {
                    load_id: id,
                    requested,
                }
                .into());
            }
            if patch.coil_ids.is_some() {
                self.record(MetricsEvent::AssignRejected {
                    reason: RejectKind::Shipped,
                });
                return Err(AssignError::ShippedLoad { load_id: id }.into());
            }
        }
        if patch
            .customer_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ValidationError::EmptyCustomer.into());
        }

        if let Some(ids) = patch.coil_ids.as_deref() {
            self.release(id);
            self.attach(id, ids);
        }

        let now = self.now();
        let load = self.loads.try_get_mut(id)?;
        if let Some(name) = patch.customer_name {
            load.customer_name = name.trim().to_string();
        }
        if let Some(time) = patch.scheduled_time {
            load.scheduled_time = Some(time);
        }
        let ships = patch.status == Some(LoadStatus::Shipped) && !shipped;
        if ships {
            load.mark_shipped(now);
        }
        load.updated_at = Some(now);

        self.debug_log(format!("load updated: {id} shipped={}", shipped || ships));
        self.record(MetricsEvent::LoadUpdated);
        if ships {
            self.record(MetricsEvent::LoadShipped);
        }

        self.load(id)
    }

    /// Put a coil on a load, moving it off any other open load.
    pub fn assign_coil(&mut self, load_id: LoadId, coil_id: &CoilId) -> Result<LoadView, InternalError> {
        self.check_open(load_id)?;
        self.check_movable(coil_id)?;

        let coil = self.coils.try_get(coil_id)?;
        if coil.status == CoilStatus::Scrap {
            self.record(MetricsEvent::AssignRejected {
                reason: RejectKind::Scrap,
            });
            return Err(AssignError::ScrapCoil {
                coil_id: coil_id.clone(),
            }
            .into());
        }
        let previous = coil.load_id();

        let now = self.now();
        let coil = self.coils.try_get_mut(coil_id)?;
        coil.set_load(Some(load_id));
        coil.updated_at = Some(now);

        match previous {
            Some(prev) if prev != load_id => {
                self.debug_log(format!("coil {coil_id} moved from load {prev} to {load_id}"));
            }
            _ => self.debug_log(format!("coil {coil_id} assigned to load {load_id}")),
        }
        self.record(MetricsEvent::CoilAssigned);

        self.load(load_id)
    }

    /// Take a coil off a load. The coil must currently be on that load.
    pub fn unassign_coil(
        &mut self,
        load_id: LoadId,
        coil_id: &CoilId,
    ) -> Result<LoadView, InternalError> {
        self.check_open(load_id)?;

        if self.coils.try_get(coil_id)?.load_id() != Some(load_id) {
            self.record(MetricsEvent::AssignRejected {
                reason: RejectKind::NotOnLoad,
            });
            return Err(AssignError::NotOnLoad {
                coil_id: coil_id.clone(),
                load_id,
            }
            .into());
        }

        let now = self.now();
        let coil = self.coils.try_get_mut(coil_id)?;
        coil.set_load(None);
        coil.updated_at = Some(now);

        self.debug_log(format!("coil {coil_id} unassigned from load {load_id}"));
        self.record(MetricsEvent::CoilUnassigned);

        self.load(load_id)
    }

    /// Delete a load after releasing every coil on it.
    pub fn remove_load(&mut self, id: LoadId) -> Result<Load, InternalError> {
        let load = self.loads.try_get(id)?.clone();

        let released = self.release(id);
        self.loads.remove(id);

        self.debug_log(format!("load removed: {id} released={released}"));
        self.record(MetricsEvent::LoadRemoved);

        Ok(load)
    }

    pub(super) fn today(&self) -> Date {
        self.now().date()
    }

    // Loads created for `date` in board order.
    pub(super) fn loads_on(&self, date: Date) -> Vec<&Load> {
        let mut loads: Vec<&Load> = self
            .loads
            .iter()
            .filter(|load| load.created_for_date == date)
            .collect();
        loads.sort_by_key(|load| {
            (
                load.scheduled_time.is_none(),
                load.scheduled_time,
                load.load_number,
            )
        });

        loads
    }

    // Shipped loads have a frozen coil set.
    fn check_open(&self, load_id: LoadId) -> Result<(), InternalError> {
        if self.loads.try_get(load_id)?.is_shipped() {
            self.record(MetricsEvent::AssignRejected {
                reason: RejectKind::Shipped,
            });
            return Err(AssignError::ShippedLoad { load_id }.into());
        }

        Ok(())
    }

    // A coil on a shipped load stays there.
    pub(super) fn check_movable(&self, coil_id: &CoilId) -> Result<(), InternalError> {
        let coil = self.coils.try_get(coil_id)?;

        if let Some(load_id) = coil.load_id().filter(|&id| self.is_shipped(id)) {
            self.record(MetricsEvent::AssignRejected {
                reason: RejectKind::Shipped,
            });
            return Err(AssignError::OnShippedLoad {
                coil_id: coil_id.clone(),
                load_id,
            }
            .into());
        }

        Ok(())
    }

    fn is_shipped(&self, load_id: LoadId) -> bool {
        self.loads.get(load_id).is_some_and(Load::is_shipped)
    }

    // Attach coils by id, skipping unknown, SCRAP and already-shipped coils.
    fn attach(&mut self, load: LoadId, ids: &[CoilId]) -> usize {
        let mut attached = 0;

        for id in ids {
            let skip = match self.coils.get(id) {
                None => Some("unknown"),
                Some(coil) if coil.status == CoilStatus::Scrap => Some("scrap"),
                Some(coil) if coil.load_id() == Some(load) => continue,
                Some(coil) if coil.load_id().is_some_and(|held| self.is_shipped(held)) => {
                    Some("shipped")
                }
                Some(_) => None,
            };

            if let Some(reason) = skip {
                Self::warn_log(format!("skipping {reason} coil {id} for load {load}"));
                self.record(MetricsEvent::CoilSkipped);
                continue;
            }

            if let Some(coil) = self.coils.get_mut(id) {
                coil.set_load(Some(load));
                attached += 1;
                self.record(MetricsEvent::CoilAssigned);
            }
        }

        attached
    }

    // Clear every coil reference to `load`.
    fn release(&mut self, load: LoadId) -> usize {
        let mut released = 0;

        for coil in self.coils.iter_mut().filter(|c| c.load_id() == Some(load)) {
            coil.set_load(None);
            released += 1;
        }
        for _ in 0..released {
            self.record(MetricsEvent::CoilUnassigned);
        }

        released
    }
}
