use crate::{
    db::{
        session::{ValidationError, YardSession},
        store::{CoilStore, LoadStore},
    },
    error::InternalError,
    stats::{Dashboard, GroupBy, Summary},
    types::Date,
};

impl<C: CoilStore, L: LoadStore> YardSession<C, L> {
    /// Dispatch board for loads created for `date`.
    #[must_use]
    pub fn dashboard(&self, date: Date) -> Dashboard {
        let loads: Vec<_> = self
            .loads_on(date)
            .into_iter()
            .map(|load| (load, self.coils_on(load.id)))
            .collect();

        Dashboard::build(&self.engine, date, &loads)
    }

    #[must_use]
    pub fn dashboard_today(&self) -> Dashboard {
        self.dashboard(self.today())
    }

    /// Totals between `from` and `to` inclusive, grouped into periods.
    pub fn summary(&self, from: Date, to: Date, group_by: GroupBy) -> Result<Summary, InternalError> {
        if from > to {
            return Err(ValidationError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into());
        }

        Ok(Summary::build(
            from,
            to,
            group_by,
            self.loads.iter(),
            self.coils.iter(),
        ))
    }
}
