use crate::{
    model::{Coil, Load},
    types::{CoilId, LoadId},
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;
use ulid::Generator;

///
/// StoreError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum StoreError {
    #[error("coil not found: {coil_id}")]
    CoilNotFound { coil_id: CoilId },

    #[error("coil already exists: {coil_id}")]
    DuplicateCoil { coil_id: CoilId },

    #[error("load id generator exhausted")]
    IdGenerator,

    #[error("load not found: {load_id}")]
    LoadNotFound { load_id: LoadId },
}

///
/// CoilStore
///
/// Coil records keyed by coil id. Iteration is in key order.
///

pub trait CoilStore {
    fn get(&self, id: &CoilId) -> Option<&Coil>;

    fn get_mut(&mut self, id: &CoilId) -> Option<&mut Coil>;

    /// Insert a new coil; an existing id is a conflict.
    fn insert(&mut self, coil: Coil) -> Result<(), StoreError>;

    fn remove(&mut self, id: &CoilId) -> Option<Coil>;

    fn iter(&self) -> impl Iterator<Item = &Coil>;

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Coil>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn try_get(&self, id: &CoilId) -> Result<&Coil, StoreError> {
        self.get(id).ok_or_else(|| StoreError::CoilNotFound {
            coil_id: id.clone(),
        })
    }

    fn try_get_mut(&mut self, id: &CoilId) -> Result<&mut Coil, StoreError> {
        self.get_mut(id).ok_or_else(|| StoreError::CoilNotFound {
            coil_id: id.clone(),
        })
    }
}

///
/// LoadStore
///
/// Load records keyed by ULID. Iteration is in key (creation) order.
///

pub trait LoadStore {
    /// Allocate a fresh, monotonically increasing load id.
    fn next_id(&mut self) -> Result<LoadId, StoreError>;

    fn get(&self, id: LoadId) -> Option<&Load>;

    fn get_mut(&mut self, id: LoadId) -> Option<&mut Load>;

    /// Insert or replace by id.
    fn put(&mut self, load: Load);

    fn remove(&mut self, id: LoadId) -> Option<Load>;

    fn iter(&self) -> impl Iterator<Item = &Load>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn try_get(&self, id: LoadId) -> Result<&Load, StoreError> {
        self.get(id)
            .ok_or(StoreError::LoadNotFound { load_id: id })
    }

    fn try_get_mut(&mut self, id: LoadId) -> Result<&mut Load, StoreError> {
        self.get_mut(id)
            .ok_or(StoreError::LoadNotFound { load_id: id })
    }
}

///
/// MemoryCoilStore
///

#[derive(Clone, Debug, Default)]
pub struct MemoryCoilStore {
    coils: BTreeMap<CoilId, Coil>,
}

impl MemoryCoilStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoilStore for MemoryCoilStore {
    fn get(&self, id: &CoilId) -> Option<&Coil> {
        self.coils.get(id)
    }

    fn get_mut(&mut self, id: &CoilId) -> Option<&mut Coil> {
        self.coils.get_mut(id)
    }

    fn insert(&mut self, coil: Coil) -> Result<(), StoreError> {
        if self.coils.contains_key(&coil.coil_id) {
            return Err(StoreError::DuplicateCoil {
                coil_id: coil.coil_id,
            });
        }
        self.coils.insert(coil.coil_id.clone(), coil);

        Ok(())
    }

    fn remove(&mut self, id: &CoilId) -> Option<Coil> {
        self.coils.remove(id)
    }

    fn iter(&self) -> impl Iterator<Item = &Coil> {
        self.coils.values()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Coil> {
        self.coils.values_mut()
    }

    fn len(&self) -> usize {
        self.coils.len()
    }
}

///
/// MemoryLoadStore
///

pub struct MemoryLoadStore {
    loads: BTreeMap<LoadId, Load>,
    ids: Generator,
}

impl MemoryLoadStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loads: BTreeMap::new(),
            ids: Generator::new(),
        }
    }
}

impl Default for MemoryLoadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadStore for MemoryLoadStore {
    fn next_id(&mut self) -> Result<LoadId, StoreError> {
        self.ids
            .generate()
            .map(LoadId::from_ulid)
            .map_err(|_| StoreError::IdGenerator)
    }

    fn get(&self, id: LoadId) -> Option<&Load> {
        self.loads.get(&id)
    }

    fn get_mut(&mut self, id: LoadId) -> Option<&mut Load> {
        self.loads.get_mut(&id)
    }

    fn put(&mut self, load: Load) {
        self.loads.insert(load.id, load);
    }

    fn remove(&mut self, id: LoadId) -> Option<Load> {
        self.loads.remove(&id)
    }

    fn iter(&self) -> impl Iterator<Item = &Load> {
        self.loads.values()
    }

    fn len(&self) -> usize {
        self.loads.len()
    }
}
