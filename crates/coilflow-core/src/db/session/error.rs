use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    status::LoadStatus,
    types::{CoilId, LoadId},
};
use thiserror::Error as ThisError;

///
/// ValidationError
///
/// Input rejected before any store is touched.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ValidationError {
    #[error("coil id must not be empty")]
    EmptyCoilId,

    #[error("customer name must not be empty")]
    EmptyCustomer,

    #[error("summary range starts {from} after it ends {to}")]
    InvalidRange { from: String, to: String },

    #[error("section {section} is not a warehouse section")]
    InvalidSection { section: u32 },

    #[error("weight must be greater than 0")]
    NonPositiveWeight,

    #[error("width must be greater than 0")]
    NonPositiveWidth,
}

impl ValidationError {
    const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::EmptyCoilId | Self::NonPositiveWeight | Self::NonPositiveWidth => {
                ErrorOrigin::Coil
            }
            Self::EmptyCustomer | Self::InvalidRange { .. } => ErrorOrigin::Load,
            Self::InvalidSection { .. } => ErrorOrigin::Location,
        }
    }
}

impl From<ValidationError> for InternalError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorClass::Validation, err.origin(), err.to_string())
    }
}

///
/// AssignError
///
/// A coil/load assignment change that would break exclusivity, the SCRAP
/// guard, or a shipped load's frozen coil set.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum AssignError {
    #[error("coil {coil_id} is assigned to load {load_id} and cannot be scrapped")]
    AssignedScrap { coil_id: CoilId, load_id: LoadId },

    #[error("coil {coil_id} is not assigned to load {load_id}")]
    NotOnLoad { coil_id: CoilId, load_id: LoadId },

    #[error("coil {coil_id} is on shipped load {load_id} and cannot leave it")]
    OnShippedLoad { coil_id: CoilId, load_id: LoadId },

    #[error("coil {coil_id} is SCRAP and cannot be assigned to a load")]
    ScrapCoil { coil_id: CoilId },

    #[error("load {load_id} has shipped; its coils cannot change")]
    ShippedLoad { load_id: LoadId },
}

impl From<AssignError> for InternalError {
    fn from(err: AssignError) -> Self {
        let (class, origin) = match err {
            AssignError::AssignedScrap { .. } | AssignError::ScrapCoil { .. } => {
                (ErrorClass::InvariantViolation, ErrorOrigin::Coil)
            }
            AssignError::NotOnLoad { .. } => (ErrorClass::Conflict, ErrorOrigin::Coil),
            AssignError::OnShippedLoad { .. } | AssignError::ShippedLoad { .. } => {
                (ErrorClass::Conflict, ErrorOrigin::Load)
            }
        };

        Self::new(class, origin, err.to_string())
    }
}

///
/// LoadUpdateError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum LoadUpdateError {
    #[error("load {load_id} has shipped and cannot move to {requested}")]
    LeaveShipped {
        load_id: LoadId,
        requested: LoadStatus,
    },
}

impl From<LoadUpdateError> for InternalError {
    fn from(err: LoadUpdateError) -> Self {
        Self::new(ErrorClass::Conflict, ErrorOrigin::Load, err.to_string())
    }
}
