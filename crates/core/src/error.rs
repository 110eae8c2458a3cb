use thiserror::Error;

use crate::board::PositionError;
use crate::model::IdError;
use crate::steps::{PredicateError, StepError};

/// Umbrella error for callers that do not care which domain layer failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Predicate(#[from] PredicateError),
}
