//! Guided step engine shared by every exercise.

mod definition;
mod sequence;

pub use definition::{
    BoardSnapshot, PredicateError, StepCheck, StepDefinition, StepPredicate, StepSetup,
};
pub use sequence::{
    Advance, BoardMode, DropOutcome, GuidedSequence, Interaction, StepError, StepProgress,
    Verification,
};
