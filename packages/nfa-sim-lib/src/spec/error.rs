use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The bounded quantities of an automaton definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecField {
    States,
    Terminals,
    InitialStates,
    FinalStates,
    Transitions,
    InputStrings,
    InputLength,
}

impl Display for SpecField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecField::States => write!(f, "number of states"),
            SpecField::Terminals => write!(f, "number of terminal symbols"),
            SpecField::InitialStates => write!(f, "number of initial states"),
            SpecField::FinalStates => write!(f, "number of final states"),
            SpecField::Transitions => write!(f, "number of transitions"),
            SpecField::InputStrings => write!(f, "number of input strings"),
            SpecField::InputLength => write!(f, "length of an input string"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("the {field} cannot be greater than {limit}, got {actual}")]
    LimitExceeded {
        field: SpecField,
        limit: usize,
        actual: usize,
    },

    #[error("an automaton needs at least one state")]
    NoStates,

    #[error("state q{id} is not defined")]
    UndefinedState { id: usize },

    #[error("terminal '{token}' is not part of the alphabet")]
    UndefinedSymbol { token: String },

    #[error("'{token}' is reserved for epsilon transitions and cannot be a terminal")]
    ReservedSymbol { token: String },
}

/// Fails with [SpecError::LimitExceeded] if `actual` is above `limit`.
pub fn check_limit(field: SpecField, limit: usize, actual: usize) -> Result<(), SpecError> {
    if actual > limit {
        return Err(SpecError::LimitExceeded {
            field,
            limit,
            actual,
        });
    }

    Ok(())
}
