use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::automaton::{
    EPSILON_MARKER, StateId,
    nfa::NFA,
    symbol::{Alphabet, NFAEdge},
};

pub mod error;
pub mod text;

pub use error::{SpecError, SpecField, check_limit};

pub const MAX_STATES: usize = 10;
pub const MAX_TERMINALS: usize = 10;
pub const MAX_TRANSITIONS: usize = 50;
pub const MAX_INPUT_STRINGS: usize = 10;
pub const MAX_INPUT_LENGTH: usize = 20;

/// How the initial states of an automaton are given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialStates {
    /// The first `k` states, `q0` to `q(k-1)`.
    First(usize),
    Explicit(Vec<usize>),
}

impl InitialStates {
    pub fn count(&self) -> usize {
        match self {
            InitialStates::First(k) => *k,
            InitialStates::Explicit(ids) => ids.len(),
        }
    }

    pub fn ids(&self) -> Vec<usize> {
        match self {
            InitialStates::First(k) => (0..*k).collect(),
            InitialStates::Explicit(ids) => ids.clone(),
        }
    }
}

/// A transition as it appears in a definition, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionSpec {
    pub from: usize,
    pub symbol: String,
    pub to: usize,
}

impl TransitionSpec {
    pub fn new(from: usize, symbol: &str, to: usize) -> Self {
        TransitionSpec {
            from,
            symbol: symbol.to_string(),
            to,
        }
    }
}

/// How an input string is split into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tokenization {
    /// Every character is one symbol.
    #[default]
    Chars,
    /// Symbols are separated by whitespace.
    Whitespace,
}

impl FromStr for Tokenization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chars" | "char" => Ok(Tokenization::Chars),
            "whitespace" | "ws" => Ok(Tokenization::Whitespace),
            _ => Err(format!("Invalid tokenization: {}", s)),
        }
    }
}

/// A word to run through an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputWord {
    Empty,
    Text(String),
}

impl InputWord {
    /// Reads a word, where [EPSILON_MARKER] and the empty string both denote
    /// the empty word.
    pub fn parse(input: &str) -> Self {
        if input.is_empty() || input == EPSILON_MARKER {
            InputWord::Empty
        } else {
            InputWord::Text(input.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InputWord::Empty)
    }

    /// The length in characters. The empty word has length zero.
    pub fn char_count(&self) -> usize {
        match self {
            InputWord::Empty => 0,
            InputWord::Text(text) => text.chars().count(),
        }
    }

    pub fn symbols(&self, tokenization: Tokenization) -> Vec<&str> {
        let InputWord::Text(text) = self else {
            return vec![];
        };

        match tokenization {
            Tokenization::Chars => text
                .char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect(),
            Tokenization::Whitespace => text.split_whitespace().collect(),
        }
    }
}

impl From<&str> for InputWord {
    fn from(value: &str) -> Self {
        InputWord::parse(value)
    }
}

impl Display for InputWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputWord::Empty => write!(f, "{}", EPSILON_MARKER),
            InputWord::Text(text) => write!(f, "{}", text),
        }
    }
}

/// The unvalidated parts of an automaton definition, as delivered by a
/// loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAutomatonSpec {
    pub state_count: usize,
    pub alphabet: Vec<String>,
    pub initial: InitialStates,
    pub accepting: Vec<usize>,
    pub transitions: Vec<TransitionSpec>,
    pub inputs: Vec<String>,
}

impl RawAutomatonSpec {
    pub fn build(&self) -> Result<AutomatonSpec, SpecError> {
        AutomatonSpec::build(
            self.state_count,
            &self.alphabet,
            &self.initial,
            &self.accepting,
            &self.transitions,
            &self.inputs,
        )
    }
}

/// A validated automaton together with the words to evaluate on it.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonSpec {
    automaton: NFA,
    inputs: Vec<InputWord>,
}

impl AutomatonSpec {
    /// Validates a definition and builds the automaton.
    ///
    /// All counts are checked against their limits first, in the order
    /// states, terminals, initial states, final states, transitions, input
    /// strings and input lengths. Afterwards every referenced state and
    /// symbol must be defined. The first violation is returned.
    pub fn build<A: AsRef<str>, I: AsRef<str>>(
        state_count: usize,
        alphabet: &[A],
        initial: &InitialStates,
        accepting: &[usize],
        transitions: &[TransitionSpec],
        inputs: &[I],
    ) -> Result<AutomatonSpec, SpecError> {
        if state_count == 0 {
            return Err(SpecError::NoStates);
        }
        check_limit(SpecField::States, MAX_STATES, state_count)?;
        check_limit(SpecField::Terminals, MAX_TERMINALS, alphabet.len())?;
        check_limit(SpecField::InitialStates, state_count, initial.count())?;
        check_limit(SpecField::FinalStates, state_count, accepting.len())?;
        check_limit(SpecField::Transitions, MAX_TRANSITIONS, transitions.len())?;
        check_limit(SpecField::InputStrings, MAX_INPUT_STRINGS, inputs.len())?;

        let inputs = inputs
            .iter()
            .map(|input| {
                let word = InputWord::parse(input.as_ref());
                check_limit(SpecField::InputLength, MAX_INPUT_LENGTH, word.char_count())?;
                Ok(word)
            })
            .collect::<Result<Vec<_>, SpecError>>()?;

        if let Some(reserved) = alphabet.iter().find(|t| t.as_ref() == EPSILON_MARKER) {
            return Err(SpecError::ReservedSymbol {
                token: reserved.as_ref().to_string(),
            });
        }

        let mut nfa = NFA::new(
            state_count,
            alphabet.iter().map(|t| t.as_ref()).collect::<Alphabet>(),
        );

        let state = |id: usize| {
            if id < state_count {
                Ok(StateId::new(id))
            } else {
                Err(SpecError::UndefinedState { id })
            }
        };

        for id in initial.ids() {
            nfa.set_initial(state(id)?);
        }

        for &id in accepting {
            nfa.set_accepting(state(id)?);
        }

        for transition in transitions {
            let from = state(transition.from)?;
            let to = state(transition.to)?;
            let edge: NFAEdge = nfa.alphabet().edge(&transition.symbol).ok_or_else(|| {
                SpecError::UndefinedSymbol {
                    token: transition.symbol.clone(),
                }
            })?;

            nfa.add_transition(from, edge, to);
        }

        Ok(AutomatonSpec {
            automaton: nfa,
            inputs,
        })
    }

    pub fn automaton(&self) -> &NFA {
        &self.automaton
    }

    pub fn inputs(&self) -> &[InputWord] {
        &self.inputs
    }
}
