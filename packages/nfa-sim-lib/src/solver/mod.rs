use std::{fmt::Display, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    config::{OutputConfig, SimulationConfig},
    solver::acceptance::AcceptanceSolver,
    spec::{AutomatonSpec, InputWord},
};

pub mod acceptance;

/// The outcome of evaluating one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl From<bool> for Verdict {
    fn from(b: bool) -> Self {
        if b {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Verdict::Rejected)
    }

    /// The token written for this verdict.
    pub fn token<'a>(&self, output: &'a OutputConfig) -> &'a str {
        match self {
            Verdict::Accepted => output.get_accept_token(),
            Verdict::Rejected => output.get_reject_token(),
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "Accepted"),
            Verdict::Rejected => write!(f, "Rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub accepted: usize,
    pub rejected: usize,
    pub time: Duration,
}

impl BatchStatistics {
    pub fn new(verdicts: &[Verdict], time: Duration) -> Self {
        let accepted = verdicts.iter().filter(|v| v.is_accepted()).count();

        BatchStatistics {
            accepted,
            rejected: verdicts.len() - accepted,
            time,
        }
    }
}

/// The verdicts of a batch, in the order of the evaluated words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub verdicts: Vec<Verdict>,
    pub statistics: BatchStatistics,
}

impl BatchResult {
    pub fn new(verdicts: Vec<Verdict>, time: Duration) -> Self {
        let statistics = BatchStatistics::new(&verdicts, time);
        BatchResult {
            verdicts,
            statistics,
        }
    }

    /// Renders one verdict token per line.
    pub fn to_lines(&self, output: &OutputConfig) -> String {
        let mut lines = String::new();
        for verdict in &self.verdicts {
            lines.push_str(verdict.token(output));
            lines.push('\n');
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableVerdict {
    pub input: String,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableBatchResult {
    pub results: Vec<SerializableVerdict>,
    pub accepted: usize,
    pub rejected: usize,
    pub ms_taken: u128,
}

impl SerializableBatchResult {
    pub fn new(inputs: &[InputWord], result: &BatchResult) -> Self {
        SerializableBatchResult {
            results: inputs
                .iter()
                .zip(&result.verdicts)
                .map(|(input, verdict)| SerializableVerdict {
                    input: input.to_string(),
                    verdict: *verdict,
                })
                .collect(),
            accepted: result.statistics.accepted,
            rejected: result.statistics.rejected,
            ms_taken: result.statistics.time.as_millis(),
        }
    }
}

/// Evaluates each word on the automaton of `spec` with the default
/// configuration. The verdicts are in the order of `words`.
pub fn evaluate_all(spec: &AutomatonSpec, words: &[InputWord]) -> Vec<Verdict> {
    AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), None)
        .evaluate_all(words)
        .verdicts
}
