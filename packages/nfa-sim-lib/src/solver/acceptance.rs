use std::time::Instant;

use rayon::prelude::*;

use crate::{
    automaton::{StateSet, nfa::NFA},
    config::{EmptyWordRule, SimulationConfig},
    logger::{LogLevel, Logger},
    solver::{BatchResult, Verdict},
    spec::InputWord,
};

/// Decides acceptance of words by simulating an [NFA] on sets of states.
///
/// The current set starts as the epsilon closure of the initial states. For
/// each symbol every current state moves along its transitions for that
/// symbol, and the reached states are extended by their epsilon closure. A
/// word is accepted iff the final set contains an accepting state. Once the
/// set is empty no symbol can lead anywhere, so the run stops early.
///
/// The solver does not keep state between words, so words can be evaluated
/// in any order or in parallel.
pub struct AcceptanceSolver<'a> {
    automaton: &'a NFA,
    config: SimulationConfig,
    logger: Option<&'a Logger>,
}

impl<'a> AcceptanceSolver<'a> {
    pub fn new(automaton: &'a NFA, config: SimulationConfig, logger: Option<&'a Logger>) -> Self {
        AcceptanceSolver {
            automaton,
            config,
            logger,
        }
    }

    pub fn accepts(&self, word: &InputWord) -> bool {
        match word {
            InputWord::Empty => self.accepts_empty(),
            InputWord::Text(_) => self.run(&word.symbols(*self.config.get_tokenization())),
        }
    }

    pub fn verdict(&self, word: &InputWord) -> Verdict {
        Verdict::from(self.accepts(word))
    }

    fn accepts_empty(&self) -> bool {
        let closure = self.automaton.initial_closure();
        tracing::debug!("Initial closure for the empty word: {}", closure);

        match self.config.get_empty_word() {
            EmptyWordRule::Closure => self.automaton.is_accepting_set(&closure),
            EmptyWordRule::AnyEpsilon => {
                self.automaton.has_epsilon_transitions()
                    || self.automaton.is_accepting_set(&closure)
            }
        }
    }

    fn run(&self, symbols: &[&str]) -> bool {
        let alphabet = self.automaton.alphabet();
        let mut current: StateSet = self.automaton.initial_closure();

        for (position, token) in symbols.iter().enumerate() {
            current = self.automaton.step(&current, alphabet.get(token));

            if current.is_empty() {
                tracing::debug!(
                    "No transitions left after '{}' at position {}, rejecting",
                    token,
                    position
                );
                return false;
            }

            tracing::debug!("After '{}': {}", token, current);
        }

        self.automaton.is_accepting_set(&current)
    }

    /// Evaluates every word independently. The verdicts keep the order of
    /// `words`, also when evaluated in parallel.
    pub fn evaluate_all(&self, words: &[InputWord]) -> BatchResult {
        let start = Instant::now();

        if let Some(l) = self.logger {
            self.log_automaton(l);
        }

        let verdicts: Vec<Verdict> = if *self.config.get_parallel() {
            words.par_iter().map(|word| self.verdict(word)).collect()
        } else {
            words.iter().map(|word| self.verdict(word)).collect()
        };

        let result = BatchResult::new(verdicts, start.elapsed());

        if let Some(l) = self.logger {
            for (word, verdict) in words.iter().zip(&result.verdicts) {
                l.debug(&format!("{}: {}", word, verdict));
            }
            l.info(&format!(
                "Evaluated {} words: {} accepted, {} rejected in {:?}",
                words.len(),
                result.statistics.accepted,
                result.statistics.rejected,
                result.statistics.time
            ));
        }

        result
    }

    fn log_automaton(&self, logger: &Logger) {
        let nfa = self.automaton;

        logger
            .object("NFA")
            .add_field("states", nfa.state_count())
            .add_field("alphabet", nfa.alphabet())
            .add_field("initial", nfa.initial_states())
            .add_field("final", nfa.accepting_states())
            .add_field("transitions", nfa.transition_count())
            .log(LogLevel::Debug);

        let reachable = nfa.reachable_states();
        let unreachable = nfa.states().filter(|s| !reachable.contains(*s)).count();
        if unreachable > 0 {
            logger.warn(&format!(
                "{} of {} states are unreachable from the initial states",
                unreachable,
                nfa.state_count()
            ));
        }
        if !nfa.is_accepting_set(&reachable) {
            logger.warn("No final state is reachable from the initial states");
        }
    }
}
