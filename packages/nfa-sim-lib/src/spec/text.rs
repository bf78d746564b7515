//! In this file, we parse the line based textual format of automata.
//!
//! An example definition is as follows:
//! ```text
//! 3
//! 2 a b
//! 1
//! 1 2
//! 4
//! 0 a 1
//! 1 b 2
//! 1 - 2
//! 2 a 2
//! 3
//! ab
//! a
//! -
//! ```
//!
//! The lines hold, in order: the number of states, the number of terminals
//! followed by the terminals, the number `k` of initial states (these are
//! always `q0` to `q(k-1)`), the number of final states followed by their
//! indices, the number of transitions, one `source symbol target` line per
//! transition (`-` as symbol is an epsilon transition), the number of input
//! strings and one input string per line (`-` is the empty word).
//!
//! Tokens after a declared count are ignored. Limits are validated by
//! [AutomatonSpec::build], the loader only checks the counts that decide how
//! many lines to read.
use std::path::Path;

use anyhow::Context;
use itertools::Itertools;
use nom::{
    IResult, Parser,
    bytes::complete::take_till1,
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map_res},
    multi::many0,
    sequence::{delimited, preceded},
};

use crate::{
    automaton::StateId,
    spec::{
        AutomatonSpec, InitialStates, MAX_INPUT_STRINGS, MAX_STATES, MAX_TERMINALS,
        MAX_TRANSITIONS, RawAutomatonSpec, SpecError, SpecField, TransitionSpec, check_limit,
    },
};

fn integer(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>()).parse(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace()).parse(input)
}

// E.g., 5
fn count_line(input: &str) -> IResult<&str, usize> {
    all_consuming(delimited(space0, integer, space0)).parse(input)
}

#[test]
fn test_count_line() {
    assert_eq!(count_line(" 12 ").unwrap().1, 12);
    assert!(count_line("12 a").is_err());
    assert!(count_line("-1").is_err());
    assert!(count_line("").is_err());
}

// E.g., 2 a b
fn counted_list(input: &str) -> IResult<&str, (usize, Vec<&str>)> {
    all_consuming(delimited(
        space0,
        (integer, many0(preceded(space1, token))),
        space0,
    ))
    .parse(input)
}

#[test]
fn test_counted_list() {
    let (_, (count, tokens)) = counted_list("2 a bc").unwrap();
    assert_eq!(count, 2);
    assert_eq!(tokens, vec!["a", "bc"]);

    let (_, (count, tokens)) = counted_list("0").unwrap();
    assert_eq!(count, 0);
    assert!(tokens.is_empty());

    assert!(counted_list("2a b").is_err());
}

// E.g., 0 a 1
fn transition_line(input: &str) -> IResult<&str, TransitionSpec> {
    let (input, (_, from, _, symbol, _, to, _)) =
        all_consuming((space0, integer, space1, token, space1, integer, space0)).parse(input)?;

    Ok((input, TransitionSpec::new(from, symbol, to)))
}

#[test]
fn test_transition_line() {
    let (_, transition) = transition_line("0 a 1").unwrap();
    assert_eq!(transition, TransitionSpec::new(0, "a", 1));

    let (_, transition) = transition_line("3\t-  2").unwrap();
    assert_eq!(transition, TransitionSpec::new(3, "-", 2));

    assert!(transition_line("0 a").is_err());
    assert!(transition_line("0 a 1 b").is_err());
    assert!(transition_line("q0 a q1").is_err());
}

struct LineReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> LineReader<'a> {
    fn new(input: &'a str) -> Self {
        LineReader {
            lines: input.lines().enumerate(),
        }
    }

    /// Returns the next trimmed line and its 1-based number.
    fn next(&mut self, what: &str) -> anyhow::Result<(usize, &'a str)> {
        match self.lines.next() {
            Some((index, line)) => Ok((index + 1, line.trim())),
            None => anyhow::bail!("Unexpected end of input, expected {}", what),
        }
    }

    fn parse<T>(
        &mut self,
        what: &str,
        parser: impl Fn(&'a str) -> IResult<&'a str, T>,
    ) -> anyhow::Result<T> {
        let (number, line) = self.next(what)?;

        match parser(line) {
            Ok((_, value)) => Ok(value),
            Err(e) => Err(anyhow::anyhow!(
                "Line {}: failed to parse {} from '{}': {}",
                number,
                what,
                line,
                e
            )),
        }
    }

    /// Parses a count followed by at least that many tokens and returns the
    /// first `count` tokens.
    fn counted_tokens(
        &mut self,
        what: &str,
        field: SpecField,
        limit: usize,
    ) -> anyhow::Result<Vec<&'a str>> {
        let (count, tokens) = self.parse(what, counted_list)?;
        check_limit(field, limit, count)?;

        if tokens.len() < count {
            anyhow::bail!(
                "Expected {} {}, but only {} are given",
                count,
                what,
                tokens.len()
            );
        }

        Ok(tokens.into_iter().take(count).collect())
    }
}

impl RawAutomatonSpec {
    pub fn parse(input: &str) -> anyhow::Result<RawAutomatonSpec> {
        let mut reader = LineReader::new(input);

        let state_count = reader.parse("the number of states", count_line)?;
        // bounds the final state count below
        if state_count == 0 {
            return Err(SpecError::NoStates.into());
        }
        check_limit(SpecField::States, MAX_STATES, state_count)?;

        let alphabet = reader
            .counted_tokens("terminals", SpecField::Terminals, MAX_TERMINALS)?
            .into_iter()
            .map(str::to_string)
            .collect();

        let initial_count = reader.parse("the number of initial states", count_line)?;

        let accepting = reader
            .counted_tokens("final states", SpecField::FinalStates, state_count)?
            .into_iter()
            .map(|id| {
                id.parse::<usize>()
                    .with_context(|| format!("Final state '{}' is not a state index", id))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let transition_count = reader.parse("the number of transitions", count_line)?;
        check_limit(SpecField::Transitions, MAX_TRANSITIONS, transition_count)?;

        let transitions = (0..transition_count)
            .map(|_| reader.parse("a transition", transition_line))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let input_count = reader.parse("the number of input strings", count_line)?;
        check_limit(SpecField::InputStrings, MAX_INPUT_STRINGS, input_count)?;

        let inputs = (0..input_count)
            .map(|_| reader.next("an input string").map(|(_, line)| line.to_string()))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(RawAutomatonSpec {
            state_count,
            alphabet,
            initial: InitialStates::First(initial_count),
            accepting,
            transitions,
            inputs,
        })
    }
}

impl AutomatonSpec {
    /// Parses and validates a definition in the textual format.
    pub fn parse(input: &str) -> anyhow::Result<AutomatonSpec> {
        let raw = RawAutomatonSpec::parse(input).context("Failed to parse automaton definition")?;
        Ok(raw.build()?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<AutomatonSpec> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        AutomatonSpec::parse(&content).with_context(|| format!("Invalid input {}", path.display()))
    }
}

pub trait ToSpecFormat {
    fn to_spec_format(&self) -> anyhow::Result<String>;
}

impl ToSpecFormat for AutomatonSpec {
    /// Fails if the initial states are not `q0` to `q(k-1)`, which is the
    /// only set the format can express.
    fn to_spec_format(&self) -> anyhow::Result<String> {
        let nfa = self.automaton();
        let initial = nfa.initial_states();

        if initial.iter().enumerate().any(|(i, state)| state != StateId::new(i)) {
            anyhow::bail!(
                "Initial states {} are not a prefix of the states and cannot be written",
                initial
            );
        }

        let mut spec = String::new();

        spec.push_str(&format!("{}\n", nfa.state_count()));

        let alphabet = nfa.alphabet();
        spec.push_str(&format!("{}", alphabet.len()));
        for token in alphabet.tokens() {
            spec.push_str(&format!(" {}", token));
        }
        spec.push('\n');

        spec.push_str(&format!("{}\n", initial.len()));

        let accepting = nfa.accepting_states();
        spec.push_str(&format!("{}", accepting.len()));
        for state in accepting {
            spec.push_str(&format!(" {}", state.index()));
        }
        spec.push('\n');

        let transitions = nfa
            .iter_transitions()
            .map(|(from, edge, to)| {
                format!(
                    "{} {} {}",
                    from.index(),
                    alphabet.edge_label(&edge),
                    to.index()
                )
            })
            .collect_vec();
        spec.push_str(&format!("{}\n", transitions.len()));
        for transition in transitions {
            spec.push_str(&transition);
            spec.push('\n');
        }

        spec.push_str(&format!("{}\n", self.inputs().len()));
        for word in self.inputs() {
            spec.push_str(&format!("{}\n", word));
        }

        Ok(spec)
    }
}
