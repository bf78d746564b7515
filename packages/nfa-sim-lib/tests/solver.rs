use std::time::Duration;

use nfa_sim_lib::{
    config::{EmptyWordRule, OutputConfig, SimulationConfig},
    logger::{LogLevel, Logger},
    solver::{BatchResult, SerializableBatchResult, Verdict, acceptance::AcceptanceSolver},
    spec::{AutomatonSpec, InitialStates, InputWord, Tokenization, TransitionSpec},
};

/// The epsilon transition q1 -> q2 is not reachable from q0, and q0 is not
/// final.
fn unreachable_epsilon() -> AutomatonSpec {
    AutomatonSpec::build(
        3,
        &["a"],
        &InitialStates::First(1),
        &[2],
        &[TransitionSpec::new(1, "-", 2), TransitionSpec::new(0, "a", 1)],
        &["-", "a"],
    )
    .unwrap()
}

#[test]
fn test_empty_word_closure_rule() {
    let spec = unreachable_epsilon();
    let solver = AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), None);

    assert!(!solver.accepts(&InputWord::Empty));
    assert!(solver.accepts(&InputWord::from("a")));
}

#[test]
fn test_empty_word_any_epsilon_rule() {
    let spec = unreachable_epsilon();
    let config = SimulationConfig::default().with_empty_word(EmptyWordRule::AnyEpsilon);
    let solver = AcceptanceSolver::new(spec.automaton(), config, None);

    assert!(solver.accepts(&InputWord::Empty));
    assert!(solver.accepts(&InputWord::from("a")));
}

#[test]
fn test_blank_line_is_empty_word() {
    let spec = unreachable_epsilon();
    assert_eq!(InputWord::from(""), InputWord::Empty);

    for rule in [EmptyWordRule::Closure, EmptyWordRule::AnyEpsilon] {
        let solver = AcceptanceSolver::new(
            spec.automaton(),
            SimulationConfig::default().with_empty_word(rule),
            None,
        );
        assert_eq!(
            solver.verdict(&InputWord::from("")),
            solver.verdict(&InputWord::from("-"))
        );
    }
}

#[test]
fn test_empty_word_without_epsilon() {
    let spec = AutomatonSpec::build(
        2,
        &["a"],
        &InitialStates::First(1),
        &[1],
        &[TransitionSpec::new(0, "a", 1)],
        &["-"],
    )
    .unwrap();

    for rule in [EmptyWordRule::Closure, EmptyWordRule::AnyEpsilon] {
        let solver = AcceptanceSolver::new(
            spec.automaton(),
            SimulationConfig::default().with_empty_word(rule),
            None,
        );
        assert!(!solver.accepts(&InputWord::Empty));
    }
}

#[test]
fn test_empty_word_initial_final() {
    let spec = AutomatonSpec::build(
        1,
        &["a"],
        &InitialStates::First(1),
        &[0],
        &[],
        &["-"],
    )
    .unwrap();
    let solver = AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), None);

    assert!(solver.accepts(&InputWord::Empty));
    assert!(!solver.accepts(&InputWord::from("a")));
}

#[test]
fn test_whitespace_tokenization() {
    let spec = AutomatonSpec::build(
        3,
        &["ab", "c"],
        &InitialStates::First(1),
        &[2],
        &[TransitionSpec::new(0, "ab", 1), TransitionSpec::new(1, "c", 2)],
        &["ab c"],
    )
    .unwrap();

    let chars = AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), None);
    let words = AcceptanceSolver::new(
        spec.automaton(),
        SimulationConfig::default().with_tokenization(Tokenization::Whitespace),
        None,
    );

    assert!(!chars.accepts(&spec.inputs()[0]));
    assert!(words.accepts(&spec.inputs()[0]));
}

/// Accepts words over {a, b} whose second to last symbol is an a.
fn second_to_last_a() -> AutomatonSpec {
    AutomatonSpec::build(
        3,
        &["a", "b"],
        &InitialStates::First(1),
        &[2],
        &[
            TransitionSpec::new(0, "a", 0),
            TransitionSpec::new(0, "b", 0),
            TransitionSpec::new(0, "a", 1),
            TransitionSpec::new(1, "a", 2),
            TransitionSpec::new(1, "b", 2),
        ],
        &["ab", "ba", "aa", "bbbab", "a", "-", "abba", "babaa", "x", "bbbbbbbbbbbbbbbbbbab"],
    )
    .unwrap()
}

#[test]
fn test_batch_keeps_order() {
    let spec = second_to_last_a();
    let solver = AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), None);
    let result = solver.evaluate_all(spec.inputs());

    use Verdict::*;
    assert_eq!(
        result.verdicts,
        vec![
            Accepted, Rejected, Accepted, Accepted, Rejected, Rejected, Rejected, Accepted,
            Rejected, Accepted
        ]
    );
    assert_eq!(result.statistics.accepted, 5);
    assert_eq!(result.statistics.rejected, 5);
}

#[test]
fn test_parallel_matches_sequential() {
    let spec = second_to_last_a();
    let sequential = AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), None)
        .evaluate_all(spec.inputs());
    let parallel = AcceptanceSolver::new(
        spec.automaton(),
        SimulationConfig::default().with_parallel(true),
        None,
    )
    .evaluate_all(spec.inputs());

    assert_eq!(sequential.verdicts, parallel.verdicts);
}

#[test]
fn test_deterministic() {
    let spec = second_to_last_a();
    let solver = AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), None);

    for word in spec.inputs() {
        let first = solver.accepts(word);
        for _ in 0..5 {
            assert_eq!(solver.accepts(word), first);
        }
    }
}

#[test]
fn test_with_logger() {
    let spec = second_to_last_a();
    let logger = Logger::new(LogLevel::Error, "test".to_string(), None).unwrap();
    let with_logger =
        AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), Some(&logger))
            .evaluate_all(spec.inputs());
    let without_logger = AcceptanceSolver::new(spec.automaton(), SimulationConfig::default(), None)
        .evaluate_all(spec.inputs());

    assert_eq!(with_logger.verdicts, without_logger.verdicts);
}

#[test]
fn test_output_lines() {
    let result = BatchResult::new(
        vec![Verdict::Accepted, Verdict::Rejected, Verdict::Accepted],
        Duration::from_millis(3),
    );

    assert_eq!(
        result.to_lines(&OutputConfig::default()),
        "aceita\nrejeita\naceita\n"
    );
    assert_eq!(
        result.to_lines(
            &OutputConfig::default()
                .with_accept_token("yes".to_string())
                .with_reject_token("no".to_string())
        ),
        "yes\nno\nyes\n"
    );
}

#[test]
fn test_serializable_result() {
    let inputs = vec![InputWord::from("ab"), InputWord::Empty];
    let result = BatchResult::new(
        vec![Verdict::Accepted, Verdict::Rejected],
        Duration::from_millis(7),
    );
    let serializable = SerializableBatchResult::new(&inputs, &result);

    assert_eq!(serializable.results[1].input, "-");
    assert_eq!(serializable.accepted, 1);
    assert_eq!(serializable.ms_taken, 7);

    let json = serde_json::to_string(&serializable).unwrap();
    assert!(json.contains("\"verdict\":\"Accepted\""));
}
