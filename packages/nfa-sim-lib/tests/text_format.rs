use nfa_sim_lib::{
    solver::{Verdict, evaluate_all},
    spec::{
        AutomatonSpec, InitialStates, InputWord, RawAutomatonSpec, SpecError, SpecField,
        TransitionSpec, text::ToSpecFormat,
    },
};

const EXAMPLE: &str = "3
2 a b
1
1 2
4
0 a 1
1 b 2
1 - 2
2 a 2
4
ab
a
-
abb
";

#[test]
fn parse_example() {
    let raw = RawAutomatonSpec::parse(EXAMPLE).unwrap();

    assert_eq!(raw.state_count, 3);
    assert_eq!(raw.alphabet, vec!["a", "b"]);
    assert_eq!(raw.initial, InitialStates::First(1));
    assert_eq!(raw.accepting, vec![2]);
    assert_eq!(raw.transitions.len(), 4);
    assert_eq!(raw.transitions[2], TransitionSpec::new(1, "-", 2));
    assert_eq!(raw.inputs, vec!["ab", "a", "-", "abb"]);
}

#[test]
fn evaluate_example() {
    let spec = AutomatonSpec::parse(EXAMPLE).unwrap();

    assert_eq!(
        evaluate_all(&spec, spec.inputs()),
        vec![
            Verdict::Accepted,
            Verdict::Accepted,
            Verdict::Rejected,
            Verdict::Rejected
        ]
    );
}

#[test]
fn parse_ignores_extra_tokens_after_counts() {
    let input = "2\n1 a b\n1\n1 1 0\n1\n0 a 1\n1\na\n";
    let raw = RawAutomatonSpec::parse(input).unwrap();

    assert_eq!(raw.alphabet, vec!["a"]);
    assert_eq!(raw.accepting, vec![1]);
}

#[test]
fn parse_crlf_and_blank_input_line() {
    let input = "1\r\n0\r\n1\r\n1 0\r\n0\r\n2\r\n\r\n-\r\n";
    let spec = AutomatonSpec::parse(input).unwrap();

    assert_eq!(spec.inputs(), &[InputWord::Empty, InputWord::Empty]);
    assert_eq!(
        evaluate_all(&spec, spec.inputs()),
        vec![Verdict::Accepted, Verdict::Accepted]
    );
}

#[test]
fn parse_errors() {
    // not a number
    let err = RawAutomatonSpec::parse("x\n").unwrap_err();
    assert!(err.to_string().contains("Line 1"));

    // fewer terminals than declared
    assert!(RawAutomatonSpec::parse("2\n3 a b\n1\n0\n0\n0\n").is_err());

    // transition with four tokens
    let err = RawAutomatonSpec::parse("2\n1 a\n1\n0\n1\n0 a 1 1\n0\n").unwrap_err();
    assert!(err.to_string().contains("Line 6"));

    // missing input strings
    assert!(RawAutomatonSpec::parse("2\n1 a\n1\n0\n0\n2\na\n").is_err());

    // non numeric final state
    assert!(RawAutomatonSpec::parse("2\n1 a\n1\n1 q1\n0\n0\n").is_err());
}

#[test]
fn parse_reports_limits_before_reading_lines() {
    let err = RawAutomatonSpec::parse("2\n1 a\n1\n0\n51\n").unwrap_err();

    assert_eq!(
        err.downcast_ref::<SpecError>(),
        Some(&SpecError::LimitExceeded {
            field: SpecField::Transitions,
            limit: 50,
            actual: 51
        })
    );
}

#[test]
fn parse_reports_state_limit_first() {
    let states = SpecError::LimitExceeded {
        field: SpecField::States,
        limit: 10,
        actual: 11,
    };

    // more terminals than allowed
    let err = RawAutomatonSpec::parse("11\n11 a b c d e f g h i j k\n1\n0\n0\n0\n").unwrap_err();
    assert_eq!(err.downcast_ref::<SpecError>(), Some(&states));

    // more final states than the declared state count
    let err = AutomatonSpec::parse("11\n0\n1\n12 0 1 2 3 4 5 6 7 8 9 10 11\n0\n0\n").unwrap_err();
    assert_eq!(err.downcast_ref::<SpecError>(), Some(&states));

    let err = RawAutomatonSpec::parse("0\n0\n0\n0\n0\n0\n").unwrap_err();
    assert_eq!(err.downcast_ref::<SpecError>(), Some(&SpecError::NoStates));
}

#[test]
fn parse_validates() {
    let err = AutomatonSpec::parse("11\n0\n1\n0\n0\n0\n").unwrap_err();

    assert_eq!(
        err.downcast_ref::<SpecError>(),
        Some(&SpecError::LimitExceeded {
            field: SpecField::States,
            limit: 10,
            actual: 11
        })
    );

    let err = AutomatonSpec::parse("2\n1 a\n1\n0\n1\n0 c 1\n0\n").unwrap_err();
    assert_eq!(
        err.downcast_ref::<SpecError>(),
        Some(&SpecError::UndefinedSymbol {
            token: "c".to_string()
        })
    );
}

#[test]
fn write_and_read_back() {
    let spec = AutomatonSpec::parse(EXAMPLE).unwrap();
    let written = spec.to_spec_format().unwrap();
    let reread = AutomatonSpec::parse(&written).unwrap();

    assert_eq!(reread, spec);
}

#[test]
fn write_rejects_explicit_initial_states() {
    let spec = AutomatonSpec::build(
        3,
        &["a"],
        &InitialStates::Explicit(vec![2]),
        &[],
        &[],
        &["a"],
    )
    .unwrap();

    assert!(spec.to_spec_format().is_err());
}
