use std::fs;

use anyhow::Context;
use clap::Parser;
use nfa_sim_lib::{
    config::{EmptyWordRule, SimulationConfig},
    logger::Logger,
    solver::{SerializableBatchResult, acceptance::AcceptanceSolver},
    spec::{AutomatonSpec, Tokenization},
};

#[derive(Parser, Debug)]
#[command(name = "NFA Simulator")]
#[command(version = "0.1")]
#[command(about = "Decide which strings a non-deterministic finite automaton accepts", long_about = None)]
struct Args {
    /// The automaton definition followed by the strings to check.
    #[arg(default_value = "entrada.txt")]
    input: String,

    /// Where to write one verdict per line.
    #[arg(default_value = "saida.txt")]
    output: String,

    #[arg(short, long)]
    config: Option<String>,

    /// Overrides the empty word rule of the config (closure, any-epsilon).
    #[arg(short, long)]
    empty_word: Option<EmptyWordRule>,

    /// Overrides the tokenization of the config (chars, whitespace).
    #[arg(short, long)]
    tokenization: Option<Tokenization>,

    /// Print the verdicts and statistics as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Write the automaton as a Graphviz graph to this file.
    #[arg(long)]
    dot: Option<String>,

    /// Increase tracing output, repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let max_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimulationConfig::from_optional_file(args.config.as_deref())
        .context("Failed to load config")?;
    if let Some(rule) = args.empty_word {
        config = config.with_empty_word(rule);
    }
    if let Some(tokenization) = args.tokenization {
        config = config.with_tokenization(tokenization);
    }

    let logger = Logger::from_config(config.get_logger(), "Simulator".into())?;

    let spec = AutomatonSpec::from_file(&args.input)?;
    tracing::info!(
        "Loaded automaton with {} states and {} input strings",
        spec.automaton().state_count(),
        spec.inputs().len()
    );

    if let Some(dot_path) = &args.dot {
        fs::write(dot_path, spec.automaton().to_graphviz())
            .with_context(|| format!("Failed to write {}", dot_path))?;
    }

    let output = config.get_output().clone();
    let result =
        AcceptanceSolver::new(spec.automaton(), config, logger.as_ref()).evaluate_all(spec.inputs());

    fs::write(&args.output, result.to_lines(&output))
        .with_context(|| format!("Failed to write {}", args.output))?;

    if args.json {
        let json_res =
            serde_json::to_string_pretty(&SerializableBatchResult::new(spec.inputs(), &result))?;
        println!("{}", json_res);
    }

    Ok(())
}
