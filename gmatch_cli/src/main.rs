//! gmatch command line front end
//!
//! Reads a lettered graph and a numbered table from files, matches them and
//! prints which rows the queried vertices occupy.

mod args;

use clap::Parser;
use gmatch_common::ProblemText;
use gmatch_engine::{Outcome, SolveReport, solve_problem};
use serde::Serialize;
use tracing::info;

use args::Args;

/// JSON form of a run.
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Exam-style answer, when matched.
    joined: Option<String>,
    /// Failure message, when failed.
    failure: Option<String>,
    report: &'a SolveReport,
}

impl<'a> JsonOutput<'a> {
    fn new(report: &'a SolveReport) -> Self {
        Self {
            joined: report.outcome.answer().map(|a| a.joined()),
            failure: report.outcome.failure().map(ToString::to_string),
            report,
        }
    }
}

fn print_text(report: &SolveReport) {
    match &report.outcome {
        Outcome::Matched(answer) => {
            println!("{}", answer.joined());
            for (label, rows) in answer.iter() {
                let rows: Vec<String> = rows.iter().map(ToString::to_string).collect();
                println!("  {label}: {}", rows.join(", "));
            }
            if !answer.is_unambiguous() {
                println!("  (symmetric: {} mappings)", report.mappings.len());
            }
        }
        Outcome::Failed(failure) => println!("no answer: {failure}"),
        Outcome::Aborted { nodes_visited } => {
            println!("aborted after {nodes_visited} search nodes")
        }
    }
}

/// Loads the task, runs the matcher and prints the result.
///
/// Exits with status 2 when there is no answer, so scripts can tell a
/// failed match from malformed input (status 1).
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    info!("Loading task: {:?} / {:?}", args.edges, args.table);
    let problem = ProblemText::load(&args.edges, &args.table, args.query.as_str())?.parse()?;
    let config = args.to_config(&problem);
    info!("Weight mode: {:?}", config.weights);
    let report = solve_problem(&problem, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&JsonOutput::new(&report))?);
    } else {
        print_text(&report);
    }

    if report.outcome.answer().is_none() {
        std::process::exit(2);
    }
    Ok(())
}
