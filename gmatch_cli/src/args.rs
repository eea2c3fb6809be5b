use std::path::PathBuf;

use clap::Parser;
use gmatch_common::{Config, ParsedProblem, SearchMode, WeightMode};

/// gmatch - find which table rows the vertices of a lettered graph occupy
#[derive(Parser, Debug)]
#[command(name = "gmatch")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Edge list of the lettered graph, one `A-B [weight]` per line
    #[arg(short = 'e', long)]
    pub edges: PathBuf,

    /// Square adjacency table, one row per line
    #[arg(short = 't', long)]
    pub table: PathBuf,

    /// Queried vertices, separated by spaces or commas
    #[arg(short = 'q', long)]
    pub query: String,

    /// Whether edge weights take part in matching
    #[arg(long, value_enum, default_value = "auto")]
    pub weights: WeightModeArg,

    /// Stop at the first mapping or enumerate all of them
    #[arg(long, value_enum, default_value = "all")]
    pub mode: SearchModeArg,

    /// Abort after this many search nodes
    #[arg(long)]
    pub step_limit: Option<u64>,

    /// Print the full report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    ///
    /// `--weights auto` is settled against the parsed task.
    pub fn to_config(&self, problem: &ParsedProblem) -> Config {
        Config::builder()
            .weights(self.weights.resolve(problem.has_weights()))
            .search(self.mode.clone().into())
            .step_limit(self.step_limit)
            .build()
    }
}

/// Command-line argument wrapper for WeightMode
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum WeightModeArg {
    /// Weighted when some edge of the lettered graph weighs more than 1
    #[value(name = "auto")]
    Auto,
    /// Adjacency only
    #[value(name = "unweighted")]
    Unweighted,
    /// Weights must match exactly
    #[value(name = "weighted")]
    Weighted,
}

impl WeightModeArg {
    /// Pick the concrete mode, given whether the task declares real weights.
    pub fn resolve(&self, has_weights: bool) -> WeightMode {
        match self {
            WeightModeArg::Auto if has_weights => WeightMode::Weighted,
            WeightModeArg::Auto | WeightModeArg::Unweighted => WeightMode::Unweighted,
            WeightModeArg::Weighted => WeightMode::Weighted,
        }
    }
}

/// Command-line argument wrapper for SearchMode
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum SearchModeArg {
    /// First mapping only
    #[value(name = "first")]
    First,
    /// Every mapping
    #[value(name = "all")]
    All,
}

impl From<SearchModeArg> for SearchMode {
    fn from(arg: SearchModeArg) -> Self {
        match arg {
            SearchModeArg::First => SearchMode::First,
            SearchModeArg::All => SearchMode::All,
        }
    }
}
