//! `waymark`: solve a puzzle instance with A*, Weighted A*, or IDA*.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use waymark_harness::instance::{load_korf, load_pancakes};
use waymark_harness::runner::{load_policy, run_search, SearchReport};
use waymark_harness::worlds::fifteen_puzzle::TileCost;
use waymark_harness::worlds::pancakes::PancakeCost;
use waymark_search::{Algorithm, HeapKind, SearchPolicy};

/// waymark: heuristic search over sliding tiles and pancake stacks.
#[derive(Parser)]
#[command(name = "waymark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Search policy TOML; flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Heuristic weight (at least 1).
    #[arg(long, global = true)]
    weight: Option<f64>,

    /// Open list for A*.
    #[arg(long, global = true, value_enum)]
    heap: Option<HeapArg>,

    #[arg(long, global = true, value_enum, default_value_t = CostArg::Unit)]
    cost: CostArg,

    /// Print the report as JSON instead of the text summary.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a 4x4 sliding-tile instance in Korf layout.
    Tiles { file: PathBuf },
    /// Solve a pancake stack instance.
    Pancakes { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Astar,
    Idastar,
}

#[derive(Clone, Copy, ValueEnum)]
enum HeapArg {
    Binary,
    Bucket,
}

/// Move cost. `sqrt` and `inverse` apply to tiles only.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CostArg {
    Unit,
    Heavy,
    Sqrt,
    Inverse,
}

impl CostArg {
    fn tiles(self) -> TileCost {
        match self {
            Self::Unit => TileCost::Unit,
            Self::Heavy => TileCost::Heavy,
            Self::Sqrt => TileCost::Sqrt,
            Self::Inverse => TileCost::Inverse,
        }
    }

    fn pancakes(self) -> Option<PancakeCost> {
        match self {
            Self::Unit => Some(PancakeCost::Unit),
            Self::Heavy => Some(PancakeCost::Heavy),
            Self::Sqrt | Self::Inverse => None,
        }
    }
}

impl Cli {
    fn policy(&self) -> anyhow::Result<SearchPolicy> {
        let mut policy = match &self.config {
            Some(path) => load_policy(path)
                .with_context(|| format!("loading policy {}", path.display()))?,
            None => SearchPolicy::default(),
        };
        if let Some(algorithm) = self.algorithm {
            policy.algorithm = match algorithm {
                AlgorithmArg::Astar => Algorithm::Astar,
                AlgorithmArg::Idastar => Algorithm::IdaStar,
            };
        }
        if let Some(weight) = self.weight {
            policy.weight = weight;
        }
        if let Some(heap) = self.heap {
            policy.heap = match heap {
                HeapArg::Binary => HeapKind::Binary,
                HeapArg::Bucket => HeapKind::Bucket,
            };
        }
        Ok(policy)
    }
}

fn run(cli: &Cli) -> anyhow::Result<SearchReport> {
    let policy = cli.policy()?;
    let report = match &cli.command {
        Command::Tiles { file } => {
            let cost = cli.cost.tiles();
            let puzzle = load_korf(file, cost)
                .with_context(|| format!("loading tiles instance {}", file.display()))?;
            run_search(&puzzle, "tiles", &policy)?.with_cost_function(cost.to_string())
        }
        Command::Pancakes { file } => {
            let Some(cost) = cli.cost.pancakes() else {
                anyhow::bail!("pancakes support only the unit and heavy cost functions");
            };
            let stack = load_pancakes(file, cost)
                .with_context(|| format!("loading pancake instance {}", file.display()))?;
            run_search(&stack, "pancakes", &policy)?.with_cost_function(cost.to_string())
        }
    };
    Ok(report)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let report = run(&cli)?;
    if cli.json {
        println!("{}", report.to_json().context("serializing report")?);
    } else {
        println!("{report}");
    }
    Ok(())
}
