use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use shared::protocol::{CatalogContract, SearcherList};
use solver::{evaluation::Evaluator, searcher_by_name, searcher_names};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the action catalog contract as JSON.
    Catalog,
    /// Print the searchers this build offers.
    Searchers,
    /// Solve random scrambles at several depths and report success rates.
    Evaluate {
        #[arg(long, default_value = "bfs")]
        searcher: String,
        #[arg(long, default_value_t = 20)]
        games: usize,
        #[arg(long, default_value_t = 1.0)]
        time_limit_secs: f64,
        #[arg(long, value_delimiter = ',', default_value = "1,2,3,4")]
        depths: Vec<usize>,
        #[arg(long)]
        max_states: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    match cli.command {
        Command::Catalog => {
            println!("{}", serde_json::to_string_pretty(&CatalogContract::local())?);
        }
        Command::Searchers => {
            let list = SearcherList {
                searchers: searcher_names(),
            };
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        Command::Evaluate {
            searcher,
            games,
            time_limit_secs,
            depths,
            max_states,
            seed,
        } => {
            ensure!(
                time_limit_secs.is_finite() && time_limit_secs > 0.0,
                "time limit must be positive"
            );
            let mut searcher = searcher_by_name(&searcher)?;
            let time_limit = Duration::try_from_secs_f64(time_limit_secs)?;
            let evaluator = Evaluator::new(games, time_limit, depths)
                .with_max_states(max_states);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let reports = evaluator.evaluate(searcher.as_mut(), &mut rng);
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}
