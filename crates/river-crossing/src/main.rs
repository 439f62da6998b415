//! CLI entry point for the river-crossing solver.
//!
//! Usage:
//!   river-crossing solve [--instance <name> | --file <instance.json> | --stdin] [options]
//!   river-crossing list
//!
//! Options:
//!   --algorithm <bfs|ids|both>  Search strategy (default: both)
//!   --max-depth <n>             Largest IDS depth bound (default: 64)
//!   --json                      Print JSON instead of the text report
//!
//! Without an instance source, every built-in instance is solved.
//! Set `RUST_LOG=river_crossing=debug` to trace the searches on stderr.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use river_crossing::{
    render_text, solve, Algorithm, ConfigError, Instance, RunReport, SolverConfig,
    BUILTIN_INSTANCES, DEFAULT_MAX_DEPTH_CAP,
};

#[derive(Parser)]
#[command(name = "river-crossing")]
#[command(about = "Solve river-crossing puzzles with BFS and iterative deepening")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one instance, or every built-in instance
    Solve {
        /// Built-in instance key (see `list`)
        #[arg(long, conflicts_with_all = ["file", "stdin"])]
        instance: Option<String>,

        /// Path to an instance JSON file
        #[arg(long, value_name = "FILE", conflicts_with = "stdin")]
        file: Option<PathBuf>,

        /// Read instance JSON from stdin
        #[arg(long)]
        stdin: bool,

        /// Search strategy to run
        #[arg(long, value_enum, default_value = "both")]
        algorithm: AlgorithmChoice,

        /// Largest depth bound tried by IDS
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH_CAP)]
        max_depth: usize,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// List the built-in instances
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmChoice {
    Bfs,
    Ids,
    Both,
}

impl AlgorithmChoice {
    fn algorithms(self) -> &'static [Algorithm] {
        match self {
            AlgorithmChoice::Bfs => &[Algorithm::Bfs],
            AlgorithmChoice::Ids => &[Algorithm::Ids],
            AlgorithmChoice::Both => &[Algorithm::Bfs, Algorithm::Ids],
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_instances(
    instance: Option<String>,
    file: Option<PathBuf>,
    stdin: bool,
) -> Result<Vec<Instance>, ConfigError> {
    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(vec![Instance::from_json_str(&buffer)?]);
    }
    if let Some(path) = file {
        return Ok(vec![Instance::from_json_file(path)?]);
    }
    match instance {
        Some(key) => Ok(vec![Instance::builtin(&key)?]),
        None => Ok(BUILTIN_INSTANCES.iter().map(|(_, build)| build()).collect()),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            instance,
            file,
            stdin,
            algorithm,
            max_depth,
            json,
        } => {
            let instances = match load_instances(instance, file, stdin) {
                Ok(instances) => instances,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(2);
                }
            };

            let config = SolverConfig {
                max_depth_cap: max_depth,
            };

            let mut all_solved = true;
            let mut reports = Vec::new();
            for instance in &instances {
                for &algorithm in algorithm.algorithms() {
                    let result = solve(instance, algorithm, &config);
                    all_solved &= result.is_solved();
                    if json {
                        reports.push(RunReport::new(instance, algorithm, &result));
                    } else {
                        println!();
                        print!("{}", render_text(instance, algorithm, &result));
                    }
                }
            }

            if json {
                match serde_json::to_string_pretty(&reports) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error: failed to encode report: {}", e);
                        process::exit(2);
                    }
                }
            }

            process::exit(if all_solved { 0 } else { 1 });
        }
        Commands::List => {
            for (key, build) in BUILTIN_INSTANCES {
                let instance = build();
                let pairs: Vec<String> = instance
                    .forbidden_pairs()
                    .iter()
                    .map(|pair| {
                        let (a, b) = pair.members();
                        format!("{}+{}", instance.item_name(a), instance.item_name(b))
                    })
                    .collect();
                println!(
                    "{:<12} {} | items: {} | forbidden: {}",
                    key,
                    instance.name(),
                    instance.items().join(", "),
                    pairs.join(", ")
                );
            }
        }
    }
}
