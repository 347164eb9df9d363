use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tsp_ga::ga::{GaConfig, GaRunner, TracingObserver};
use tsp_ga::tour::CostTable;

fn cli() -> Command {
    Command::new("tsp-ga")
        .about("Searches for a low-cost round trip with a genetic algorithm")
        .arg(
            arg!(<MATRIX> "Path to the whitespace-delimited distance matrix")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--start [START] "Start and end location (defaults to the first header location)")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(--"population-size" [N] "Individuals per generation")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"tournament-size" [K] "Contenders per tournament")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"mutation-probability" [P] "Per-individual mutation probability")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--threshold [COST] "Stop once a tour cheaper than this is found")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--"max-generations" [G] "Generation cap")
                .value_parser(clap::value_parser!(usize))
                .conflicts_with("unbounded"),
        )
        .arg(arg!(--unbounded "Run without a generation cap"))
        .arg(
            arg!(--"time-limit-ms" [MS] "Wall-clock limit in milliseconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(arg!(--seed [SEED] "Random seed").value_parser(clap::value_parser!(u64)))
        .arg(arg!(--parallel "Evaluate fitness in parallel (needs the `parallel` feature)"))
        .arg(arg!(-v --verbose "Log every generation (ignored when RUST_LOG is set)"))
}

fn main() {
    let matches = cli().get_matches();

    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(matches.get_flag("verbose"), env.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Filter from `RUST_LOG` when it parses, else `debug` with `--verbose`
/// and `info` without.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

fn run(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("MATRIX")
        .ok_or_else(|| anyhow!("missing MATRIX"))?;
    let table = CostTable::from_path(path)
        .with_context(|| format!("failed to read distance matrix {}", path.display()))?;

    let start = match matches.get_one::<String>("start") {
        Some(start) => start.clone(),
        None => table
            .locations()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("distance matrix has no locations"))?,
    };

    let config = build_config(matches, start);
    let runner = GaRunner::new(&table, config).context("invalid run configuration")?;
    let result = runner.run(&mut TracingObserver);

    let start = runner.instance().start();
    let tour: Vec<&str> = std::iter::once(start)
        .chain(result.best_tour.iter().map(String::as_str))
        .chain(std::iter::once(start))
        .collect();
    println!("{}", tour.join(" -> "));
    println!(
        "cost {} after {} generations ({:?})",
        result.best_fitness, result.generations, result.termination
    );
    Ok(())
}

fn build_config(matches: &ArgMatches, start: String) -> GaConfig {
    let mut config = GaConfig::new(start).with_parallel(matches.get_flag("parallel"));
    if let Some(&n) = matches.get_one::<usize>("population-size") {
        config = config.with_population_size(n);
    }
    if let Some(&k) = matches.get_one::<usize>("tournament-size") {
        config = config.with_tournament_size(k);
    }
    if let Some(&p) = matches.get_one::<f64>("mutation-probability") {
        // Set directly so out-of-range values are rejected by validation
        config.mutation_probability = p;
    }
    if let Some(&threshold) = matches.get_one::<f64>("threshold") {
        config = config.with_fitness_threshold(threshold);
    }
    if let Some(&g) = matches.get_one::<usize>("max-generations") {
        config = config.with_max_generations(g);
    }
    if matches.get_flag("unbounded") {
        config = config.without_generation_limit();
    }
    if let Some(&ms) = matches.get_one::<u64>("time-limit-ms") {
        config = config.with_time_limit_ms(ms);
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    config
}
