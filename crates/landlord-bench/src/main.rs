use std::path::PathBuf;

use clap::Parser;

use landlord_bench::config::{BenchmarkConfig, ResolvedOutputs};
use landlord_bench::logging::init_logging;
use landlord_bench::tournament::TournamentRunner;

/// Tournament harness for landlord bots.
#[derive(Debug, Parser)]
#[command(
    name = "landlord-bench",
    author,
    version,
    about = "Deterministic landlord tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of deals to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of seat rotations per deal.
    #[arg(long, value_name = "COUNT")]
    rotations: Option<usize>,

    /// Override the number of shuffled-together decks.
    #[arg(long, value_name = "COPIES")]
    deck_copies: Option<u8>,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.games = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(rotations) = cli.rotations {
        config.games.rotations = rotations;
    }

    if let Some(copies) = cli.deck_copies {
        config.table.deck_copies = copies;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let agent_count = config.agents.len();
    let run_id = config.run_id.clone();
    let games = config.games.games;
    let rotations = config.games.rotations;

    println!(
        "Loaded configuration '{run_id}' with {agent_count} agents ({games} deals, {rotations} rotation{})",
        if rotations == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} deals × {} rotations → {} rows at {}",
        summary.games_played,
        summary.rotations,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    for agent in summary.standings.ranked() {
        println!(
            "  {:<16} {:>5} wins / {:<5} ({:.1}%)",
            agent.name,
            agent.wins,
            agent.games,
            agent.win_rate() * 100.0
        );
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
