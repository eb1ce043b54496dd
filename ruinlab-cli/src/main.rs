//! RuinLab CLI — Gambler's Ruin studies from the command line.
//!
//! Commands:
//! - `ruin` — simulated vs. theoretical ruin probability for a list of p_a
//! - `split` — ruin probability as A's share of a fixed total varies
//! - `duration` — distribution and mean of the game length vs. theory
//! - `trajectory` — cumulative win counts of a few complete games
//! - `extremes` — LMIN / LMAX / average game length for a list of p_a
//! - `horizon` — distribution of A's capital after N rounds
//! - `run` — execute a study from a TOML config file
//!
//! Tables go to stdout; diagnostics go to stderr via `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ruinlab_core::{Capital, GameParameters, DEFAULT_MAX_ROUNDS};
use ruinlab_runner::{
    BatchRunner, DurationComparison, HorizonPoint, ParamSweep, StudyConfig, StudyReport,
    SweepGrid, SweepPoint,
};

#[derive(Parser)]
#[command(
    name = "ruinlab",
    about = "RuinLab CLI — Gambler's Ruin simulation and closed-form theory"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Master seed for all generated games.
    #[arg(long, global = true, default_value_t = 42)]
    seed: u64,

    /// Round cap per game.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: u64,

    /// Run games on the current thread only.
    #[arg(long, global = true, default_value_t = false)]
    sequential: bool,

    /// Print the serialized result as JSON instead of a table.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulated vs. theoretical ruin probability of A for several p_a.
    Ruin {
        #[arg(long, default_value_t = 50)]
        a: Capital,
        #[arg(long, default_value_t = 50)]
        b: Capital,
        /// Comma-separated probabilities that A wins a round.
        #[arg(long, value_delimiter = ',', default_value = "0.3,0.4,0.5,0.6,0.7")]
        p: Vec<f64>,
        #[arg(long, default_value_t = 10_000)]
        simulations: usize,
    },
    /// Ruin probability as A's share of a fixed total capital varies.
    Split {
        #[arg(long, default_value_t = 100)]
        total: Capital,
        /// Comma-separated starting capitals for A.
        #[arg(long, value_delimiter = ',', default_value = "10,20,30,40,50,60,70,80,90")]
        a: Vec<Capital>,
        #[arg(long, default_value_t = 0.5)]
        p: f64,
        #[arg(long, default_value_t = 10_000)]
        simulations: usize,
    },
    /// Game-length distribution and mean vs. theory.
    Duration {
        #[arg(long, default_value_t = 50)]
        a: Capital,
        #[arg(long, default_value_t = 50)]
        b: Capital,
        #[arg(long, value_delimiter = ',', default_value = "0.2,0.5,0.8")]
        p: Vec<f64>,
        #[arg(long, default_value_t = 10_000)]
        simulations: usize,
        /// Number of most frequent lengths to list.
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Cumulative win counts of complete games.
    Trajectory {
        #[arg(long, default_value_t = 10)]
        a: Capital,
        #[arg(long, default_value_t = 20)]
        total: Capital,
        #[arg(long, value_delimiter = ',', default_value = "0.2,0.5,0.8")]
        p: Vec<f64>,
        /// Games per probability.
        #[arg(long, default_value_t = 3)]
        games: usize,
    },
    /// Shortest, longest and average game length for several p_a.
    Extremes {
        #[arg(long, default_value_t = 50)]
        a: Capital,
        #[arg(long, default_value_t = 50)]
        b: Capital,
        #[arg(long, value_delimiter = ',', default_value = "0.2,0.3,0.4,0.5,0.6,0.7,0.8")]
        p: Vec<f64>,
        #[arg(long, default_value_t = 1_000)]
        simulations: usize,
    },
    /// Distribution of A's capital after N rounds.
    Horizon {
        #[arg(long, default_value_t = 50)]
        a: Capital,
        #[arg(long, default_value_t = 50)]
        b: Capital,
        #[arg(long, default_value_t = 0.2)]
        p: f64,
        /// Comma-separated round counts.
        #[arg(long, value_delimiter = ',', default_value = "1,10,50,60,70,80")]
        n: Vec<u64>,
        #[arg(long, default_value_t = 50_000)]
        simulations: usize,
    },
    /// Execute a study from a TOML config file.
    Run {
        /// Path to a TOML study file.
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let common = cli.common;

    match cli.command {
        Commands::Ruin { a, b, p, simulations } => {
            let grid = SweepGrid::probabilities(a, b, &p)?.with_max_rounds(common.max_rounds)?;
            let points = sweep(&common, simulations).sweep(&grid)?;
            emit(&common, points.as_slice(), print_ruin_table)
        }
        Commands::Split {
            total,
            a,
            p,
            simulations,
        } => {
            let grid =
                SweepGrid::capital_split(total, &a, p)?.with_max_rounds(common.max_rounds)?;
            if grid.is_empty() {
                bail!("no valid split: every a must satisfy 1 <= a < {total}");
            }
            let points = sweep(&common, simulations).sweep(&grid)?;
            emit(&common, points.as_slice(), print_ruin_table)
        }
        Commands::Duration {
            a,
            b,
            p,
            simulations,
            top,
        } => {
            let grid = SweepGrid::probabilities(a, b, &p)?.with_max_rounds(common.max_rounds)?;
            let points = sweep(&common, simulations).sweep(&grid)?;
            if common.json {
                let durations: Vec<&DurationComparison> =
                    points.iter().map(|pt| &pt.duration).collect();
                println!("{}", serde_json::to_string_pretty(&durations)?);
            } else {
                print_duration_report(&points, top);
            }
            Ok(())
        }
        Commands::Trajectory { a, total, p, games } => {
            if a < 1 || a >= total {
                bail!("--a must satisfy 1 <= a < --total");
            }
            let runner = sweep(&common, 1);
            let mut all = Vec::with_capacity(p.len());
            for &pa in &p {
                let params = GameParameters::new(a, total - a, pa, common.max_rounds)?;
                all.push((pa, runner.trajectories(&params, games)?));
            }
            if common.json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                for (pa, outcomes) in &all {
                    println!("p_a = {pa:.2}");
                    for (idx, game) in outcomes.iter().enumerate() {
                        let wins = game.wins_history.as_deref().unwrap_or_default();
                        println!(
                            "  game {}: {} rounds, A {}, wins = {:?}",
                            idx + 1,
                            game.rounds_played,
                            if game.player_a_won { "won" } else { "ruined" },
                            wins
                        );
                    }
                }
            }
            Ok(())
        }
        Commands::Extremes { a, b, p, simulations } => {
            let grid = SweepGrid::probabilities(a, b, &p)?.with_max_rounds(common.max_rounds)?;
            let points = sweep(&common, simulations).sweep(&grid)?;
            if common.json {
                let batches: Vec<_> = points.iter().map(|pt| &pt.batch).collect();
                println!("{}", serde_json::to_string_pretty(&batches)?);
            } else {
                println!("{:>6} {:>10} {:>10} {:>12} {:>8}", "p_a", "LMAX", "LMIN", "Average", "Capped");
                println!("{}", "-".repeat(50));
                for pt in &points {
                    println!(
                        "{:>6.2} {:>10} {:>10} {:>12.2} {:>8}",
                        pt.batch.params.p_a(),
                        pt.batch.max_rounds_observed,
                        pt.batch.min_rounds,
                        pt.batch.average_rounds,
                        pt.batch.capped_games
                    );
                }
            }
            Ok(())
        }
        Commands::Horizon {
            a,
            b,
            p,
            n,
            simulations,
        } => {
            let params = GameParameters::new(a, b, p, common.max_rounds)?;
            let points = sweep(&common, simulations).horizons(&params, &n)?;
            emit(&common, points.as_slice(), print_horizon_report)
        }
        Commands::Run { config } => {
            let study = StudyConfig::from_file(&config)?;
            info!(path = %config.display(), "running study");
            let report = study.run()?;
            if common.json {
                println!("{}", report.to_json_pretty()?);
            } else {
                print_study(&report);
            }
            Ok(())
        }
    }
}

fn sweep(common: &CommonArgs, simulations: usize) -> ParamSweep {
    let runner = BatchRunner::new(common.seed).with_parallelism(!common.sequential);
    ParamSweep::new(runner, simulations).with_parallelism(!common.sequential)
}

fn emit<T: serde::Serialize + ?Sized>(
    common: &CommonArgs,
    value: &T,
    table: impl Fn(&T),
) -> Result<()> {
    if common.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        table(value);
    }
    Ok(())
}

fn print_ruin_table(points: &[SweepPoint]) {
    println!(
        "{:>6} {:>6} {:>6} {:>12} {:>12} {:>10} {:>9}",
        "a", "b", "p_a", "Simulated", "Theory", "AbsErr", "RelErr%"
    );
    println!("{}", "-".repeat(67));
    for pt in points {
        let r = &pt.ruin;
        println!(
            "{:>6} {:>6} {:>6.2} {:>12.6} {:>12.6} {:>10.6} {:>9.2}",
            r.params.a(),
            r.params.b(),
            r.params.p_a(),
            r.simulated,
            r.theoretical,
            r.abs_error,
            r.relative_error_pct
        );
    }
    warn_capped(points);
}

fn print_duration_report(points: &[SweepPoint], top: usize) {
    for pt in points {
        let d = &pt.duration;
        println!("p_a = {:.2}", d.params.p_a());
        println!("  Average (simulated): {:.2} rounds", d.simulated_mean);
        println!("  Average (theory):    {:.2} rounds", d.theoretical);
        println!("  Median:              {:.1}", d.simulated_median);
        println!("  Std dev:             {:.2}", d.simulated_std_dev);
        println!("  Relative error:      {:.2}%", d.relative_error_pct);
        let dist = pt.batch.rounds_distribution();
        println!("  Most common lengths:");
        for (length, count) in dist.top_k(top) {
            println!(
                "    L = {length:>6}: P(L) = {:.4} ({count} games)",
                dist.probability(length)
            );
        }
    }
    warn_capped(points);
}

fn print_horizon_report(points: &[HorizonPoint]) {
    for hp in points {
        let s = &hp.summary;
        println!(
            "N = {}: mean {:.2}, std {:.2}, range [{}, {}]",
            hp.horizon, s.mean, s.std_dev, s.min, s.max
        );
        for (k, prob) in hp.distribution.pmf() {
            println!("  P(k = {k:>4}) = {prob:.5}");
        }
    }
}

fn print_study(report: &StudyReport) {
    let p = &report.params;
    println!();
    println!("=== Study {} ===", &report.study_id[..12.min(report.study_id.len())]);
    println!("Capitals:       a = {}, b = {}", p.a(), p.b());
    println!("p_a:            {}", p.p_a());
    println!("Games:          {}", report.batch.num_simulations);
    println!("Capped:         {}", report.batch.capped_games);
    println!();
    println!("--- Ruin of A ---");
    println!("Simulated:      {:.6}", report.ruin.simulated);
    println!("Theory:         {:.6}", report.ruin.theoretical);
    println!("Abs error:      {:.6}", report.ruin.abs_error);
    println!();
    println!("--- Duration ---");
    println!("Average:        {:.2}", report.duration.simulated_mean);
    println!("Theory:         {:.2}", report.duration.theoretical);
    println!("LMIN / LMAX:    {} / {}", report.batch.min_rounds, report.batch.max_rounds_observed);
    if !report.horizons.is_empty() {
        println!();
        print_horizon_report(&report.horizons);
    }
    println!();
}

fn warn_capped(points: &[SweepPoint]) {
    for pt in points.iter().filter(|pt| pt.batch.capped_games > 0) {
        println!(
            "WARNING: {} of {} games at p_a = {:.2} hit max_rounds",
            pt.batch.capped_games,
            pt.batch.num_simulations,
            pt.batch.params.p_a()
        );
    }
}
