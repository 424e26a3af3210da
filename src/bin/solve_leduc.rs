//! Leduc poker CFR trainer.
//!
//! Usage:
//!   cargo run --release --bin solve_leduc -- [OPTIONS]
//!
//! Options:
//!   -i, --iterations <N>     Iterations to run (default: 1000000)
//!   -v, --variant <NAME>     CFR variant: vanilla | plus (default: plus)
//!   -l, --log <FILE>         Write CSV metrics (iteration,policy_value,nash_conv)
//!       --config <FILE>      Load a TrainerConfig JSON file instead of flags
//!       --verbose            Print milestones and regret diagnostics

use std::env;
use std::process;

use cfr_solver::cfr::evaluator;
use cfr_solver::cfr::{CfrSolver, CfrVariant, MetricsLogger, Player, TrainerConfig};
use cfr_solver::games::leduc::LeducPoker;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut iterations = 1_000_000u64;
    let mut variant = CfrVariant::Plus;
    let mut log_path: Option<String> = None;
    let mut config_file: Option<String> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--iterations" | "-i" => {
                i += 1;
                if i < args.len() {
                    iterations = args[i].parse().unwrap_or(iterations);
                }
            }
            "--variant" | "-v" => {
                i += 1;
                if i < args.len() {
                    match args[i].parse() {
                        Ok(v) => variant = v,
                        Err(err) => {
                            eprintln!("{err}");
                            process::exit(1);
                        }
                    }
                }
            }
            "--log" | "-l" => {
                i += 1;
                if i < args.len() {
                    log_path = Some(args[i].clone());
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            }
            "--verbose" => {
                verbose = true;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_file {
        Some(path) => match TrainerConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config {path}: {err}");
                process::exit(1);
            }
        },
        None => TrainerConfig::new(iterations)
            .with_variant(variant)
            .with_verbose(verbose),
    };

    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {err}");
        process::exit(1);
    }

    println!("Leduc poker | {} CFR | {} iterations", config.variant, config.num_iterations);
    println!();

    let mut solver = CfrSolver::new(LeducPoker::new(), config);

    let stats = match log_path {
        Some(path) => {
            let mut logger = match MetricsLogger::create(&path) {
                Ok(logger) => logger,
                Err(err) => {
                    eprintln!("Error creating log file {path}: {err}");
                    process::exit(1);
                }
            };
            solver.train_with_logger(Some(&mut logger)).clone()
        }
        None => solver.train().clone(),
    };

    println!("Training complete.");
    println!(
        "{} iterations | {} info sets | {:.2}s | {:.0} it/s",
        stats.iterations, stats.info_sets, stats.elapsed_seconds, stats.iterations_per_second
    );

    let policy = solver.average_strategy();
    println!(
        "Policy value (P1): {:.6}",
        evaluator::expected_value(solver.game(), &policy, Player::P1)
    );
    println!(
        "Exploitability: {:.6}",
        evaluator::exploitability(solver.game(), &policy)
    );
    println!();

    solver.print_strategies();
}

fn print_help() {
    println!("Leduc poker CFR trainer");
    println!();
    println!("Usage: solve_leduc [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -i, --iterations <N>     Iterations to run (default: 1000000)");
    println!("  -v, --variant <NAME>     CFR variant: vanilla | plus (default: plus)");
    println!("  -l, --log <FILE>         Write CSV metrics to FILE");
    println!("      --config <FILE>      Load a TrainerConfig JSON file");
    println!("      --verbose            Print milestones and regret diagnostics");
    println!("  -h, --help               Show this help");
}
