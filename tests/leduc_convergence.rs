//! Integration tests: CFR+ on Leduc poker.
//!
//! Leduc is too large for closed-form strategy checks, so these tests work
//! from exploitability alone. The full million-iteration convergence run
//! takes minutes and is ignored by default:
//!
//! ```text
//! cargo test --release --test leduc_convergence -- --ignored
//! ```

use cfr_solver::cfr::evaluator::exploitability;
use cfr_solver::cfr::{CfrSolver, CfrVariant, LogInterval, Policy, TrainerConfig};
use cfr_solver::games::leduc::LeducPoker;

fn train(iterations: u64, variant: CfrVariant) -> CfrSolver<LeducPoker> {
    let config = TrainerConfig::new(iterations)
        .with_variant(variant)
        .with_log_interval(LogInterval::Disabled);
    let mut solver = CfrSolver::new(LeducPoker::new(), config);
    solver.train();
    solver
}

#[test]
fn discovers_the_full_information_set_space() {
    let solver = train(1, CfrVariant::Plus);
    // Per player: 6 cards x 2 preflop positions, plus
    // 6 cards x 5 boards x 3 preflop continuations x 2 flop positions
    assert_eq!(solver.num_info_sets(), 2 * (6 * 2 + 6 * 5 * 3 * 2));
}

#[test]
fn cfr_plus_rapidly_beats_uniform_play() {
    let game = LeducPoker::new();
    let uniform_exploit = exploitability(&game, &Policy::new());

    let solver = train(1_000, CfrVariant::Plus);
    let trained_exploit = exploitability(solver.game(), &solver.average_strategy());

    assert!(
        trained_exploit < uniform_exploit / 2.0,
        "trained {trained_exploit} vs uniform {uniform_exploit}"
    );
}

#[test]
fn cfr_plus_regret_table_stays_non_negative() {
    let solver = train(500, CfrVariant::Plus);
    for (info_set, regrets) in solver.storage().iter_regrets() {
        assert!(
            regrets.iter().all(|&r| r >= 0.0),
            "{info_set} has negative regret: {regrets:?}"
        );
    }
}

#[test]
fn average_strategies_are_distributions() {
    let solver = train(200, CfrVariant::Plus);
    let policy = solver.average_strategy();
    for (info_set, sigma) in &policy {
        let total: f64 = sigma.iter().sum();
        assert!(
            (total - 1.0).abs() < 1e-9,
            "{info_set}: probabilities sum to {total}"
        );
        assert!(sigma.iter().all(|&p| p >= 0.0), "{info_set}: {sigma:?}");
    }
}

#[test]
#[ignore = "million-iteration run, minutes in release mode"]
fn cfr_plus_1m_converges_below_five_hundredths() {
    let solver = train(1_000_000, CfrVariant::Plus);
    let exploit = exploitability(solver.game(), &solver.average_strategy());
    assert!(exploit < 0.05, "exploitability {exploit} >= 0.05 chips");
}
