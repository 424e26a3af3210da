//! Integration tests: CFR on Kuhn poker converges toward Nash equilibrium.
//!
//! Kuhn poker has a known one-parameter equilibrium family, which makes it
//! the standard end-to-end check for a CFR implementation: exploitability
//! must shrink with iterations, and the average strategy must land inside
//! the closed-form family.

use cfr_solver::cfr::evaluator::{expected_value, exploitability};
use cfr_solver::cfr::{CfrSolver, CfrVariant, LogInterval, Player, TrainerConfig};
use cfr_solver::games::kuhn::KuhnPoker;

fn train(iterations: u64, variant: CfrVariant) -> CfrSolver<KuhnPoker> {
    let config = TrainerConfig::new(iterations)
        .with_variant(variant)
        .with_log_interval(LogInterval::Disabled);
    let mut solver = CfrSolver::new(KuhnPoker::new(), config);
    solver.train();
    solver
}

#[test]
fn vanilla_cfr_10k_is_weakly_exploitable() {
    let solver = train(10_000, CfrVariant::Vanilla);
    let policy = solver.average_strategy();
    let exploit = exploitability(solver.game(), &policy);
    assert!(exploit < 0.01, "exploitability {exploit} >= 0.01 chips");
}

#[test]
fn cfr_plus_10k_is_weakly_exploitable() {
    let solver = train(10_000, CfrVariant::Plus);
    let policy = solver.average_strategy();
    let exploit = exploitability(solver.game(), &policy);
    assert!(exploit < 0.01, "exploitability {exploit} >= 0.01 chips");
}

/// One long vanilla run checked against everything we know about the
/// equilibrium: the exploitability bound, P1's game value of -1/18, and the
/// closed-form strategy family parameterized by α = P(bet | Jack).
#[test]
fn vanilla_cfr_100k_reaches_the_equilibrium_family() {
    let solver = train(100_000, CfrVariant::Vanilla);
    let policy = solver.average_strategy();
    let game = solver.game();

    let exploit = exploitability(game, &policy);
    assert!(exploit < 0.002, "exploitability {exploit} >= 0.002 chips");

    let value = expected_value(game, &policy, Player::P1);
    assert!(
        (value - (-1.0 / 18.0)).abs() < 0.005,
        "P1 value {value}, expected -1/18"
    );

    // Root actions are [check, bet]; facing a bet they are [call, fold]
    let bet = |key: &str| policy[key][1];
    let call = |key: &str| policy[key][0];

    // P1 opening: bet J with some α in [0, 1/3], never Q, K with 3α
    let alpha = bet("1:J|");
    assert!(
        (0.0..=1.0 / 3.0 + 0.01).contains(&alpha),
        "alpha {alpha} outside [0, 1/3]"
    );
    assert!(bet("1:Q|") < 0.05, "Q bet {}", bet("1:Q|"));
    assert!(
        (bet("1:K|") - 3.0 * alpha).abs() < 0.05,
        "K bet {} vs 3*alpha {}",
        bet("1:K|"),
        3.0 * alpha
    );

    // P1 facing a check-bet: fold J, call Q with alpha + 1/3, always call K
    assert!(call("1:J|cb") < 0.05);
    assert!((call("1:Q|cb") - (alpha + 1.0 / 3.0)).abs() < 0.05);
    assert!(call("1:K|cb") > 0.95);

    // P2 facing a bet: fold J, call Q with 1/3, always call K
    assert!(call("2:J|b") < 0.05);
    assert!((call("2:Q|b") - 1.0 / 3.0).abs() < 0.05);
    assert!(call("2:K|b") > 0.95);

    // P2 after a check: bluff J with 1/3, never bet Q, always bet K
    assert!((bet("2:J|c") - 1.0 / 3.0).abs() < 0.05);
    assert!(bet("2:Q|c") < 0.05);
    assert!(bet("2:K|c") > 0.95);
}

#[test]
fn repeated_runs_are_bit_identical() {
    for variant in [CfrVariant::Vanilla, CfrVariant::Plus] {
        let a = train(2_000, variant).average_strategy();
        let b = train(2_000, variant).average_strategy();
        assert_eq!(a, b, "{variant} training diverged between runs");
    }
}

#[test]
fn snapshots_are_decoupled_from_further_training() {
    let mut solver = train(1_000, CfrVariant::Vanilla);

    let snapshot = solver.average_strategy();
    let frozen = snapshot.clone();

    for _ in 0..1_000 {
        solver.run_iteration();
    }

    // The earlier snapshot is untouched, while the engine moved on
    assert_eq!(snapshot, frozen);
    assert_ne!(solver.average_strategy(), snapshot);
}

#[test]
fn average_strategies_are_distributions() {
    let solver = train(5_000, CfrVariant::Plus);
    let policy = solver.average_strategy();
    assert_eq!(policy.len(), 12);

    for (info_set, sigma) in &policy {
        let total: f64 = sigma.iter().sum();
        assert!(
            (total - 1.0).abs() < 1e-9,
            "{info_set}: probabilities sum to {total}"
        );
        assert!(sigma.iter().all(|&p| p >= 0.0), "{info_set}: {sigma:?}");
    }
}
