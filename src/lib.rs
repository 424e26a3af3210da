//! # cfr-solver
//!
//! A generic Counterfactual Regret Minimization (CFR) solver for computing
//! approximate Nash equilibrium strategies in two-player zero-sum
//! imperfect-information extensive-form games.
//!
//! ## Features
//!
//! - **Generic CFR engine**: works with any game implementing the [`Game`] trait
//! - **Full chance enumeration**: deterministic, no sampling
//! - **Two variants**: vanilla CFR and CFR+ (regret flooring + linear averaging)
//! - **Evaluation**: expected value, best response, NashConv, exploitability
//! - **Metrics logging**: CSV records of `(iteration, policy_value, nash_conv)`
//!
//! ## Quick Start
//!
//! ```
//! use cfr_solver::cfr::{CfrSolver, CfrVariant, TrainerConfig};
//! use cfr_solver::games::kuhn::KuhnPoker;
//!
//! let config = TrainerConfig::new(1_000).with_variant(CfrVariant::Plus);
//! let mut solver = CfrSolver::new(KuhnPoker::new(), config);
//! solver.train();
//!
//! let policy = solver.average_strategy();
//! let sigma = &policy["1:J|"];
//! assert!((sigma.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: Core CFR engine, evaluator, and trainer
//! - [`games`]: Game implementations (Kuhn poker, Leduc poker)

#![warn(missing_docs)]

/// CFR (Counterfactual Regret Minimization) engine module.
///
/// This is the core module containing the generic solver and evaluator.
pub mod cfr;

/// Game implementations module.
///
/// Contains the games shipped with the solver (Kuhn poker, Leduc poker).
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use cfr::{CfrSolver, CfrVariant, Game, Player, Policy, Strategy, TrainerConfig};
