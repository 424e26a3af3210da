//! CFR (Counterfactual Regret Minimization) engine module.
//!
//! This module provides a generic, full-tree implementation of the CFR
//! algorithm family for computing approximate Nash equilibrium strategies in
//! two-player zero-sum extensive-form games.
//!
//! # Overview
//!
//! CFR is an iterative algorithm that converges to Nash equilibrium by:
//! 1. Computing counterfactual regret for each action at each information set
//! 2. Deriving the next strategy from accumulated regrets (regret matching)
//! 3. Averaging strategies across iterations; the average converges
//!
//! # Supported Variants
//!
//! - **Vanilla CFR**: plain regret accumulation, reach-weighted averaging
//! - **CFR+**: cumulative regrets floored at zero after every update, linear
//!   (iteration-weighted) averaging
//!
//! Both variants perform simultaneous two-player updates within each
//! traversal and enumerate chance nodes exhaustively, so training is fully
//! deterministic for a fixed game, variant, and iteration count.
//!
//! # Usage
//!
//! 1. Implement the [`Game`] trait for your game
//! 2. Create a [`CfrSolver`] with the game and a [`TrainerConfig`]
//! 3. Call `train()` to run iterations
//! 4. Extract the average strategy with `average_strategy()`
//! 5. Measure quality with [`evaluator::exploitability`]
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Tammelin, O. "Solving Large Imperfect Information Games Using CFR+" (2014)

pub mod config;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod logger;
pub mod solver;
pub mod storage;
pub mod variant;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export main types for convenient access
pub use config::{ConfigError, LogInterval, TrainStats, TrainerConfig};
pub use error::ContractViolation;
pub use game::{Game, InfoSetId, Player, Policy, Strategy};
pub use logger::MetricsLogger;
pub use solver::CfrSolver;
pub use storage::{regret_match, RegretDiagnostics, RegretStorage};
pub use variant::CfrVariant;
