//! Contract violations raised by the engine.
//!
//! The engine has no user-recoverable errors: every failure here is a
//! programmer error in a game implementation or in engine usage. The
//! propagation policy is surface-and-abort — violations panic with the
//! formatted violation rather than threading `Result`s through the hot
//! traversal loop.

use std::fmt;

/// A broken precondition of the game interface or the engine tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// `payoffs` was called on a non-terminal state, or `is_terminal`
    /// disagreed with `payoffs`.
    InvalidTerminal(String),
    /// `enumerate_chance_transitions` was called outside a chance node, or
    /// the outcome probabilities do not form a distribution.
    InvalidChance(String),
    /// `information_set` was queried for an observer other than P1/P2.
    InvalidObserver(String),
    /// The legal-action list for a known information set changed length
    /// between visits.
    LegalActionsChanged {
        /// The offending information set.
        info_set: String,
        /// Action count recorded on first visit.
        stored: usize,
        /// Action count observed now.
        observed: usize,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::InvalidTerminal(detail) => {
                write!(f, "invalid terminal: {detail}")
            }
            ContractViolation::InvalidChance(detail) => {
                write!(f, "invalid chance node: {detail}")
            }
            ContractViolation::InvalidObserver(detail) => {
                write!(f, "invalid observer: {detail}")
            }
            ContractViolation::LegalActionsChanged {
                info_set,
                stored,
                observed,
            } => write!(
                f,
                "legal actions changed for info set {info_set}: {stored} actions on first visit, {observed} now"
            ),
        }
    }
}

impl std::error::Error for ContractViolation {}

/// Abort on a contract violation.
///
/// All violations are fatal; there is nothing for a caller to recover.
pub fn violation(v: ContractViolation) -> ! {
    panic!("{v}")
}
