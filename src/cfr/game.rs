//! Game trait definition for the CFR engine.
//!
//! Any two-player zero-sum extensive-form game that implements the [`Game`]
//! trait can be solved and evaluated. The trait is the only coupling between
//! the engine and a concrete game.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Debug;

use crate::cfr::error::{violation, ContractViolation};

/// Identifier of an information set.
///
/// Produced by [`Game::information_set`]. Two states must map to the same id
/// iff they are indistinguishable to the observer, and the id must embed the
/// observer so the two players' information sets never collide. String keys
/// give a total order for free, which the final strategy dump relies on.
pub type InfoSetId = String;

/// A mixed strategy at one information set: one probability per legal action,
/// in legal-action order, summing to 1.
pub type Strategy = Vec<f64>;

/// An average-strategy snapshot: information set → mixed strategy.
///
/// Ordered by infoset key so iteration is deterministic.
pub type Policy = BTreeMap<InfoSetId, Strategy>;

/// A participant in the game tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// First learning player. Acts on the `reach1` reach probability.
    P1,
    /// Second learning player.
    P2,
    /// Nature. Chance nodes are enumerated exhaustively, never sampled.
    Chance,
}

impl Player {
    /// The other learning player.
    ///
    /// Calling this on [`Player::Chance`] is a programmer error.
    pub fn opponent(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
            Player::Chance => violation(ContractViolation::InvalidObserver(
                "chance player has no opponent".to_string(),
            )),
        }
    }

    /// Seat number used in information-set keys: 1 for P1, 2 for P2.
    pub fn seat(self) -> usize {
        match self {
            Player::P1 => 1,
            Player::P2 => 2,
            Player::Chance => violation(ContractViolation::InvalidObserver(
                "chance player has no seat".to_string(),
            )),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::P1 => write!(f, "P1"),
            Player::P2 => write!(f, "P2"),
            Player::Chance => write!(f, "chance"),
        }
    }
}

/// Interface the engine requires of any game.
///
/// Implementations must be deterministic: for a fixed state the same legal
/// actions (content and order), the same chance outcomes, and the same
/// information-set keys on every call. Action position in the legal-action
/// list is the identity used by all accumulators.
pub trait Game: Clone {
    /// Complete description of a node in the game tree, including private
    /// information the players may not see.
    type State: Clone + Debug;

    /// An action a player can take at a decision node.
    type Action: Clone + Eq + Debug;

    /// The root of the game tree.
    fn initial_state(&self) -> Self::State;

    /// Whether the game is over at `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Who acts at `state`: [`Player::P1`], [`Player::P2`], or
    /// [`Player::Chance`].
    fn current_player(&self, state: &Self::State) -> Player;

    /// Actions available to the current player, in a fixed deterministic
    /// order. Empty iff `state` is terminal; undefined at chance nodes.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply a decision-player action, returning the successor state.
    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// All outgoing chance transitions with their probabilities.
    ///
    /// Required at chance nodes. Probabilities must be non-negative and sum
    /// to 1; the engine validates the sum and aborts on violation.
    fn enumerate_chance_transitions(&self, state: &Self::State) -> Vec<(Self::State, f64)>;

    /// Terminal payoff pair `(u_P1, u_P2)`, with `u_P1 + u_P2 = 0`.
    ///
    /// Calling this on a non-terminal state is a programmer error
    /// ([`ContractViolation::InvalidTerminal`]).
    fn payoffs(&self, state: &Self::State) -> (f64, f64);

    /// Information-set key for `observer` at `state`.
    ///
    /// Must be identical across all states indistinguishable to `observer`
    /// and distinct otherwise, and must embed the observer's identity.
    /// `observer` must be P1 or P2 ([`ContractViolation::InvalidObserver`]).
    fn information_set(&self, state: &Self::State, observer: Player) -> InfoSetId;

    /// Human-readable label for an action, used in strategy dumps.
    fn action_name(&self, action: &Self::Action) -> String {
        format!("{:?}", action)
    }
}

/// Tolerance on the sum of a chance node's outcome probabilities.
pub(crate) const CHANCE_SUM_TOLERANCE: f64 = 1e-9;

/// Enumerate chance outcomes and validate the distribution.
///
/// Aborts with [`ContractViolation::InvalidChance`] if any probability is
/// negative or the sum strays from 1 beyond tolerance.
pub(crate) fn checked_chance_outcomes<G: Game>(
    game: &G,
    state: &G::State,
) -> Vec<(G::State, f64)> {
    let outcomes = game.enumerate_chance_transitions(state);
    let mut total = 0.0;
    for (_, prob) in &outcomes {
        if *prob < 0.0 {
            violation(ContractViolation::InvalidChance(format!(
                "negative chance probability {prob}"
            )));
        }
        total += prob;
    }
    if (total - 1.0).abs() > CHANCE_SUM_TOLERANCE {
        violation(ContractViolation::InvalidChance(format!(
            "chance probabilities sum to {total}, expected 1"
        )));
    }
    outcomes
}
