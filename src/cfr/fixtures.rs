//! Miniature games used by the engine's unit tests.
//!
//! Each fixture is small enough to reason about by hand: a single terminal
//! node, a matching-pennies tree with hidden moves, and a variant where P2
//! observes P1's move so every information set is visited exactly once per
//! traversal.

use crate::cfr::error::{violation, ContractViolation};
use crate::cfr::game::{Game, InfoSetId, Player};

/// A game whose root is terminal with a fixed payoff for P1.
#[derive(Debug, Clone)]
pub struct SingleTerminal {
    value: f64,
}

impl SingleTerminal {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Game for SingleTerminal {
    type State = ();
    type Action = u8;

    fn initial_state(&self) -> Self::State {}

    fn is_terminal(&self, _state: &Self::State) -> bool {
        true
    }

    fn current_player(&self, _state: &Self::State) -> Player {
        Player::P1
    }

    fn legal_actions(&self, _state: &Self::State) -> Vec<Self::Action> {
        Vec::new()
    }

    fn transition(&self, _state: &Self::State, _action: &Self::Action) -> Self::State {}

    fn enumerate_chance_transitions(&self, _state: &Self::State) -> Vec<(Self::State, f64)> {
        violation(ContractViolation::InvalidChance(
            "single-terminal game has no chance nodes".to_string(),
        ))
    }

    fn payoffs(&self, _state: &Self::State) -> (f64, f64) {
        (self.value, -self.value)
    }

    fn information_set(&self, _state: &Self::State, observer: Player) -> InfoSetId {
        format!("{}:", observer.seat())
    }
}

/// Matching pennies as a two-ply tree: P1 commits to heads or tails, P2
/// picks without observing, P1 wins on a match.
#[derive(Debug, Clone)]
pub struct MatchingPennies;

impl MatchingPennies {
    pub fn new() -> Self {
        Self
    }
}

impl Game for MatchingPennies {
    type State = String;
    type Action = char;

    fn initial_state(&self) -> Self::State {
        String::new()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.len() == 2
    }

    fn current_player(&self, state: &Self::State) -> Player {
        if state.is_empty() {
            Player::P1
        } else {
            Player::P2
        }
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_terminal(state) {
            Vec::new()
        } else {
            vec!['H', 'T']
        }
    }

    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        let mut next = state.clone();
        next.push(*action);
        next
    }

    fn enumerate_chance_transitions(&self, _state: &Self::State) -> Vec<(Self::State, f64)> {
        violation(ContractViolation::InvalidChance(
            "matching pennies has no chance nodes".to_string(),
        ))
    }

    fn payoffs(&self, state: &Self::State) -> (f64, f64) {
        if !self.is_terminal(state) {
            violation(ContractViolation::InvalidTerminal(format!(
                "payoffs on non-terminal state {state:?}"
            )));
        }
        let bytes = state.as_bytes();
        if bytes[0] == bytes[1] {
            (1.0, -1.0)
        } else {
            (-1.0, 1.0)
        }
    }

    fn information_set(&self, _state: &Self::State, observer: Player) -> InfoSetId {
        // Neither player has observed anything when acting
        format!("{}:", observer.seat())
    }
}

/// Matching pennies where P2 observes P1's move before acting.
///
/// With the move public, the game has three information sets and each is
/// visited exactly once per traversal.
#[derive(Debug, Clone)]
pub struct ObservedPennies;

impl ObservedPennies {
    pub fn new() -> Self {
        Self
    }
}

impl Game for ObservedPennies {
    type State = String;
    type Action = char;

    fn initial_state(&self) -> Self::State {
        String::new()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.len() == 2
    }

    fn current_player(&self, state: &Self::State) -> Player {
        if state.is_empty() {
            Player::P1
        } else {
            Player::P2
        }
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_terminal(state) {
            Vec::new()
        } else {
            vec!['H', 'T']
        }
    }

    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        let mut next = state.clone();
        next.push(*action);
        next
    }

    fn enumerate_chance_transitions(&self, _state: &Self::State) -> Vec<(Self::State, f64)> {
        violation(ContractViolation::InvalidChance(
            "observed pennies has no chance nodes".to_string(),
        ))
    }

    fn payoffs(&self, state: &Self::State) -> (f64, f64) {
        if !self.is_terminal(state) {
            violation(ContractViolation::InvalidTerminal(format!(
                "payoffs on non-terminal state {state:?}"
            )));
        }
        let bytes = state.as_bytes();
        if bytes[0] == bytes[1] {
            (1.0, -1.0)
        } else {
            (-1.0, 1.0)
        }
    }

    fn information_set(&self, state: &Self::State, observer: Player) -> InfoSetId {
        match observer {
            Player::P1 => "1:".to_string(),
            Player::P2 => format!("2:{state}"),
            Player::Chance => violation(ContractViolation::InvalidObserver(
                "chance does not observe".to_string(),
            )),
        }
    }
}
