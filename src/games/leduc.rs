//! Leduc poker.
//!
//! A two-round poker benchmark, larger than Kuhn but still exactly solvable:
//!
//! - 6-card deck: `J`, `Q`, `K` in two suits (written `J/j`, `Q/q`, `K/k`)
//! - Both players ante 1 chip and receive one private card
//! - Preflop betting round, then a public board card, then a flop round
//! - Fixed raise sizes: 2 preflop, 4 on the flop; one raise per round
//! - At showdown, pairing the board beats everything; otherwise higher rank
//!   wins; equal ranks split the pot
//!
//! Round-local histories use `C` (check/call), `B` (bet), `F` (fold). A
//! round ends on `CC`, `BC`, `CBC` (continue or showdown) or `BF`, `CBF`
//! (fold). P1 opens every round.
//!
//! Information-set keys embed the observer seat, the private card, the board
//! card (`_` before the flop), and both round histories:
//! `"1:J|_|B/"`, `"2:q|K|CC/CB"`.

use std::fmt;

use crate::cfr::error::{violation, ContractViolation};
use crate::cfr::game::{Game, InfoSetId, Player};

/// The six cards. Case encodes the suit; rank comparisons ignore it.
pub const CARDS: [char; 6] = ['J', 'j', 'Q', 'q', 'K', 'k'];

/// Chips each player antes before the deal.
pub const ANTE: f64 = 1.0;
/// Fixed raise size in the preflop round.
pub const PREFLOP_RAISE: f64 = 2.0;
/// Fixed raise size in the flop round.
pub const FLOP_RAISE: f64 = 4.0;

/// Betting rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    /// Before the board card is dealt.
    Preflop,
    /// After the board card is dealt.
    Flop,
}

/// Actions in Leduc poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeducAction {
    /// Bet the round's fixed raise size.
    Bet,
    /// Check when no bet is pending, call when facing a bet.
    Call,
    /// Fold to a bet.
    Fold,
}

impl LeducAction {
    /// History character for this action.
    pub fn as_char(self) -> char {
        match self {
            LeducAction::Bet => 'B',
            LeducAction::Call => 'C',
            LeducAction::Fold => 'F',
        }
    }
}

impl fmt::Display for LeducAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeducAction::Bet => write!(f, "BET (B)"),
            LeducAction::Call => write!(f, "CHECK/CALL (C)"),
            LeducAction::Fold => write!(f, "FOLD (F)"),
        }
    }
}

/// Complete game state in Leduc poker.
#[derive(Debug, Clone, PartialEq)]
pub struct LeducState {
    /// Chips P1 has put in the pot.
    pub p1_contribution: f64,
    /// Chips P2 has put in the pot.
    pub p2_contribution: f64,
    /// Total pot.
    pub pot: f64,
    /// Current betting round.
    pub round: Round,
    /// Preflop betting history.
    pub preflop: String,
    /// Flop betting history.
    pub flop: String,
    /// P1's private card, once dealt.
    pub p1_card: Option<char>,
    /// P2's private card, once dealt.
    pub p2_card: Option<char>,
    /// The public board card, once dealt.
    pub public_card: Option<char>,
    /// Whose turn it is. Starts with chance (the deal).
    pub turn: Player,
}

impl Default for LeducState {
    fn default() -> Self {
        Self {
            p1_contribution: ANTE,
            p2_contribution: ANTE,
            pot: 2.0 * ANTE,
            round: Round::Preflop,
            preflop: String::new(),
            flop: String::new(),
            p1_card: None,
            p2_card: None,
            public_card: None,
            turn: Player::Chance,
        }
    }
}

impl LeducState {
    fn round_history(&self) -> &str {
        match self.round {
            Round::Preflop => &self.preflop,
            Round::Flop => &self.flop,
        }
    }
}

/// Leduc poker game definition.
#[derive(Debug, Clone, Default)]
pub struct LeducPoker;

impl LeducPoker {
    /// Create a Leduc poker game.
    pub fn new() -> Self {
        Self
    }

    fn rank(card: char) -> i32 {
        match card.to_ascii_lowercase() {
            'j' => 0,
            'q' => 1,
            'k' => 2,
            _ => -1,
        }
    }

    /// Showdown strength: pairing the board dominates rank.
    fn hand_strength(private: char, public: char) -> i32 {
        let mut strength = Self::rank(private);
        if private.eq_ignore_ascii_case(&public) {
            strength += 3;
        }
        strength
    }

    fn remaining_deck(state: &LeducState) -> Vec<char> {
        CARDS
            .iter()
            .copied()
            .filter(|&card| {
                state.p1_card != Some(card)
                    && state.p2_card != Some(card)
                    && state.public_card != Some(card)
            })
            .collect()
    }
}

impl Game for LeducPoker {
    type State = LeducState;
    type Action = LeducAction;

    fn initial_state(&self) -> Self::State {
        LeducState::default()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        let h = state.round_history();
        if h == "BF" || h == "CBF" {
            return true;
        }
        state.round == Round::Flop && matches!(h, "CC" | "BC" | "CBC")
    }

    fn current_player(&self, state: &Self::State) -> Player {
        state.turn
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if state.turn == Player::Chance {
            return Vec::new();
        }
        match state.round_history() {
            "" | "C" => vec![LeducAction::Bet, LeducAction::Call],
            "B" | "CB" => vec![LeducAction::Call, LeducAction::Fold],
            _ => Vec::new(),
        }
    }

    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        let mut next = state.clone();

        match state.round {
            Round::Preflop => next.preflop.push(action.as_char()),
            Round::Flop => next.flop.push(action.as_char()),
        }

        match action {
            LeducAction::Bet => {
                let raise = match state.round {
                    Round::Preflop => PREFLOP_RAISE,
                    Round::Flop => FLOP_RAISE,
                };
                match state.turn {
                    Player::P1 => next.p1_contribution += raise,
                    _ => next.p2_contribution += raise,
                }
                next.pot += raise;
            }
            LeducAction::Call => {
                // Zero when checking behind, the outstanding raise otherwise
                let to_call = match state.turn {
                    Player::P1 => state.p2_contribution - state.p1_contribution,
                    _ => state.p1_contribution - state.p2_contribution,
                };
                match state.turn {
                    Player::P1 => next.p1_contribution += to_call,
                    _ => next.p2_contribution += to_call,
                }
                next.pot += to_call;
            }
            LeducAction::Fold => {}
        }

        let h = next.round_history().to_string();
        let round_complete = matches!(h.as_str(), "CC" | "BC" | "CBC" | "BF" | "CBF");
        let fold = matches!(h.as_str(), "BF" | "CBF");

        if !round_complete {
            next.turn = state.turn.opponent();
        } else if state.round == Round::Preflop && !fold {
            // Preflop finished without a fold: deal the board card next
            next.turn = Player::Chance;
        } else {
            next.turn = state.turn.opponent();
        }

        next
    }

    fn enumerate_chance_transitions(&self, state: &Self::State) -> Vec<(Self::State, f64)> {
        if state.p1_card.is_some() && state.p2_card.is_some() && state.public_card.is_some() {
            violation(ContractViolation::InvalidChance(
                "all cards already dealt".to_string(),
            ));
        }

        let deck = Self::remaining_deck(state);
        let prob = 1.0 / deck.len() as f64;

        deck.into_iter()
            .map(|card| {
                let mut next = state.clone();
                if state.p1_card.is_none() {
                    next.p1_card = Some(card);
                    next.turn = Player::Chance; // still dealing P2
                } else if state.p2_card.is_none() {
                    next.p2_card = Some(card);
                    next.turn = Player::P1; // preflop betting opens
                } else {
                    next.public_card = Some(card);
                    next.round = Round::Flop;
                    next.turn = Player::P1; // flop betting opens
                }
                (next, prob)
            })
            .collect()
    }

    fn payoffs(&self, state: &Self::State) -> (f64, f64) {
        let winner = match state.round_history() {
            "CC" | "BC" | "CBC" if state.round == Round::Flop => {
                let p1 = state.p1_card.unwrap_or('?');
                let p2 = state.p2_card.unwrap_or('?');
                let public = state.public_card.unwrap_or('?');
                let p1_strength = Self::hand_strength(p1, public);
                let p2_strength = Self::hand_strength(p2, public);
                if p1_strength > p2_strength {
                    Player::P1
                } else if p2_strength > p1_strength {
                    Player::P2
                } else {
                    return (0.0, 0.0); // split pot
                }
            }
            "BF" => Player::P1,
            "CBF" => Player::P2,
            other => violation(ContractViolation::InvalidTerminal(format!(
                "payoffs requested at non-terminal history {other:?}"
            ))),
        };

        if winner == Player::P1 {
            (state.pot - state.p1_contribution, -state.p2_contribution)
        } else {
            (-state.p1_contribution, state.pot - state.p2_contribution)
        }
    }

    fn information_set(&self, state: &Self::State, observer: Player) -> InfoSetId {
        let private = match observer {
            Player::P1 => state.p1_card,
            Player::P2 => state.p2_card,
            Player::Chance => violation(ContractViolation::InvalidObserver(
                "chance does not observe information sets".to_string(),
            )),
        };
        let private = private.unwrap_or('?');
        let public = state.public_card.unwrap_or('_');

        format!(
            "{}:{}|{}|{}/{}",
            observer.seat(),
            private,
            public,
            state.preflop,
            state.flop
        )
    }

    fn action_name(&self, action: &Self::Action) -> String {
        action.to_string()
    }
}
