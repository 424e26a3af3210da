//! Kuhn poker.
//!
//! The classic 3-card validation game for CFR implementations:
//!
//! - Cards `J`, `Q`, `K`; each player antes 1 chip and receives one card
//! - One betting round: P1 may check or bet 1; facing a bet, a player may
//!   call or fold
//! - Higher card wins at showdown
//!
//! Terminal histories are `cc`, `bc`, `bf`, `cbc`, `cbf` (`c` = check/call,
//! `b` = bet, `f` = fold).
//!
//! ## Known Nash Equilibrium
//!
//! Kuhn poker has a one-parameter equilibrium family: at the root P1 bets
//! the Jack with probability α ∈ [0, 1/3], never bets the Queen, and bets
//! the King with probability 3α. P1's equilibrium value is −1/18.
//!
//! Information-set keys embed the observer seat so the two players' sets
//! can never collide: `"1:J|"`, `"2:Q|b"`, `"1:K|cb"`.

use std::fmt;

use crate::cfr::error::{violation, ContractViolation};
use crate::cfr::game::{Game, InfoSetId, Player};

/// The three cards, in rank order.
pub const CARDS: [char; 3] = ['J', 'Q', 'K'];

/// Actions in Kuhn poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KuhnAction {
    /// Check when no bet is pending, call when facing a bet.
    Call,
    /// Bet one chip.
    Bet,
    /// Fold to a bet.
    Fold,
}

impl KuhnAction {
    /// History character for this action.
    pub fn as_char(self) -> char {
        match self {
            KuhnAction::Call => 'c',
            KuhnAction::Bet => 'b',
            KuhnAction::Fold => 'f',
        }
    }
}

impl fmt::Display for KuhnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KuhnAction::Call => write!(f, "CHECK/CALL (c)"),
            KuhnAction::Bet => write!(f, "BET (b)"),
            KuhnAction::Fold => write!(f, "FOLD (f)"),
        }
    }
}

/// Complete game state in Kuhn poker.
#[derive(Debug, Clone, PartialEq)]
pub struct KuhnState {
    /// Cards dealt so far, seat order: index 0 is P1's card.
    pub cards: String,
    /// Betting history as action characters.
    pub history: String,
    /// Chips P1 has put in the pot.
    pub p1_contribution: f64,
    /// Chips P2 has put in the pot.
    pub p2_contribution: f64,
    /// Total pot.
    pub pot: f64,
}

impl Default for KuhnState {
    fn default() -> Self {
        // Both players ante one chip before the deal
        Self {
            cards: String::new(),
            history: String::new(),
            p1_contribution: 1.0,
            p2_contribution: 1.0,
            pot: 2.0,
        }
    }
}

/// Kuhn poker game definition.
#[derive(Debug, Clone, Default)]
pub struct KuhnPoker;

impl KuhnPoker {
    /// Create a Kuhn poker game.
    pub fn new() -> Self {
        Self
    }

    fn card_rank(card: char) -> i32 {
        match card {
            'J' => 0,
            'Q' => 1,
            'K' => 2,
            _ => -1,
        }
    }

    fn seat_card(state: &KuhnState, observer: Player) -> char {
        state
            .cards
            .chars()
            .nth(observer.seat() - 1)
            .unwrap_or('?')
    }
}

impl Game for KuhnPoker {
    type State = KuhnState;
    type Action = KuhnAction;

    fn initial_state(&self) -> Self::State {
        KuhnState::default()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        matches!(state.history.as_str(), "cc" | "bc" | "bf" | "cbc" | "cbf")
    }

    fn current_player(&self, state: &Self::State) -> Player {
        if state.cards.len() < 2 {
            return Player::Chance;
        }
        if state.history.len() % 2 == 0 {
            Player::P1
        } else {
            Player::P2
        }
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        match state.history.as_str() {
            "" | "c" => vec![KuhnAction::Call, KuhnAction::Bet],
            "b" | "cb" => vec![KuhnAction::Call, KuhnAction::Fold],
            _ => Vec::new(),
        }
    }

    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        let mut next = state.clone();
        next.history.push(action.as_char());

        // A bet puts in one chip; a call matches a pending bet
        let facing_bet = matches!(state.history.as_str(), "b" | "cb");
        let pays = *action == KuhnAction::Bet || (*action == KuhnAction::Call && facing_bet);
        if pays {
            match self.current_player(state) {
                Player::P1 => next.p1_contribution += 1.0,
                _ => next.p2_contribution += 1.0,
            }
            next.pot += 1.0;
        }

        next
    }

    fn enumerate_chance_transitions(&self, state: &Self::State) -> Vec<(Self::State, f64)> {
        match state.cards.len() {
            0 => CARDS
                .iter()
                .map(|&card| {
                    let mut next = state.clone();
                    next.cards.push(card);
                    (next, 1.0 / 3.0)
                })
                .collect(),
            1 => {
                let p1_card = state.cards.chars().next().unwrap_or('?');
                CARDS
                    .iter()
                    .filter(|&&card| card != p1_card)
                    .map(|&card| {
                        let mut next = state.clone();
                        next.cards.push(card);
                        (next, 0.5)
                    })
                    .collect()
            }
            _ => violation(ContractViolation::InvalidChance(
                "both cards already dealt".to_string(),
            )),
        }
    }

    fn payoffs(&self, state: &Self::State) -> (f64, f64) {
        let winner = match state.history.as_str() {
            "cc" | "bc" | "cbc" => {
                let mut cards = state.cards.chars();
                let p1_rank = Self::card_rank(cards.next().unwrap_or('?'));
                let p2_rank = Self::card_rank(cards.next().unwrap_or('?'));
                if p1_rank > p2_rank {
                    Player::P1
                } else {
                    Player::P2
                }
            }
            "bf" => Player::P1,
            "cbf" => Player::P2,
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
        if observer == Player::Chance {
            violation(ContractViolation::InvalidObserver(
                "chance does not observe information sets".to_string(),
            ));
        }
        format!(
            "{}:{}|{}",
            observer.seat(),
            Self::seat_card(state, observer),
            state.history
        )
    }

    fn action_name(&self, action: &Self::Action) -> String {
        action.to_string()
    }
}
