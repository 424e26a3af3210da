//! Policy evaluation: expected value, best response, NashConv.
//!
//! Two deterministic tree walks over a frozen [`Policy`]: the expected value
//! when both players follow the policy, and the value of a single-player
//! deterministic best response against it. Together they yield NashConv and
//! exploitability, the convergence metrics for training.
//!
//! Both walks substitute a uniform strategy wherever the policy has no entry
//! for an information set, or an entry whose length disagrees with the
//! legal-action list.

use crate::cfr::error::{violation, ContractViolation};
use crate::cfr::game::{checked_chance_outcomes, Game, Player, Policy};

/// Expected utility for `hero` when both players play `policy`.
pub fn expected_value<G: Game>(game: &G, policy: &Policy, hero: Player) -> f64 {
    require_hero(hero);
    policy_value_walk(game, &game.initial_state(), policy, hero)
}

/// Expected utility for `hero` playing a deterministic best response while
/// the opponent plays `policy`.
pub fn best_response_value<G: Game>(game: &G, policy: &Policy, hero: Player) -> f64 {
    require_hero(hero);
    best_response_walk(game, &game.initial_state(), policy, hero)
}

/// Sum of both players' best-response values against `policy`.
///
/// Non-negative in zero-sum games; zero iff `policy` is an equilibrium.
pub fn nash_conv<G: Game>(game: &G, policy: &Policy) -> f64 {
    best_response_value(game, policy, Player::P1) + best_response_value(game, policy, Player::P2)
}

/// NashConv divided by the number of players (two).
pub fn exploitability<G: Game>(game: &G, policy: &Policy) -> f64 {
    0.5 * nash_conv(game, policy)
}

fn require_hero(hero: Player) {
    if hero == Player::Chance {
        violation(ContractViolation::InvalidObserver(
            "evaluation hero must be P1 or P2".to_string(),
        ));
    }
}

fn hero_payoff<G: Game>(game: &G, state: &G::State, hero: Player) -> f64 {
    let (u1, u2) = game.payoffs(state);
    if hero == Player::P1 {
        u1
    } else {
        u2
    }
}

fn policy_value_walk<G: Game>(game: &G, state: &G::State, policy: &Policy, hero: Player) -> f64 {
    if game.is_terminal(state) {
        return hero_payoff(game, state, hero);
    }

    let player = game.current_player(state);

    if player == Player::Chance {
        return checked_chance_outcomes(game, state)
            .iter()
            .map(|(next, prob)| prob * policy_value_walk(game, next, policy, hero))
            .sum();
    }

    let actions = game.legal_actions(state);
    let info_set = game.information_set(state, player);

    match policy.get(&info_set).filter(|s| s.len() == actions.len()) {
        Some(sigma) => actions
            .iter()
            .zip(sigma)
            .map(|(action, &p)| {
                p * policy_value_walk(game, &game.transition(state, action), policy, hero)
            })
            .sum(),
        None => {
            // Node the policy does not cover: play uniformly at random
            let uniform = 1.0 / actions.len() as f64;
            actions
                .iter()
                .map(|action| {
                    uniform * policy_value_walk(game, &game.transition(state, action), policy, hero)
                })
                .sum()
        }
    }
}

fn best_response_walk<G: Game>(game: &G, state: &G::State, policy: &Policy, hero: Player) -> f64 {
    if game.is_terminal(state) {
        return hero_payoff(game, state, hero);
    }

    let player = game.current_player(state);

    if player == Player::Chance {
        return checked_chance_outcomes(game, state)
            .iter()
            .map(|(next, prob)| prob * best_response_walk(game, next, policy, hero))
            .sum();
    }

    let actions = game.legal_actions(state);

    if player == hero {
        return actions
            .iter()
            .map(|action| best_response_walk(game, &game.transition(state, action), policy, hero))
            .fold(f64::NEG_INFINITY, f64::max);
    }

    let info_set = game.information_set(state, player);
    match policy.get(&info_set).filter(|s| s.len() == actions.len()) {
        Some(sigma) => actions
            .iter()
            .zip(sigma)
            .map(|(action, &p)| {
                p * best_response_walk(game, &game.transition(state, action), policy, hero)
            })
            .sum(),
        None => {
            let uniform = 1.0 / actions.len() as f64;
            actions
                .iter()
                .map(|action| {
                    uniform * best_response_walk(game, &game.transition(state, action), policy, hero)
                })
                .sum()
        }
    }
}
