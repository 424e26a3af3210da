//! The CFR solver: recursive traverser and training loop.
//!
//! [`CfrSolver`] is generic over any game implementing the [`Game`] trait.
//! Each training iteration performs one depth-first traversal from the
//! initial state with unit reach for both players, updating regrets and the
//! average-strategy accumulator for every information set reached. Chance
//! nodes are enumerated in full, so training is deterministic.

use std::time::Instant;

use crate::cfr::config::{TrainStats, TrainerConfig};
use crate::cfr::evaluator;
use crate::cfr::game::{checked_chance_outcomes, Game, Player, Policy};
use crate::cfr::logger::MetricsLogger;
use crate::cfr::storage::{RegretDiagnostics, RegretStorage};

/// A CFR solver bound to one game instance.
///
/// # Example
/// ```
/// use cfr_solver::cfr::{CfrSolver, TrainerConfig};
/// use cfr_solver::games::kuhn::KuhnPoker;
///
/// let mut solver = CfrSolver::new(KuhnPoker::new(), TrainerConfig::new(100));
/// solver.train();
/// let policy = solver.average_strategy();
/// assert_eq!(policy.len(), 12);
/// ```
pub struct CfrSolver<G: Game> {
    /// The game being solved.
    game: G,

    /// Training configuration.
    config: TrainerConfig,

    /// Regret and strategy-sum tables.
    storage: RegretStorage,

    /// 1-based iteration counter; 0 before training starts.
    iteration: u64,

    /// Statistics from the last training run.
    stats: TrainStats,
}

impl<G: Game> CfrSolver<G> {
    /// Create a solver for `game` with the given configuration.
    pub fn new(game: G, config: TrainerConfig) -> Self {
        Self {
            game,
            config,
            storage: RegretStorage::new(),
            iteration: 0,
            stats: TrainStats::default(),
        }
    }

    /// Run the configured number of iterations without metric logging.
    pub fn train(&mut self) -> &TrainStats {
        self.train_with_logger(None)
    }

    /// Run the configured number of iterations, emitting metric records
    /// through `logger` at the configured cadence.
    ///
    /// Each record is `(iteration, policy_value, nash_conv)` where
    /// `policy_value` is P1's expected value under the current average
    /// strategy and `nash_conv` is the summed best-response gap.
    pub fn train_with_logger(&mut self, mut logger: Option<&mut MetricsLogger>) -> &TrainStats {
        let start = Instant::now();
        let n = self.config.num_iterations;
        let log_every = if logger.is_some() {
            self.config.log_interval.resolve(n)
        } else {
            None
        };
        let milestone = if self.config.verbose { (n / 10).max(1) } else { 0 };

        for t in 1..=n {
            self.iteration = t;
            let initial = self.game.initial_state();
            self.traverse(&initial, 1.0, 1.0);

            if let Some(every) = log_every {
                if t % every == 0 {
                    let policy = self.storage.average_strategy();
                    let value = evaluator::expected_value(&self.game, &policy, Player::P1);
                    let conv = evaluator::nash_conv(&self.game, &policy);
                    if let Some(logger) = logger.as_deref_mut() {
                        logger.write_record(t, value, conv);
                    }
                }
            }

            if milestone > 0 && t % milestone == 0 {
                let d = self.regret_diagnostics();
                println!("==== CFR {}% complete. ====", t * 100 / n);
                println!("Avg pos regret / iter = {:.6}", d.avg_pos_regret);
                println!("Max pos regret / iter = {:.6}", d.max_pos_regret);
            }
        }

        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.storage.num_info_sets();
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        self.stats.update_rate();
        &self.stats
    }

    /// Run a single iteration outside the configured loop. The iteration
    /// counter keeps advancing, so CFR+ linear weighting stays consistent.
    pub fn run_iteration(&mut self) {
        self.iteration += 1;
        let initial = self.game.initial_state();
        self.traverse(&initial, 1.0, 1.0);
    }

    /// Core CFR traversal.
    ///
    /// Returns the expected utility pair `(v_P1, v_P2)` of `state` under the
    /// current strategy profile. `reach1`/`reach2` are the players' own
    /// contributions to the probability of reaching `state`; chance mass is
    /// absorbed into the returned values, never into the reach arguments.
    fn traverse(&mut self, state: &G::State, reach1: f64, reach2: f64) -> (f64, f64) {
        if self.game.is_terminal(state) {
            return self.game.payoffs(state);
        }

        let player = self.game.current_player(state);

        if player == Player::Chance {
            let mut value = (0.0, 0.0);
            for (next, prob) in checked_chance_outcomes(&self.game, state) {
                let child = self.traverse(&next, reach1, reach2);
                value.0 += prob * child.0;
                value.1 += prob * child.1;
            }
            return value;
        }

        let actions = self.game.legal_actions(state);
        let info_set = self.game.information_set(state, player);

        let names: Vec<String> = actions.iter().map(|a| self.game.action_name(a)).collect();
        self.storage.ensure(&info_set, &names);

        let sigma = self.storage.current_strategy(&info_set);

        // Average-strategy accumulation, weighted by the acting player's own
        // reach (CFR+ additionally scales by the iteration number)
        let own_reach = if player == Player::P1 { reach1 } else { reach2 };
        let weight = self.config.variant.strategy_weight(own_reach, self.iteration);
        self.storage.update_strategy_sum(&info_set, &sigma, weight);

        let mut util: Vec<(f64, f64)> = Vec::with_capacity(actions.len());
        let mut node = (0.0, 0.0);

        for (a, action) in actions.iter().enumerate() {
            let next = self.game.transition(state, action);
            let child = match player {
                Player::P1 => self.traverse(&next, reach1 * sigma[a], reach2),
                _ => self.traverse(&next, reach1, reach2 * sigma[a]),
            };
            node.0 += sigma[a] * child.0;
            node.1 += sigma[a] * child.1;
            util.push(child);
        }

        // Counterfactual-regret update, weighted by the opponent's reach
        // (chance reach is implicit in the enumerated child values)
        let opp_reach = if player == Player::P1 { reach2 } else { reach1 };
        let deltas: Vec<f64> = match player {
            Player::P1 => util.iter().map(|u| opp_reach * (u.0 - node.0)).collect(),
            _ => util.iter().map(|u| opp_reach * (u.1 - node.1)).collect(),
        };
        self.storage.update_regrets(&info_set, &deltas, self.config.variant);

        node
    }

    /// Snapshot of the current average strategy.
    ///
    /// The returned [`Policy`] is an independent copy; further training does
    /// not mutate it.
    pub fn average_strategy(&self) -> Policy {
        self.storage.average_strategy()
    }

    /// Print the average strategy, ordered by information-set key, with
    /// per-action labels.
    pub fn print_strategies(&self) {
        let policy = self.average_strategy();
        println!("Average strategy by information set:");

        for (info_set, strategy) in &policy {
            println!("InfoSet: {info_set}");
            match self.storage.action_names(info_set) {
                Some(names) => {
                    for (name, p) in names.iter().zip(strategy) {
                        println!("  {name} : {p:.4}");
                    }
                }
                None => {
                    for (i, p) in strategy.iter().enumerate() {
                        println!("  Action {i} : {p:.4}");
                    }
                }
            }
            println!();
        }
    }

    /// Positive-regret descent diagnostics, normalized by iterations run.
    pub fn regret_diagnostics(&self) -> RegretDiagnostics {
        self.storage.regret_diagnostics(self.iteration)
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Information sets discovered so far.
    pub fn num_info_sets(&self) -> usize {
        self.storage.num_info_sets()
    }

    /// Statistics from the last training run.
    pub fn stats(&self) -> &TrainStats {
        &self.stats
    }

    /// The game being solved.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// The training configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Read access to the regret/strategy tables.
    pub fn storage(&self) -> &RegretStorage {
        &self.storage
    }
}
