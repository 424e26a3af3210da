//! Storage for cumulative regrets and strategy sums.
//!
//! [`RegretStorage`] owns the two tables CFR accumulates into, keyed by
//! information set:
//!
//! - **Regrets**: cumulative counterfactual regret per action
//! - **Strategy sums**: reach-weighted strategy mass per action, normalized
//!   into the average strategy
//!
//! Entries are materialized lazily on first visit and never removed. A
//! single `ensure` call sizes the regret vector, the strategy-sum vector,
//! and the cached action labels together, so the three always agree in
//! length for every information set.

use rustc_hash::FxHashMap;

use crate::cfr::error::{violation, ContractViolation};
use crate::cfr::game::{InfoSetId, Policy, Strategy};
use crate::cfr::variant::CfrVariant;

/// Regret matching: derive a mixed strategy from a cumulative regret vector.
///
/// The strategy is proportional to positive regrets. If no regret is
/// positive (including the first-visit all-zero case) the strategy is
/// uniform. Pure function; total positive regret of exactly `0.0` dispatches
/// to uniform with no epsilon threshold.
pub fn regret_match(regrets: &[f64]) -> Strategy {
    let mut sigma: Strategy = regrets.iter().map(|&r| r.max(0.0)).collect();
    let total: f64 = sigma.iter().sum();

    if total > 0.0 {
        for p in &mut sigma {
            *p /= total;
        }
    } else if !sigma.is_empty() {
        let uniform = 1.0 / sigma.len() as f64;
        sigma.fill(uniform);
    }

    sigma
}

/// Positive-regret descent diagnostics, normalized by iteration count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegretDiagnostics {
    /// Sum of positive regret over all table entries, per iteration.
    pub avg_pos_regret: f64,
    /// Largest positive regret in the table, per iteration.
    pub max_pos_regret: f64,
}

/// The regret and strategy-sum tables owned by the solver.
///
/// Mutated exclusively by the traverser during training; readers get owned
/// copies, never aliases into the tables.
#[derive(Debug, Clone, Default)]
pub struct RegretStorage {
    /// Cumulative regrets: info set → per-action regret.
    regrets: FxHashMap<InfoSetId, Vec<f64>>,

    /// Cumulative strategy mass: info set → per-action weighted sum.
    strategy_sums: FxHashMap<InfoSetId, Vec<f64>>,

    /// Action labels recorded on first visit, for strategy dumps.
    action_names: FxHashMap<InfoSetId, Vec<String>>,
}

impl RegretStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize the entry for `info_set` if absent, sizing all three
    /// vectors to `action_names.len()` atomically.
    ///
    /// Aborts with [`ContractViolation::LegalActionsChanged`] if the
    /// information set is known with a different action count.
    pub fn ensure(&mut self, info_set: &str, action_names: &[String]) {
        let n = action_names.len();
        if let Some(existing) = self.regrets.get(info_set) {
            if existing.len() != n {
                violation(ContractViolation::LegalActionsChanged {
                    info_set: info_set.to_string(),
                    stored: existing.len(),
                    observed: n,
                });
            }
            return;
        }
        self.regrets.insert(info_set.to_string(), vec![0.0; n]);
        self.strategy_sums.insert(info_set.to_string(), vec![0.0; n]);
        self.action_names
            .insert(info_set.to_string(), action_names.to_vec());
    }

    /// Current strategy for an information set, by regret matching.
    ///
    /// Returns an empty vector for an information set that was never
    /// materialized.
    pub fn current_strategy(&self, info_set: &str) -> Strategy {
        match self.regrets.get(info_set) {
            Some(regrets) => regret_match(regrets),
            None => Strategy::new(),
        }
    }

    /// Fold a vector of counterfactual-regret deltas into the table under
    /// the variant's accumulation rule.
    pub fn update_regrets(&mut self, info_set: &str, deltas: &[f64], variant: CfrVariant) {
        if let Some(entry) = self.regrets.get_mut(info_set) {
            for (slot, &delta) in entry.iter_mut().zip(deltas) {
                variant.accumulate_regret(slot, delta);
            }
        }
    }

    /// Add `weight * sigma[a]` to each strategy-sum slot.
    pub fn update_strategy_sum(&mut self, info_set: &str, sigma: &[f64], weight: f64) {
        if let Some(entry) = self.strategy_sums.get_mut(info_set) {
            for (slot, &p) in entry.iter_mut().zip(sigma) {
                *slot += weight * p;
            }
        }
    }

    /// Normalize the strategy sums into an average-strategy snapshot.
    ///
    /// Each entry with positive accumulated mass is normalized; an entry
    /// that was materialized but never accumulated mass (the acting player's
    /// reach was always zero) falls back to uniform. The returned [`Policy`]
    /// is an owned copy, decoupled from future training.
    pub fn average_strategy(&self) -> Policy {
        let mut policy = Policy::new();
        for (info_set, sums) in &self.strategy_sums {
            let total: f64 = sums.iter().sum();
            let strategy: Strategy = if total > 0.0 {
                sums.iter().map(|&mass| mass / total).collect()
            } else {
                vec![1.0 / sums.len() as f64; sums.len()]
            };
            policy.insert(info_set.clone(), strategy);
        }
        policy
    }

    /// Positive-regret diagnostics over the whole table, normalized by
    /// `iterations`.
    pub fn regret_diagnostics(&self, iterations: u64) -> RegretDiagnostics {
        let mut total_pos = 0.0;
        let mut max_pos = 0.0f64;

        for entry in self.regrets.values() {
            for &r in entry {
                let pos = r.max(0.0);
                total_pos += pos;
                max_pos = max_pos.max(pos);
            }
        }

        let iters = iterations.max(1) as f64;
        RegretDiagnostics {
            avg_pos_regret: total_pos / iters,
            max_pos_regret: max_pos / iters,
        }
    }

    /// Number of information sets materialized so far.
    pub fn num_info_sets(&self) -> usize {
        self.regrets.len()
    }

    /// Whether an information set has been materialized.
    pub fn contains(&self, info_set: &str) -> bool {
        self.regrets.contains_key(info_set)
    }

    /// Action labels recorded for an information set on first visit.
    pub fn action_names(&self, info_set: &str) -> Option<&[String]> {
        self.action_names.get(info_set).map(Vec::as_slice)
    }

    /// Regret vector for an information set, if materialized.
    pub fn regrets(&self, info_set: &str) -> Option<&[f64]> {
        self.regrets.get(info_set).map(Vec::as_slice)
    }

    /// Iterate all regret vectors. Used by tests asserting table-wide
    /// invariants; iteration order is unspecified.
    pub fn iter_regrets(&self) -> impl Iterator<Item = (&InfoSetId, &[f64])> {
        self.regrets.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("a{i}")).collect()
    }

    #[test]
    fn regret_match_is_proportional_to_positive_regrets() {
        let sigma = regret_match(&[1.0, 3.0]);
        assert_eq!(sigma, vec![0.25, 0.75]);
    }

    #[test]
    fn regret_match_clips_negative_regrets() {
        let sigma = regret_match(&[-2.0, 1.0, 1.0]);
        assert_eq!(sigma, vec![0.0, 0.5, 0.5]);
    }

    #[test]
    fn regret_match_uniform_when_nothing_positive() {
        assert_eq!(regret_match(&[0.0, 0.0]), vec![0.5, 0.5]);
        let sigma = regret_match(&[-1.0, -0.5, -2.0]);
        for p in sigma {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn regret_match_sums_to_one() {
        for regrets in [
            vec![0.3, 0.0, 0.7, 12.5],
            vec![1e-9, 0.0],
            vec![5.0, -5.0, 5.0],
        ] {
            let sigma = regret_match(&regrets);
            let total: f64 = sigma.iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "sum {total} for {regrets:?}");
            assert!(sigma.iter().all(|&p| p >= 0.0));
        }
    }

    #[test]
    fn ensure_materializes_zeroed_entries_once() {
        let mut storage = RegretStorage::new();
        storage.ensure("1:J|", &names(2));
        assert_eq!(storage.regrets("1:J|"), Some([0.0, 0.0].as_slice()));
        assert_eq!(storage.current_strategy("1:J|"), vec![0.5, 0.5]);
        assert_eq!(storage.num_info_sets(), 1);

        // Revisit with the same arity is a no-op
        storage.update_regrets("1:J|", &[1.0, -1.0], CfrVariant::Vanilla);
        storage.ensure("1:J|", &names(2));
        assert_eq!(storage.regrets("1:J|"), Some([1.0, -1.0].as_slice()));
    }

    #[test]
    #[should_panic(expected = "legal actions changed")]
    fn ensure_rejects_changed_action_count() {
        let mut storage = RegretStorage::new();
        storage.ensure("1:J|", &names(2));
        storage.ensure("1:J|", &names(3));
    }

    #[test]
    fn vanilla_keeps_negative_regret_and_plus_floors_it() {
        let mut storage = RegretStorage::new();
        storage.ensure("is", &names(2));
        storage.update_regrets("is", &[-1.5, 2.0], CfrVariant::Vanilla);
        assert_eq!(storage.regrets("is"), Some([-1.5, 2.0].as_slice()));

        let mut storage = RegretStorage::new();
        storage.ensure("is", &names(2));
        storage.update_regrets("is", &[-1.5, 2.0], CfrVariant::Plus);
        assert_eq!(storage.regrets("is"), Some([0.0, 2.0].as_slice()));
    }

    #[test]
    fn average_strategy_normalizes_mass() {
        let mut storage = RegretStorage::new();
        storage.ensure("is", &names(2));
        storage.update_strategy_sum("is", &[0.25, 0.75], 4.0);
        let policy = storage.average_strategy();
        assert_eq!(policy["is"], vec![0.25, 0.75]);
    }

    #[test]
    fn average_strategy_uniform_on_zero_mass() {
        let mut storage = RegretStorage::new();
        storage.ensure("is", &names(4));
        let policy = storage.average_strategy();
        assert_eq!(policy["is"], vec![0.25; 4]);
    }

    #[test]
    fn average_strategy_is_a_decoupled_copy() {
        let mut storage = RegretStorage::new();
        storage.ensure("is", &names(2));
        storage.update_strategy_sum("is", &[1.0, 0.0], 1.0);
        let snapshot = storage.average_strategy();
        storage.update_strategy_sum("is", &[0.0, 1.0], 100.0);
        assert_eq!(snapshot["is"], vec![1.0, 0.0]);
    }

    #[test]
    fn diagnostics_ignore_negative_regret() {
        let mut storage = RegretStorage::new();
        storage.ensure("a", &names(2));
        storage.ensure("b", &names(2));
        storage.update_regrets("a", &[3.0, -7.0], CfrVariant::Vanilla);
        storage.update_regrets("b", &[1.0, 0.0], CfrVariant::Vanilla);

        let d = storage.regret_diagnostics(2);
        assert!((d.avg_pos_regret - 2.0).abs() < 1e-12);
        assert!((d.max_pos_regret - 1.5).abs() < 1e-12);
    }
}
