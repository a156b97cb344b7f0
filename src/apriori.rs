//! Level-wise (Apriori) frequent itemset search
//!
//! The miner walks `Level1 -> LevelK -> Terminal`. Each step counts support
//! for one level of candidates, keeps the ones that clear the threshold and
//! hands them on as the next frontier. Every step yields an immutable
//! [`LevelSnapshot`], so a caller can stop between levels.

use crate::candidates::{generate_candidates, JoinStrategy};
use crate::error::MiningError;
use crate::itemset::ItemSet;
use crate::support::{check_width, round3, support_count};
use tracing::{debug, info};

/// Comparison applied between an itemset's support and the minimum support
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThresholdPolicy {
    /// `>=` for singletons, strict `>` for every larger level
    #[default]
    Reference,
    /// `>=` at every level
    Inclusive,
}

impl ThresholdPolicy {
    pub fn passes(self, level: usize, support: f64, min_support: f64) -> bool {
        match self {
            ThresholdPolicy::Reference if level > 1 => support > min_support,
            _ => support >= min_support,
        }
    }
}

/// Parameters of a frequent itemset search
#[derive(Debug, Clone, PartialEq)]
pub struct MiningConfig {
    /// Minimum support σ, in (0, 1]
    pub min_support: f64,
    pub threshold: ThresholdPolicy,
    pub join: JoinStrategy,
    /// Largest itemset size to search for; unbounded when `None`
    pub max_len: Option<usize>,
}

impl MiningConfig {
    /// Create a config with the given minimum support and default policies
    pub fn new(min_support: f64) -> Result<Self, MiningError> {
        let config = Self {
            min_support,
            threshold: ThresholdPolicy::default(),
            join: JoinStrategy::default(),
            max_len: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_threshold(mut self, threshold: ThresholdPolicy) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_join(mut self, join: JoinStrategy) -> Self {
        self.join = join;
        self
    }

    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn validate(&self) -> Result<(), MiningError> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(MiningError::invalid(format!(
                "minimum support must be in (0, 1], got {}",
                self.min_support
            )));
        }
        if self.max_len == Some(0) {
            return Err(MiningError::invalid("maximum itemset length must be at least 1"));
        }
        Ok(())
    }
}

/// An itemset together with its exact support
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemset {
    pub itemset: ItemSet,
    pub support: f64,
}

impl FrequentItemset {
    /// Support rounded to 3 decimals, as reported
    pub fn rounded_support(&self) -> f64 {
        round3(self.support)
    }
}

/// Result of one level of the search
#[derive(Debug, Clone)]
pub struct LevelSnapshot {
    /// Itemset size of this level
    pub level: usize,
    /// Number of candidates whose support was counted
    pub candidates: usize,
    /// Itemsets retained at this level; they form the next frontier
    pub discovered: Vec<FrequentItemset>,
    /// Total itemsets accumulated across all levels so far
    pub accumulated: usize,
}

impl LevelSnapshot {
    pub fn frontier(&self) -> impl Iterator<Item = &ItemSet> {
        self.discovered.iter().map(|f| &f.itemset)
    }
}

#[derive(Debug)]
enum LevelState {
    Level1,
    LevelK { level: usize, frontier: Vec<ItemSet> },
    Terminal,
}

/// Level-wise miner over a borrowed set of encoded transactions
#[derive(Debug)]
pub struct AprioriMiner<'a> {
    transactions: &'a [ItemSet],
    universe_len: usize,
    config: MiningConfig,
    state: LevelState,
    accumulated: Vec<FrequentItemset>,
}

impl<'a> AprioriMiner<'a> {
    /// Prepare a search
    ///
    /// # Errors
    /// * `InvalidInput` for an out-of-range config, no transactions, or a
    ///   transaction not encoded at the width of `universe_len`
    /// * `EmptyUniverse` when there are transactions but `universe_len` is zero
    pub fn new(
        transactions: &'a [ItemSet],
        universe_len: usize,
        config: MiningConfig,
    ) -> Result<Self, MiningError> {
        config.validate()?;
        if transactions.is_empty() {
            return Err(MiningError::invalid("transaction collection is empty"));
        }
        if universe_len == 0 {
            return Err(MiningError::EmptyUniverse);
        }
        check_width(transactions, ItemSet::width_for(universe_len), "transaction")?;

        Ok(Self {
            transactions,
            universe_len,
            config,
            state: LevelState::Level1,
            accumulated: Vec::new(),
        })
    }

    /// Frequent itemsets found so far, in discovery order
    pub fn accumulated(&self) -> &[FrequentItemset] {
        &self.accumulated
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, LevelState::Terminal)
    }

    /// Run the remaining levels and return every frequent itemset found
    pub fn run(mut self) -> Vec<FrequentItemset> {
        let mut levels = 0;
        while self.next().is_some() {
            levels += 1;
        }
        info!(
            levels,
            frequent = self.accumulated.len(),
            min_support = self.config.min_support,
            "frequent itemset search finished"
        );
        self.accumulated
    }

    fn count_level(&self, level: usize, candidates: Vec<ItemSet>) -> Vec<FrequentItemset> {
        let total = self.transactions.len() as f64;
        candidates
            .into_iter()
            .filter_map(|itemset| {
                let support = support_count(&itemset, self.transactions) as f64 / total;
                self.config
                    .threshold
                    .passes(level, support, self.config.min_support)
                    .then_some(FrequentItemset { itemset, support })
            })
            .collect()
    }
}

impl Iterator for AprioriMiner<'_> {
    type Item = LevelSnapshot;

    fn next(&mut self) -> Option<LevelSnapshot> {
        let (level, candidates) = match std::mem::replace(&mut self.state, LevelState::Terminal) {
            LevelState::Level1 => {
                let singletons = (0..self.universe_len)
                    .map(|item| ItemSet::singleton(self.universe_len, item))
                    .collect::<Vec<_>>();
                (1, singletons)
            }
            LevelState::LevelK { level, frontier } => {
                (level, generate_candidates(&frontier, self.config.join))
            }
            LevelState::Terminal => return None,
        };

        let candidate_count = candidates.len();
        let discovered = self.count_level(level, candidates);
        debug!(
            level,
            candidates = candidate_count,
            frequent = discovered.len(),
            "level counted"
        );

        self.accumulated.extend(discovered.iter().cloned());

        let at_max_len = self.config.max_len.is_some_and(|max| level >= max);
        if !discovered.is_empty() && !at_max_len {
            self.state = LevelState::LevelK {
                level: level + 1,
                frontier: discovered.iter().map(|f| f.itemset.clone()).collect(),
            };
        }

        Some(LevelSnapshot {
            level,
            candidates: candidate_count,
            discovered,
            accumulated: self.accumulated.len(),
        })
    }
}

/// Find every frequent itemset of `transactions`
///
/// # Arguments
/// * `transactions` - Encoded transactions, all of width `universe_len`
/// * `universe_len` - Number of distinct items
/// * `config` - Support threshold and search policies
///
/// # Returns
/// * Frequent itemsets of every level, in discovery order
pub fn mine_frequent_itemsets(
    transactions: &[ItemSet],
    universe_len: usize,
    config: &MiningConfig,
) -> Result<Vec<FrequentItemset>, MiningError> {
    Ok(AprioriMiner::new(transactions, universe_len, config.clone())?.run())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAD: usize = 0;
    const EGGS: usize = 1;
    const MILK: usize = 2;

    fn basket_transactions() -> Vec<ItemSet> {
        vec![
            ItemSet::from_items(3, [MILK, BREAD]),
            ItemSet::from_items(3, [MILK, BREAD, EGGS]),
            ItemSet::from_items(3, [BREAD]),
            ItemSet::from_items(3, [MILK]),
        ]
    }

    fn as_pairs(found: &[FrequentItemset]) -> Vec<(Vec<usize>, f64)> {
        found
            .iter()
            .map(|f| (f.itemset.to_vec(), f.rounded_support()))
            .collect()
    }

    #[test]
    fn test_reference_policy_is_strict_beyond_level_one() {
        let tx = basket_transactions();
        let config = MiningConfig::new(0.5).unwrap();
        let found = mine_frequent_itemsets(&tx, 3, &config).unwrap();

        // {bread, milk} has support exactly 0.5 and is rejected by the strict comparison
        assert_eq!(
            as_pairs(&found),
            vec![(vec![BREAD], 0.75), (vec![MILK], 0.75)]
        );
    }

    #[test]
    fn test_inclusive_policy_keeps_pair_at_threshold() {
        let tx = basket_transactions();
        let config = MiningConfig::new(0.5)
            .unwrap()
            .with_threshold(ThresholdPolicy::Inclusive);
        let found = mine_frequent_itemsets(&tx, 3, &config).unwrap();

        assert_eq!(
            as_pairs(&found),
            vec![
                (vec![BREAD], 0.75),
                (vec![MILK], 0.75),
                (vec![BREAD, MILK], 0.5)
            ]
        );
    }

    #[test]
    fn test_single_transaction_full_support() {
        let tx = vec![ItemSet::from_items(4, [0, 1, 3])];

        let config = MiningConfig::new(1.0).unwrap();
        let found = mine_frequent_itemsets(&tx, 4, &config).unwrap();
        assert_eq!(
            as_pairs(&found),
            vec![(vec![0], 1.0), (vec![1], 1.0), (vec![3], 1.0)]
        );

        let inclusive = config.with_threshold(ThresholdPolicy::Inclusive);
        let found = mine_frequent_itemsets(&tx, 4, &inclusive).unwrap();
        assert_eq!(found.len(), 7);
        assert!(found.iter().all(|f| f.support == 1.0 && f.itemset.len() <= 3));
    }

    #[test]
    fn test_no_frequent_singletons_is_not_an_error() {
        let tx = basket_transactions();
        let config = MiningConfig::new(0.9).unwrap();
        let found = mine_frequent_itemsets(&tx, 3, &config).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let config = MiningConfig::new(0.5).unwrap();
        let result = mine_frequent_itemsets(&[], 3, &config);
        assert!(matches!(result, Err(MiningError::InvalidInput(_))));

        let tx = vec![ItemSet::empty(0)];
        let result = mine_frequent_itemsets(&tx, 0, &config);
        assert_eq!(result, Err(MiningError::EmptyUniverse));
    }

    #[test]
    fn test_transactions_narrower_than_universe() {
        // One word of transactions against a two-word universe
        let tx = vec![
            ItemSet::from_items(3, [0, 1]),
            ItemSet::from_items(3, [1, 2]),
        ];
        let config = MiningConfig::new(0.5).unwrap();
        let result = mine_frequent_itemsets(&tx, 70, &config);
        assert!(matches!(result, Err(MiningError::InvalidInput(_))));

        let mixed = vec![ItemSet::from_items(70, [65]), ItemSet::from_items(3, [0])];
        assert!(AprioriMiner::new(&mixed, 70, config).is_err());
    }

    #[test]
    fn test_invalid_config() {
        assert!(MiningConfig::new(0.0).is_err());
        assert!(MiningConfig::new(1.5).is_err());
        assert!(MiningConfig::new(f64::NAN).is_err());
        assert!(MiningConfig::new(1.0).is_ok());

        let config = MiningConfig::new(0.5).unwrap().with_max_len(Some(0));
        let tx = basket_transactions();
        assert!(AprioriMiner::new(&tx, 3, config).is_err());
    }

    #[test]
    fn test_snapshots_per_level() {
        let tx = basket_transactions();
        let config = MiningConfig::new(0.25)
            .unwrap()
            .with_threshold(ThresholdPolicy::Inclusive);
        let mut miner = AprioriMiner::new(&tx, 3, config).unwrap();

        let first = miner.next().unwrap();
        assert_eq!(first.level, 1);
        assert_eq!(first.candidates, 3);
        assert_eq!(first.frontier().count(), 3);
        assert_eq!(first.accumulated, 3);
        assert!(!miner.is_finished());

        let levels: Vec<LevelSnapshot> = miner.by_ref().collect();
        assert_eq!(levels.iter().map(|s| s.level).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert!(levels[2].discovered.is_empty());
        assert!(miner.is_finished());
        // 3 singletons, 3 pairs, 1 triple
        assert_eq!(miner.accumulated().len(), 7);
    }

    #[test]
    fn test_max_len_stops_search() {
        let tx = basket_transactions();
        let config = MiningConfig::new(0.25)
            .unwrap()
            .with_threshold(ThresholdPolicy::Inclusive)
            .with_max_len(Some(2));
        let found = mine_frequent_itemsets(&tx, 3, &config).unwrap();
        assert_eq!(found.len(), 6);
        assert!(found.iter().all(|f| f.itemset.len() <= 2));
    }

    #[test]
    fn test_join_strategies_agree() {
        let tx = basket_transactions();
        for policy in [ThresholdPolicy::Reference, ThresholdPolicy::Inclusive] {
            let base = MiningConfig::new(0.25).unwrap().with_threshold(policy);
            let prefix = mine_frequent_itemsets(&tx, 3, &base).unwrap();
            let self_join =
                mine_frequent_itemsets(&tx, 3, &base.clone().with_join(JoinStrategy::SelfJoin))
                    .unwrap();
            assert_eq!(prefix, self_join);
        }
    }
}
