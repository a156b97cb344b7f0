//! Association rule derivation from frequent itemsets

use crate::apriori::FrequentItemset;
use crate::error::MiningError;
use crate::itemset::ItemSet;
use crate::support::{check_width, round3, support};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Which frequent itemsets rules are derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleScope {
    /// Itemsets of size >= 2 that are not a strict subset of another frequent itemset
    #[default]
    Maximal,
    /// Every frequent itemset of size >= 2
    AllFrequent,
}

/// Parameters of rule derivation
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    /// Rules must have confidence strictly above this value, in [0, 1)
    pub min_confidence: f64,
    pub scope: RuleScope,
}

impl RuleConfig {
    pub fn new(min_confidence: f64) -> Result<Self, MiningError> {
        let config = Self {
            min_confidence,
            scope: RuleScope::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_scope(mut self, scope: RuleScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn validate(&self) -> Result<(), MiningError> {
        if !(self.min_confidence >= 0.0 && self.min_confidence < 1.0) {
            return Err(MiningError::invalid(format!(
                "minimum confidence must be in [0, 1), got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

/// A retained rule `antecedent -> consequent`
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: ItemSet,
    pub consequent: ItemSet,
    /// Support of `antecedent ∪ consequent`
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl AssociationRule {
    pub fn rounded_support(&self) -> f64 {
        round3(self.support)
    }

    pub fn rounded_confidence(&self) -> f64 {
        round3(self.confidence)
    }

    pub fn rounded_lift(&self) -> f64 {
        round3(self.lift)
    }
}

/// Select the itemsets rules are built from
pub fn rule_sources(frequent: &[FrequentItemset], scope: RuleScope) -> Vec<&ItemSet> {
    frequent
        .iter()
        .map(|f| &f.itemset)
        .filter(|set| set.len() > 1)
        .filter(|set| match scope {
            RuleScope::AllFrequent => true,
            RuleScope::Maximal => !frequent
                .iter()
                .any(|other| set.is_strict_subset_of(&other.itemset)),
        })
        .collect()
}

/// Build `(antecedent, consequent)` pairs from rule sources
///
/// Every source `S` yields `S\{e} -> {e}` for each item `e`; sources with more
/// than two items also yield `{e} -> S\{e}`.
pub fn candidate_rules(sources: &[&ItemSet]) -> Vec<(ItemSet, ItemSet)> {
    let mut candidates = Vec::new();
    for source in sources {
        let symmetric = source.len() > 2;
        for item in source.iter() {
            let rest = source.without(item);
            let single = source.difference(&rest);
            candidates.push((rest.clone(), single.clone()));
            if symmetric {
                candidates.push((single, rest));
            }
        }
    }
    candidates
}

/// Supports known from the search, with fallback counting for anything else
struct SupportCache<'a> {
    transactions: &'a [ItemSet],
    known: FxHashMap<ItemSet, f64>,
}

impl<'a> SupportCache<'a> {
    fn new(frequent: &[FrequentItemset], transactions: &'a [ItemSet]) -> Self {
        let known = frequent
            .iter()
            .map(|f| (f.itemset.clone(), f.support))
            .collect();
        Self { transactions, known }
    }

    fn get(&mut self, itemset: &ItemSet) -> Result<f64, MiningError> {
        if let Some(&value) = self.known.get(itemset) {
            return Ok(value);
        }
        let value = support(itemset, self.transactions)?;
        self.known.insert(itemset.clone(), value);
        Ok(value)
    }
}

/// Derive confidence-filtered association rules
///
/// # Arguments
/// * `frequent` - Output of the frequent itemset search
/// * `transactions` - The transactions that search ran over
/// * `config` - Confidence threshold and rule scope
///
/// # Returns
/// * Rules with confidence strictly above `config.min_confidence`, in candidate order
pub fn derive_rules(
    frequent: &[FrequentItemset],
    transactions: &[ItemSet],
    config: &RuleConfig,
) -> Result<Vec<AssociationRule>, MiningError> {
    config.validate()?;
    if transactions.is_empty() {
        return Err(MiningError::invalid("transaction collection is empty"));
    }
    let width = transactions[0].width();
    check_width(transactions, width, "transaction")?;
    check_width(frequent.iter().map(|f| &f.itemset), width, "frequent itemset")?;

    let sources = rule_sources(frequent, config.scope);
    let candidates = candidate_rules(&sources);
    let mut cache = SupportCache::new(frequent, transactions);
    let mut rules = Vec::new();

    for (antecedent, consequent) in candidates.iter() {
        let support_xy = cache.get(&antecedent.union(consequent))?;
        let support_x = cache.get(antecedent)?;
        if support_x == 0.0 {
            continue;
        }
        let confidence = support_xy / support_x;
        if confidence <= config.min_confidence {
            continue;
        }
        let support_y = cache.get(consequent)?;
        let lift = if support_y > 0.0 {
            confidence / support_y
        } else {
            0.0
        };
        rules.push(AssociationRule {
            antecedent: antecedent.clone(),
            consequent: consequent.clone(),
            support: support_xy,
            confidence,
            lift,
        });
    }

    debug!(
        sources = sources.len(),
        candidates = candidates.len(),
        retained = rules.len(),
        "rules derived"
    );
    Ok(rules)
}
