//! RuleForge: frequent itemset and association rule mining for market-basket data
//!
//! Transactions are encoded against a sorted item universe, searched level by
//! level for frequent itemsets (Apriori), and the surviving itemsets are turned
//! into confidence-filtered association rules.

pub mod apriori;
pub mod candidates;
pub mod cli;
pub mod data;
pub mod error;
pub mod itemset;
pub mod report;
pub mod rules;
pub mod support;
pub mod viz;

// Re-export public items for easier access
pub use apriori::{
    mine_frequent_itemsets, AprioriMiner, FrequentItemset, LevelSnapshot, MiningConfig,
    ThresholdPolicy,
};
pub use candidates::{generate_candidates, JoinStrategy};
pub use cli::Args;
pub use data::{load_transactions, TransactionData};
pub use error::MiningError;
pub use itemset::ItemSet;
pub use report::Report;
pub use rules::{derive_rules, AssociationRule, RuleConfig, RuleScope};
pub use support::support;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;

/// Frequent itemsets and rules of one run
#[derive(Debug, Clone, PartialEq)]
pub struct MiningOutcome {
    pub frequent: Vec<FrequentItemset>,
    pub rules: Vec<AssociationRule>,
}

/// Run the frequent itemset search and rule derivation over encoded data
pub fn mine(
    data: &TransactionData,
    mining: &MiningConfig,
    rules: &RuleConfig,
) -> std::result::Result<MiningOutcome, MiningError> {
    rules.validate()?;
    let frequent = mine_frequent_itemsets(&data.transactions, data.universe_len(), mining)?;
    let rules = derive_rules(&frequent, &data.transactions, rules)?;
    Ok(MiningOutcome { frequent, rules })
}
