//! Support counting over encoded transactions

use crate::error::MiningError;
use crate::itemset::ItemSet;

/// Number of transactions that contain every item of `itemset`
pub fn support_count(itemset: &ItemSet, transactions: &[ItemSet]) -> usize {
    transactions
        .iter()
        .filter(|transaction| itemset.is_subset_of(transaction))
        .count()
}

/// Fraction of transactions that are supersets of `itemset`
///
/// # Errors
/// * `MiningError::InvalidInput` if `transactions` is empty or a transaction
///   width differs from the itemset's
pub fn support(itemset: &ItemSet, transactions: &[ItemSet]) -> Result<f64, MiningError> {
    if transactions.is_empty() {
        return Err(MiningError::invalid(
            "cannot compute support over an empty transaction collection",
        ));
    }
    check_width(transactions, itemset.width(), "transaction")?;
    Ok(support_count(itemset, transactions) as f64 / transactions.len() as f64)
}

/// Fail unless every set in `sets` is `width` words wide
pub(crate) fn check_width<'a, I>(sets: I, width: usize, what: &str) -> Result<(), MiningError>
where
    I: IntoIterator<Item = &'a ItemSet>,
{
    match sets
        .into_iter()
        .enumerate()
        .find(|(_, set)| set.width() != width)
    {
        Some((index, set)) => Err(MiningError::invalid(format!(
            "{} {} is {} words wide, expected {}",
            what,
            index,
            set.width(),
            width
        ))),
        None => Ok(()),
    }
}

/// Round a support or confidence value to 3 decimal places for reporting
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
