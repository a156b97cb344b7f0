//! Transaction loading and encoding into universe-indexed itemsets

use crate::itemset::ItemSet;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Encoded transaction data with its item universe
#[derive(Debug, Clone)]
pub struct TransactionData {
    /// Sorted, deduplicated item names; an item's index is its position here
    pub universe: Vec<String>,
    /// Transactions encoded against `universe`
    pub transactions: Vec<ItemSet>,
}

impl TransactionData {
    /// Build the item universe and encode every basket against it
    pub fn from_baskets<S: AsRef<str>>(baskets: &[Vec<S>]) -> Self {
        let universe: Vec<String> = baskets
            .iter()
            .flat_map(|basket| basket.iter().map(|item| item.as_ref()))
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let universe_len = universe.len();
        let transactions = baskets
            .iter()
            .map(|basket| {
                ItemSet::from_items(
                    universe_len,
                    basket.iter().filter_map(|item| {
                        universe
                            .binary_search_by(|probe| probe.as_str().cmp(item.as_ref()))
                            .ok()
                    }),
                )
            })
            .collect();

        Self {
            universe,
            transactions,
        }
    }

    pub fn universe_len(&self) -> usize {
        self.universe.len()
    }

    pub fn item_name(&self, index: usize) -> Option<&str> {
        self.universe.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.universe
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .ok()
    }

    /// Encode item names as an itemset; fails on names outside the universe
    pub fn encode<S: AsRef<str>>(&self, names: &[S]) -> crate::Result<ItemSet> {
        let mut set = ItemSet::empty(self.universe_len());
        for name in names {
            let name = name.as_ref();
            match self.index_of(name) {
                Some(index) => set.insert(index),
                None => anyhow::bail!("Unknown item: {}", name),
            }
        }
        Ok(set)
    }

    /// Item names of an itemset, in universe order
    pub fn names(&self, itemset: &ItemSet) -> Vec<String> {
        itemset
            .iter()
            .filter_map(|index| self.item_name(index))
            .map(str::to_owned)
            .collect()
    }

    /// Render an itemset as `{a, b}`
    pub fn describe(&self, itemset: &ItemSet) -> String {
        format!("{{{}}}", self.names(itemset).join(", "))
    }
}

/// Load a basket file and encode its transactions
///
/// # Arguments
/// * `file_path` - Path to a file with one comma-separated transaction per line
///
/// # Returns
/// * `TransactionData` with the sorted universe and encoded transactions
pub fn load_transactions(file_path: &str) -> crate::Result<TransactionData> {
    let file = File::open(file_path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", file_path, e))?;
    let baskets = parse_baskets(BufReader::new(file))?;
    Ok(TransactionData::from_baskets(&baskets))
}

/// Parse comma-separated baskets, one per line. A blank line is an empty
/// basket and still counts toward every support denominator.
pub fn parse_baskets<R: BufRead>(reader: R) -> crate::Result<Vec<Vec<String>>> {
    let mut baskets = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let fields = split_fields(&line)
            .map_err(|msg| anyhow::anyhow!("Line {}: {}", line_no + 1, msg))?;
        baskets.push(fields);
    }
    Ok(baskets)
}

/// Split one line into trimmed, non-empty fields; `"` quotes a field and `""`
/// inside quotes is a literal quote
fn split_fields(line: &str) -> Result<Vec<String>, &'static str> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) => in_quotes = true,
            (',', false) => push_field(&mut fields, &mut field),
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field");
    }
    push_field(&mut fields, &mut field);
    Ok(fields)
}

fn push_field(fields: &mut Vec<String>, field: &mut String) {
    let trimmed = field.trim();
    if !trimmed.is_empty() {
        fields.push(trimmed.to_owned());
    }
    field.clear();
}
