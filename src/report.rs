//! Tabular and JSON rendering of mining results

use crate::apriori::FrequentItemset;
use crate::data::TransactionData;
use crate::rules::AssociationRule;
use serde::Serialize;
use std::fmt;

/// One frequent itemset with item names and rounded support
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentRecord {
    pub items: Vec<String>,
    pub support: f64,
}

/// One association rule with item names and rounded metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRecord {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

/// Externally visible result of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub transactions: usize,
    pub items: usize,
    pub min_support: f64,
    pub min_confidence: f64,
    pub frequent_itemsets: Vec<FrequentRecord>,
    pub rules: Vec<RuleRecord>,
}

impl Report {
    pub fn new(
        data: &TransactionData,
        min_support: f64,
        min_confidence: f64,
        frequent: &[FrequentItemset],
        rules: &[AssociationRule],
    ) -> Self {
        let frequent_itemsets = frequent
            .iter()
            .map(|f| FrequentRecord {
                items: data.names(&f.itemset),
                support: f.rounded_support(),
            })
            .collect();

        let rules = rules
            .iter()
            .map(|r| RuleRecord {
                antecedent: data.names(&r.antecedent),
                consequent: data.names(&r.consequent),
                support: r.rounded_support(),
                confidence: r.rounded_confidence(),
                lift: r.rounded_lift(),
            })
            .collect();

        Self {
            transactions: data.transactions.len(),
            items: data.universe_len(),
            min_support,
            min_confidence,
            frequent_itemsets,
            rules,
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render both result tables as aligned plain text
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let itemsets: Vec<String> = self
            .frequent_itemsets
            .iter()
            .map(|r| braced(&r.items))
            .collect();
        let width = column_width(&itemsets, "Itemset");

        writeln!(
            f,
            "=== Frequent Itemsets ({}) ===",
            self.frequent_itemsets.len()
        )?;
        writeln!(f, "{:<width$} | Support", "Itemset")?;
        writeln!(f, "{:-<width$}-+--------", "")?;
        for (label, record) in itemsets.iter().zip(&self.frequent_itemsets) {
            writeln!(f, "{:<width$} | {:.3}", label, record.support)?;
        }

        let antecedents: Vec<String> = self.rules.iter().map(|r| braced(&r.antecedent)).collect();
        let consequents: Vec<String> = self.rules.iter().map(|r| braced(&r.consequent)).collect();
        let left = column_width(&antecedents, "Antecedent");
        let right = column_width(&consequents, "Consequent");

        writeln!(f, "\n=== Association Rules ({}) ===", self.rules.len())?;
        writeln!(
            f,
            "{:<left$} -> {:<right$} | Support | Confidence | Lift",
            "Antecedent", "Consequent"
        )?;
        writeln!(f, "{:-<left$}----{:-<right$}-+---------+------------+------", "", "")?;
        for ((x, y), record) in antecedents.iter().zip(&consequents).zip(&self.rules) {
            writeln!(
                f,
                "{:<left$} -> {:<right$} | {:>7.3} | {:>10.3} | {:.3}",
                x, y, record.support, record.confidence, record.lift
            )?;
        }
        Ok(())
    }
}

fn braced(items: &[String]) -> String {
    format!("{{{}}}", items.join(", "))
}

fn column_width(labels: &[String], header: &str) -> usize {
    labels
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}
