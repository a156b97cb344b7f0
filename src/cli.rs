//! Command-line interface definitions and argument parsing

use crate::apriori::{MiningConfig, ThresholdPolicy};
use crate::candidates::JoinStrategy;
use crate::rules::{RuleConfig, RuleScope};
use clap::{Parser, ValueEnum};

/// Frequent itemset and association rule mining for market-basket data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input file, one comma-separated transaction per line
    #[arg(short, long, default_value = "transactions.csv")]
    pub input: String,

    /// Minimum support for an itemset to be frequent, in (0, 1]
    #[arg(short = 's', long, default_value = "0.03")]
    pub min_support: f64,

    /// Minimum confidence a rule must exceed, in [0, 1)
    #[arg(short = 'c', long, default_value = "0.4")]
    pub min_confidence: f64,

    /// Candidate join strategy
    #[arg(long, value_enum, default_value_t = JoinArg::Prefix)]
    pub join: JoinArg,

    /// Use `>=` against the minimum support at every level instead of `>`
    /// beyond singletons
    #[arg(long)]
    pub inclusive: bool,

    /// Derive rules from every frequent itemset, not only non-subsumed ones
    #[arg(long)]
    pub all_frequent: bool,

    /// Largest itemset size to search for
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Output format for the result tables
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write a rule scatter plot (and a `_supports.png` bar chart) to this PNG path
    #[arg(short, long)]
    pub plot: Option<String>,

    /// Draw charts without any text (always the case without the `fonts` feature)
    #[arg(long)]
    pub plot_no_labels: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JoinArg {
    Prefix,
    #[value(name = "self")]
    SelfJoin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    /// Build the validated frequent itemset search config
    pub fn mining_config(&self) -> crate::Result<MiningConfig> {
        let threshold = if self.inclusive {
            ThresholdPolicy::Inclusive
        } else {
            ThresholdPolicy::Reference
        };
        let join = match self.join {
            JoinArg::Prefix => JoinStrategy::Prefix,
            JoinArg::SelfJoin => JoinStrategy::SelfJoin,
        };
        let config = MiningConfig::new(self.min_support)?
            .with_threshold(threshold)
            .with_join(join)
            .with_max_len(self.max_len);
        config.validate()?;
        Ok(config)
    }

    /// Build the validated rule derivation config
    pub fn rule_config(&self) -> crate::Result<RuleConfig> {
        let scope = if self.all_frequent {
            RuleScope::AllFrequent
        } else {
            RuleScope::Maximal
        };
        Ok(RuleConfig::new(self.min_confidence)?.with_scope(scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["ruleforge"]);
        assert_eq!(args.input, "transactions.csv");
        assert_eq!(args.min_support, 0.03);
        assert_eq!(args.min_confidence, 0.4);
        assert_eq!(args.join, JoinArg::Prefix);
        assert_eq!(args.format, OutputFormat::Text);

        let mining = args.mining_config().unwrap();
        assert_eq!(mining.threshold, ThresholdPolicy::Reference);
        assert_eq!(mining.join, JoinStrategy::Prefix);
        assert_eq!(args.rule_config().unwrap().scope, RuleScope::Maximal);
    }

    #[test]
    fn test_policy_flags() {
        let args = Args::parse_from([
            "ruleforge",
            "-i",
            "baskets.csv",
            "-s",
            "0.5",
            "-c",
            "0.25",
            "--join",
            "self",
            "--inclusive",
            "--all-frequent",
            "--max-len",
            "3",
            "--format",
            "json",
        ]);

        let mining = args.mining_config().unwrap();
        assert_eq!(mining.min_support, 0.5);
        assert_eq!(mining.threshold, ThresholdPolicy::Inclusive);
        assert_eq!(mining.join, JoinStrategy::SelfJoin);
        assert_eq!(mining.max_len, Some(3));

        let rules = args.rule_config().unwrap();
        assert_eq!(rules.min_confidence, 0.25);
        assert_eq!(rules.scope, RuleScope::AllFrequent);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_out_of_range_thresholds() {
        let args = Args::parse_from(["ruleforge", "-s", "1.5"]);
        assert!(args.mining_config().is_err());

        let args = Args::parse_from(["ruleforge", "-c", "1.0"]);
        assert!(args.rule_config().is_err());

        let args = Args::parse_from(["ruleforge", "--max-len", "0"]);
        assert!(args.mining_config().is_err());
    }
}
