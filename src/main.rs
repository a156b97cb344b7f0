//! RuleForge: market-basket mining CLI
//!
//! This is the main entrypoint that orchestrates transaction loading, frequent
//! itemset mining, rule derivation, reporting and visualization.

use anyhow::Result;
use clap::Parser;
use ruleforge::cli::OutputFormat;
use ruleforge::viz::{self, ChartOptions};
use ruleforge::{load_transactions, mine, Args, Report};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        println!("RuleForge - Frequent Itemsets and Association Rules");
        println!("===================================================\n");
    }

    run_pipeline(&args)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the full mining pipeline
fn run_pipeline(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    // Validate parameters before touching the input
    let mining_config = args.mining_config()?;
    let rule_config = args.rule_config()?;

    // Step 1: Load and encode transactions
    if args.verbose {
        println!("Step 1: Loading transactions");
        println!("  Input file: {}", args.input);
    }
    let data_start = Instant::now();
    let data = load_transactions(&args.input)?;
    if args.verbose {
        println!(
            "✓ Loaded {} transactions over {} items",
            data.transactions.len(),
            data.universe_len()
        );
        println!("  Processing time: {:.2}s", data_start.elapsed().as_secs_f64());
    }

    // Step 2: Mine frequent itemsets and rules
    if args.verbose {
        println!("\nStep 2: Mining");
        println!("  Minimum support: {}", mining_config.min_support);
        println!("  Minimum confidence: {}", rule_config.min_confidence);
        println!("  Join strategy: {:?}", mining_config.join);
        println!("  Threshold policy: {:?}", mining_config.threshold);
        println!("  Rule scope: {:?}", rule_config.scope);
    }
    let mining_start = Instant::now();
    let outcome = mine(&data, &mining_config, &rule_config)?;
    if args.verbose {
        println!(
            "✓ Found {} frequent itemsets and {} rules",
            outcome.frequent.len(),
            outcome.rules.len()
        );
        println!("  Mining time: {:.2}s", mining_start.elapsed().as_secs_f64());
    }

    // Step 3: Report
    let report = Report::new(
        &data,
        mining_config.min_support,
        rule_config.min_confidence,
        &outcome.frequent,
        &outcome.rules,
    );
    match args.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    // Step 4: Optional visualizations
    if let Some(plot_path) = &args.plot {
        let defaults = ChartOptions::default();
        let options = ChartOptions {
            labels: defaults.labels && !args.plot_no_labels,
            ..defaults
        };
        viz::generate_visualization_report(&report, plot_path, &options)?;
        if args.verbose {
            println!("\n✓ Visualizations generated");
            println!("  Rule plot saved to: {}", plot_path);
            println!(
                "  Support chart saved to: {}",
                plot_path.replace(".png", "_supports.png")
            );
        }
    }

    if args.verbose {
        println!("\n=== Pipeline Complete ===");
        println!(
            "Total processing time: {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
