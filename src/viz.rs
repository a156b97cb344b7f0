//! Visualization of mining results using Plotters

use crate::report::Report;
use plotters::prelude::*;

/// Rendering options shared by every chart
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Draw captions and axis labels. Needs the `fonts` feature.
    pub labels: bool,
    /// Number of itemsets shown in the support chart
    pub top_n: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            labels: cfg!(feature = "fonts"),
            top_n: 20,
        }
    }
}

/// Color ramp for rule points, from low to high lift
const LIFT_COLORS: [RGBColor; 3] = [BLUE, GREEN, RED];

fn lift_color(lift: f64) -> RGBColor {
    if lift < 1.0 {
        LIFT_COLORS[0]
    } else if lift < 1.5 {
        LIFT_COLORS[1]
    } else {
        LIFT_COLORS[2]
    }
}

fn check_labels(options: &ChartOptions) -> crate::Result<()> {
    if options.labels && !cfg!(feature = "fonts") {
        anyhow::bail!(
            "Chart labels need a build with the `fonts` feature; draw without labels instead"
        );
    }
    Ok(())
}

/// Create a scatter plot of rules: support vs confidence, colored by lift
///
/// # Arguments
/// * `report` - Rendered mining results
/// * `output_path` - Path to save the PNG plot
/// * `options` - Chart rendering options
pub fn create_rule_scatter(
    report: &Report,
    output_path: &str,
    options: &ChartOptions,
) -> crate::Result<()> {
    check_labels(options)?;
    let max_support = report
        .rules
        .iter()
        .map(|r| r.support)
        .fold(0.0_f64, f64::max);
    let x_max = (max_support * 1.1).max(0.1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(10);
    if options.labels {
        builder
            .caption("Association Rules: Support vs Confidence", ("sans-serif", 30))
            .x_label_area_size(50)
            .y_label_area_size(60);
    }
    let mut chart = builder.build_cartesian_2d(0f64..x_max, 0f64..1.05f64)?;

    if options.labels {
        chart
            .configure_mesh()
            .x_desc("Support")
            .y_desc("Confidence")
            .axis_desc_style(("sans-serif", 15))
            .draw()?;
    }

    chart.draw_series(
        report
            .rules
            .iter()
            .map(|r| Circle::new((r.support, r.confidence), 5, lift_color(r.lift).filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Create a bar chart of the highest-support frequent itemsets
pub fn create_support_chart(
    report: &Report,
    output_path: &str,
    options: &ChartOptions,
) -> crate::Result<()> {
    check_labels(options)?;
    let mut ranked: Vec<_> = report.frequent_itemsets.iter().collect();
    ranked.sort_by(|a, b| b.support.total_cmp(&a.support));
    ranked.truncate(options.top_n);

    let bars = ranked.len().max(1) as f64;
    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(10);
    if options.labels {
        builder
            .caption("Top Frequent Itemsets by Support", ("sans-serif", 30))
            .x_label_area_size(40)
            .y_label_area_size(50);
    }
    let mut chart = builder.build_cartesian_2d(0f64..bars, 0f64..1.05f64)?;

    if options.labels {
        chart
            .configure_mesh()
            .x_desc("Rank")
            .y_desc("Support")
            .axis_desc_style(("sans-serif", 15))
            .draw()?;
    }

    chart.draw_series(ranked.iter().enumerate().map(|(rank, record)| {
        let color = if record.items.len() > 1 { &RED } else { &BLUE };
        Rectangle::new(
            [(rank as f64 + 0.1, 0.0), (rank as f64 + 0.9, record.support)],
            color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Generate the rule scatter at `base_output_path` and the support chart next to it
pub fn generate_visualization_report(
    report: &Report,
    base_output_path: &str,
    options: &ChartOptions,
) -> crate::Result<()> {
    create_rule_scatter(report, base_output_path, options)?;

    let support_chart_path = base_output_path.replace(".png", "_supports.png");
    create_support_chart(report, &support_chart_path, options)?;

    Ok(())
}
