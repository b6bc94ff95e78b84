//! Profile numbers: item count, items added this month, value trend.

use crate::cli::commands::{format_money, open_repository};
use crate::error::Result;
use crate::model::TrendPoint;
use crate::view::ProfileView;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

const BAR_WIDTH: usize = 30;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOutput<'a> {
    total_count: usize,
    this_month_count: usize,
    current_value: f64,
    trend: &'a [TrendPoint],
}

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if the store is missing or a query fails.
pub async fn execute(db_path: Option<&PathBuf>, busy_timeout_ms: Option<u64>, json: bool) -> Result<()> {
    let repo = open_repository(db_path, busy_timeout_ms).await?;
    let summary = ProfileView::new(repo).load().await?;

    if json {
        let output = StatsOutput {
            total_count: summary.total_count,
            this_month_count: summary.this_month_count,
            current_value: summary.current_value(),
            trend: &summary.trend,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("Items:            {}", summary.total_count);
    println!("Added this month: {}", summary.this_month_count);
    println!("Current value:    {}", format_money(summary.current_value()).bold());
    println!();
    println!("Value over the last {} months:", summary.trend.len());

    let max = summary.trend.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    for point in &summary.trend {
        println!(
            "  {}  {} {}",
            point.month,
            format!("{:<BAR_WIDTH$}", bar(point.value, max)).cyan(),
            format_money(point.value)
        );
    }

    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(0.0, 0.0), "");
        assert_eq!(bar(10.0, 10.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0, 10.0), "");
    }
}
