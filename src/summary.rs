//! Aggregation of the daily views and clones series.

use crate::models::{ClonesTraffic, DailyTrafficPoint, TrafficSummary, ViewsTraffic};

/// Computes totals, daily averages and peak days over the traffic window.
///
/// Returns the empty summary when either side is absent.
pub fn compute_traffic_summary(
    views: Option<&ViewsTraffic>,
    clones: Option<&ClonesTraffic>,
) -> TrafficSummary {
    let (Some(views), Some(clones)) = (views, clones) else {
        return TrafficSummary::default();
    };
    let views = &views.views;
    let clones = &clones.clones;

    let total_views: u64 = views.iter().map(|p| p.count).sum();
    let total_clones: u64 = clones.iter().map(|p| p.count).sum();

    TrafficSummary {
        total_views,
        total_unique_visitors: views.iter().map(|p| p.uniques).sum(),
        total_clones,
        total_unique_cloners: clones.iter().map(|p| p.uniques).sum(),
        average_daily_views: daily_average(total_views, views.len()),
        average_daily_clones: daily_average(total_clones, clones.len()),
        peak_views_day: peak_day(views).cloned(),
        peak_clones_day: peak_day(clones).cloned(),
        analysis_period_days: views.len(),
    }
}

/// Point with the highest count; the earliest one wins a tie.
pub fn peak_day(series: &[DailyTrafficPoint]) -> Option<&DailyTrafficPoint> {
    series
        .iter()
        .reduce(|best, p| if p.count > best.count { p } else { best })
}

fn daily_average(total: u64, days: usize) -> f64 {
    if days == 0 {
        return 0.0;
    }
    round2(total as f64 / days as f64)
}

/// Two decimals, exact halves to even (`0.125` -> `0.12`).
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
