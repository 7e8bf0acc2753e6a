//! Text rendering of a [`Report`] for the terminal.

use chrono::SecondsFormat;
use itertools::Itertools;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::TrafficError;
use crate::models::{DailyTrafficPoint, Report, TrafficSummary};

/// Referrers and paths shown in the text report.
pub const TOP_ENTRIES: usize = 5;

/// Length of the GitHub traffic window, shown when no summary was computed.
pub const TRAFFIC_WINDOW_DAYS: usize = 14;

const RULE_WIDTH: usize = 70;

const REPORT_TEMPLATE: &str = r#"{{ rule }}
GITHUB REPOSITORY TRAFFIC ANALYTICS REPORT
gh-traffic v{{ version }}
{{ rule }}

REPOSITORY: {{ repo.name }}
Description: {{ repo.description }}
Stars: {{ repo.stars }} | Forks: {{ repo.forks }} | Watchers: {{ repo.watchers }}

TRAFFIC SUMMARY (Last {{ traffic.period }} days):
Total Views: {{ traffic.total_views }}
Unique Visitors: {{ traffic.unique_visitors }}
Total Clones: {{ traffic.total_clones }}
Unique Cloners: {{ traffic.unique_cloners }}
Average Daily Views: {{ traffic.average_views }}
Average Daily Clones: {{ traffic.average_clones }}
{%- if traffic.peak_views %}
Peak Views Day: {{ traffic.peak_views.timestamp }} - {{ traffic.peak_views.count }} views
{%- endif %}
{%- if traffic.peak_clones %}
Peak Clones Day: {{ traffic.peak_clones.timestamp }} - {{ traffic.peak_clones.count }} clones
{%- endif %}
{%- if referrers %}

TOP REFERRAL SOURCES:
{%- for r in referrers %}
  {{ loop.index }}. {{ r.referrer }}: {{ r.count }} views, {{ r.uniques }} uniques
{%- endfor %}
{%- endif %}
{%- if paths %}

MOST POPULAR PATHS:
{%- for p in paths %}
  {{ loop.index }}. {{ p.title }}
     Path: {{ p.path }}
     Views: {{ p.count }}, Unique: {{ p.uniques }}
{%- endfor %}
{%- endif %}

{{ rule }}"#;

#[derive(Serialize)]
struct RepoView<'a> {
    name: &'a str,
    description: &'a str,
    stars: String,
    forks: String,
    watchers: String,
}

#[derive(Serialize)]
struct PeakView {
    timestamp: String,
    count: String,
}

#[derive(Serialize)]
struct TrafficView {
    period: usize,
    total_views: String,
    unique_visitors: String,
    total_clones: String,
    unique_cloners: String,
    average_views: String,
    average_clones: String,
    peak_views: Option<PeakView>,
    peak_clones: Option<PeakView>,
}

#[derive(Serialize)]
struct ReferrerView<'a> {
    referrer: &'a str,
    count: String,
    uniques: String,
}

#[derive(Serialize)]
struct PathView<'a> {
    title: &'a str,
    path: &'a str,
    count: String,
    uniques: String,
}

/// Renders the fixed-layout text report.
///
/// Integers are thousands-separated, averages shown with one decimal, and
/// only the first [`TOP_ENTRIES`] referrers and paths are listed.
pub fn render_text(report: &Report) -> Result<String, TrafficError> {
    let info = &report.repository_info;
    let summary = &report.traffic_summary;

    let repo = RepoView {
        name: &info.name,
        description: info.description.as_deref().unwrap_or("No description"),
        stars: group_thousands(info.stars),
        forks: group_thousands(info.forks),
        watchers: group_thousands(info.watchers),
    };

    let traffic = TrafficView {
        period: if *summary == TrafficSummary::default() {
            TRAFFIC_WINDOW_DAYS
        } else {
            summary.analysis_period_days
        },
        total_views: group_thousands(summary.total_views),
        unique_visitors: group_thousands(summary.total_unique_visitors),
        total_clones: group_thousands(summary.total_clones),
        unique_cloners: group_thousands(summary.total_unique_cloners),
        average_views: format!("{:.1}", summary.average_daily_views),
        average_clones: format!("{:.1}", summary.average_daily_clones),
        peak_views: summary.peak_views_day.as_ref().map(peak_view),
        peak_clones: summary.peak_clones_day.as_ref().map(peak_view),
    };

    let referrers: Vec<ReferrerView<'_>> = report
        .referral_sources
        .iter()
        .take(TOP_ENTRIES)
        .map(|r| ReferrerView {
            referrer: &r.referrer,
            count: group_thousands(r.count),
            uniques: group_thousands(r.uniques),
        })
        .collect();

    let paths: Vec<PathView<'_>> = report
        .popular_paths
        .iter()
        .take(TOP_ENTRIES)
        .map(|p| PathView {
            title: if p.title.is_empty() { "No title" } else { p.title.as_str() },
            path: &p.path,
            count: group_thousands(p.count),
            uniques: group_thousands(p.uniques),
        })
        .collect();

    let mut context = Context::new();
    context.insert("rule", &"=".repeat(RULE_WIDTH));
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context.insert("repo", &repo);
    context.insert("traffic", &traffic);
    context.insert("referrers", &referrers);
    context.insert("paths", &paths);

    Ok(Tera::one_off(REPORT_TEMPLATE, &context, false)?)
}

fn peak_view(point: &DailyTrafficPoint) -> PeakView {
    PeakView {
        timestamp: point.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        count: group_thousands(point.count),
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits: Vec<char> = value.to_string().chars().collect();
    digits
        .rchunks(3)
        .rev()
        .map(|group| group.iter().collect::<String>())
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PathEntry, ReferralEntry, RepositoryInfo};
    use chrono::{TimeZone, Utc};

    fn report() -> Report {
        Report {
            repository_info: RepositoryInfo {
                name: "octocat/Hello-World".into(),
                description: Some("My first repo".into()),
                stars: 1520,
                forks: 9,
                watchers: 80,
            },
            traffic_summary: TrafficSummary {
                total_views: 14850,
                total_unique_visitors: 3782,
                total_clones: 173,
                total_unique_cloners: 128,
                average_daily_views: 1060.71,
                average_daily_clones: 12.36,
                peak_views_day: Some(DailyTrafficPoint {
                    timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
                    count: 2000,
                    uniques: 500,
                }),
                peak_clones_day: None,
                analysis_period_days: 14,
            },
            referral_sources: (1..=7)
                .map(|i| ReferralEntry {
                    referrer: format!("site{i}.com"),
                    count: 100 * i,
                    uniques: i,
                })
                .collect(),
            popular_paths: vec![PathEntry {
                path: "/octocat/Hello-World".into(),
                title: "Hello-World".into(),
                count: 3542,
                uniques: 2225,
            }],
            detailed_views: None,
            detailed_clones: None,
        }
    }

    #[test]
    fn groups_digits_by_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(14850), "14,850");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn renders_summary_block() {
        let text = render_text(&report()).unwrap();

        assert!(text.contains("REPOSITORY: octocat/Hello-World"));
        assert!(text.contains("Description: My first repo"));
        assert!(text.contains("Stars: 1,520 | Forks: 9 | Watchers: 80"));
        assert!(text.contains("TRAFFIC SUMMARY (Last 14 days):"));
        assert!(text.contains("Total Views: 14,850"));
        assert!(text.contains("Unique Visitors: 3,782"));
        assert!(text.contains("Average Daily Views: 1060.7"));
        assert!(text.contains("Average Daily Clones: 12.4"));
        assert!(text.contains("Peak Views Day: 2024-03-05T00:00:00Z - 2,000 views"));
        assert!(!text.contains("Peak Clones Day"));
    }

    #[test]
    fn lists_at_most_five_referrers() {
        let text = render_text(&report()).unwrap();

        assert!(text.contains("  1. site1.com: 100 views, 1 uniques"));
        assert!(text.contains("  5. site5.com: 500 views, 5 uniques"));
        assert!(!text.contains("site6.com"));
        assert!(!text.contains("site7.com"));
    }

    #[test]
    fn renders_popular_paths() {
        let text = render_text(&report()).unwrap();

        assert!(text.contains("MOST POPULAR PATHS:\n  1. Hello-World\n     Path: /octocat/Hello-World\n     Views: 3,542, Unique: 2,225"));
    }

    #[test]
    fn lists_at_most_five_paths() {
        let mut report = report();
        report.popular_paths = (1..=7)
            .map(|i| PathEntry {
                path: format!("/octocat/Hello-World/page{i}"),
                title: format!("Page {i}"),
                count: 10 * i,
                uniques: i,
            })
            .collect();

        let text = render_text(&report).unwrap();

        assert!(text.contains("  5. Page 5\n     Path: /octocat/Hello-World/page5"));
        assert!(!text.contains("  6. "));
        assert!(!text.contains("Page 6"));
        assert!(!text.contains("/page6"));
        assert!(!text.contains("Page 7"));
        assert!(!text.contains("/page7"));
    }

    #[test]
    fn computed_empty_window_shows_its_length() {
        let mut report = report();
        report.traffic_summary = TrafficSummary {
            total_views: 3,
            average_daily_views: 3.0,
            analysis_period_days: 1,
            ..TrafficSummary::default()
        };

        let text = render_text(&report).unwrap();

        assert!(text.contains("TRAFFIC SUMMARY (Last 1 days):"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut report = report();
        report.repository_info.description = None;
        report.traffic_summary = TrafficSummary::default();
        report.referral_sources.clear();
        report.popular_paths.clear();

        let text = render_text(&report).unwrap();

        assert!(text.contains("Description: No description"));
        assert!(text.contains("TRAFFIC SUMMARY (Last 14 days):"));
        assert!(text.contains("Average Daily Clones: 0.0\n\n===="));
        assert!(!text.contains("TOP REFERRAL SOURCES"));
        assert!(!text.contains("MOST POPULAR PATHS"));
        assert!(!text.contains("Peak Views Day"));
    }
}
