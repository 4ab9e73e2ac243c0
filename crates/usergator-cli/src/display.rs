//! Terminal output helpers.

use std::path::Path;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use usergator_core::Username;
use usergator_scanner::{PresenceState, ProbeOutcome, ProbeSummary};
use usergator_sites::SiteRegistry;

/// Status column label for a presence state.
pub fn status_label(presence: PresenceState) -> &'static str {
    match presence {
        PresenceState::Present => "FOUND",
        PresenceState::Absent => "NOT FOUND",
        PresenceState::Unknown => "UNKNOWN",
    }
}

fn styled_status(presence: PresenceState) -> String {
    let label = status_label(presence);
    match presence {
        PresenceState::Present => style(label).green().bold().to_string(),
        PresenceState::Absent => style(label).dim().to_string(),
        PresenceState::Unknown => style(label).yellow().to_string(),
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|value| value.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

pub fn scan_header(username: &Username, site_count: usize) {
    println!(
        "\n{}  scanning  {}  ({})\n",
        style("usergator").cyan().bold(),
        style(username).bold(),
        style(format!("{site_count} sites")).dim()
    );
}

/// Bar advanced once per completed site, cleared before the results table.
pub fn check_progress(site_count: usize) -> ProgressBar {
    let bar = ProgressBar::new(site_count as u64);
    if let Ok(bar_style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len} ({elapsed})")
    {
        bar.set_style(bar_style.progress_chars("#>-"));
    }
    bar.set_message("checking…");
    bar
}

pub fn sites_table(registry: &SiteRegistry) {
    let name_width = column_width("Site", registry.iter().map(|e| e.name.as_str()));

    println!(
        "{}  {}",
        style(format!("{:<name_width$}", "Site")).magenta().bold(),
        style("Pattern").magenta().bold()
    );
    println!("{}", "─".repeat(name_width + 40));

    for entry in registry {
        println!(
            "{}  {}",
            style(format!("{:<name_width$}", entry.name)).bold(),
            style(&entry.url_template).dim()
        );
    }
    println!("{}", "─".repeat(name_width + 40));
}

pub fn outcome_table(outcomes: &[ProbeOutcome]) {
    let name_width = column_width("Site", outcomes.iter().map(|o| o.site_name.as_str()));
    let url_width = column_width("URL", outcomes.iter().map(|o| o.final_url.as_str()));

    println!(
        "{}  {}  {}",
        style(format!("{:<name_width$}", "Site")).magenta().bold(),
        style(format!("{:<url_width$}", "URL")).magenta().bold(),
        style("Status").magenta().bold()
    );
    println!("{}", "─".repeat(name_width + url_width + 13));

    for outcome in outcomes {
        // Pad before styling so escape codes don't skew the columns.
        println!(
            "{}  {}  {}",
            style(format!("{:<name_width$}", outcome.site_name)).bold(),
            style(format!("{:<url_width$}", outcome.final_url)).dim(),
            styled_status(outcome.presence)
        );
        if let Some(error) = &outcome.error_message {
            println!("{:name_width$}  {}", "", style(format!("↳ {error}")).dim());
        }
    }
    println!("{}", "─".repeat(name_width + url_width + 13));
}

pub fn summary(summary: &ProbeSummary) {
    println!(
        "{}: {}   {}: {}   {}: {}\n",
        style("FOUND").green(),
        summary.present,
        style("NOT FOUND").dim(),
        summary.absent,
        style("UNKNOWN").yellow(),
        summary.unknown
    );
}

pub fn saved(path: &Path) {
    println!(
        "{} {}\n",
        style("Saved →").dim(),
        style(path.display()).bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(PresenceState::Present), "FOUND");
        assert_eq!(status_label(PresenceState::Absent), "NOT FOUND");
        assert_eq!(status_label(PresenceState::Unknown), "UNKNOWN");
    }

    #[test]
    fn test_check_progress_counts_sites() {
        let bar = check_progress(7);
        assert_eq!(bar.length(), Some(7));
        bar.inc(1);
        assert_eq!(bar.position(), 1);
    }

    #[test]
    fn test_column_width() {
        let values = ["GitHub", "Stack Overflow"];
        assert_eq!(column_width("Site", values.iter().copied()), 14);
        assert_eq!(column_width("Site", std::iter::empty()), 4);
    }
}
