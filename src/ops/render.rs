//! Markdown rendering of entries, analyses and statistics.

use crate::ai::Analysis;
use crate::constants::MOOD_COLORS;
use crate::db::{Entry, Stats};

/// Capitalizes the first letter of a mood name for display.
fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolves a stored `name:hex` mood tag to its display name and color.
///
/// Unknown names fall back to the title-cased raw name and a white swatch,
/// so a journal written by a newer version still renders.
pub fn mood_from_tag(tag: &str) -> (String, String) {
    let name = tag.split(':').next().unwrap_or(tag);
    match MOOD_COLORS.iter().find(|(n, _)| *n == name) {
        Some((n, hex)) => (title_case(n), (*hex).to_string()),
        None => (title_case(name), "#FFFFFF".to_string()),
    }
}

/// Renders one day's entry: date header, message count, sentiment, themes,
/// mood, then the full conversation.
pub fn render_entry(entry: &Entry) -> String {
    let themes_str = if entry.themes.is_empty() {
        "No themes".to_string()
    } else {
        entry.themes.join(", ")
    };
    let sentiment_str = entry.sentiment.as_deref().unwrap_or("Unknown");

    let mood_str = match &entry.mood_color {
        Some(tag) => {
            let (name, hex) = mood_from_tag(tag);
            format!(" | **Mood:** {} ({})", name, hex)
        }
        None => String::new(),
    };

    let mut out = format!(
        "### {} ({} messages)\n**Sentiment:** {} | **Themes:** {}{}\n\n",
        entry.date,
        entry.conversation.len(),
        sentiment_str,
        themes_str,
        mood_str
    );

    for msg in &entry.conversation {
        out.push_str(&format!(
            "**You:** {}\n\n**Iris:** {}\n\n---\n",
            msg.user, msg.assistant
        ));
    }

    out
}

/// Renders the full history view.
pub fn render_history(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries yet. Start journaling to see your history here!".to_string();
    }

    let mut out = format!("## Your Journal History ({} days)\n\n", entries.len());
    for entry in entries {
        out.push_str(&render_entry(entry));
    }
    out
}

/// Renders search results for `term`.
pub fn render_search_results(term: &str, entries: &[Entry]) -> String {
    if entries.is_empty() {
        return format!("No entries found matching '{}'", term);
    }

    let mut out = format!(
        "## Search Results for '{}' ({} days)\n\n",
        term,
        entries.len()
    );
    for entry in entries {
        out.push_str(&render_entry(entry));
    }
    out
}

/// Renders the analysis panel for one message: sentiment with confidence,
/// then each surviving theme with its score.
pub fn render_analysis(analysis: &Analysis) -> String {
    let mut out = String::from("## Analysis\n\n### Sentiment\n");
    out.push_str(&format!(
        "{} ({:.1}% confidence)\n\n### Themes Detected\n",
        analysis.sentiment_label,
        analysis.sentiment_score * 100.0
    ));

    if analysis.themes.is_empty() {
        out.push_str("No specific themes detected\n");
    } else {
        for theme in &analysis.themes {
            out.push_str(&format!("- {} ({:.0}%)\n", theme.label, theme.score * 100.0));
        }
    }

    out
}

/// Renders the one-line stats bar.
pub fn render_stats_bar(stats: &Stats) -> String {
    let last = stats
        .last_entry_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Never".to_string());
    format!(
        "Your Stats: {} days journaled | Last journal date: {}",
        stats.total_days, last
    )
}

/// Renders the stats sidebar with per-sentiment message counts.
pub fn render_stats_sidebar(stats: &Stats) -> String {
    let count = |label: &str| stats.sentiment_counts.get(label).copied().unwrap_or(0);
    format!(
        "### Stats\n- Total: {}\n- Positive: {}\n- Neutral: {}\n- Negative: {}\n",
        stats.total_days,
        count("POSITIVE"),
        count("NEUTRAL"),
        count("NEGATIVE")
    )
}
