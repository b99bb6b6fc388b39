//! Analysis result types and the theme selection rule.

use crate::constants::{MAX_THEMES, THEME_SCORE_THRESHOLD};
use serde::{Deserialize, Serialize};

/// A theme label with its classification confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeScore {
    /// One of the fixed theme labels.
    pub label: String,
    /// Classification confidence in [0, 1].
    pub score: f32,
}

/// The structured analysis of a single journal message.
///
/// `sentiment_label` and `themes` describe only the analyzed message. The
/// store overwrites the day's aggregate fields with these values on every
/// append; it never merges across messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Best sentiment label from the model's closed label set.
    pub sentiment_label: String,
    /// Confidence of the sentiment label, in [0, 1].
    pub sentiment_score: f32,
    /// Themes that cleared the threshold, ranked by descending score, at most
    /// [`MAX_THEMES`]. Empty when nothing cleared the threshold.
    pub themes: Vec<ThemeScore>,
}

impl Analysis {
    /// Theme labels without scores, in rank order.
    pub fn theme_labels(&self) -> Vec<String> {
        self.themes.iter().map(|t| t.label.clone()).collect()
    }
}

/// Applies the theme selection rule to raw per-label scores.
///
/// Keeps labels with confidence strictly greater than
/// [`THEME_SCORE_THRESHOLD`], ranks them by descending score and truncates to
/// [`MAX_THEMES`]. An empty result is valid ("no themes detected"), never an
/// error.
pub fn select_themes(mut scored: Vec<ThemeScore>) -> Vec<ThemeScore> {
    scored.retain(|t| t.score > THEME_SCORE_THRESHOLD);
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(MAX_THEMES);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f32)]) -> Vec<ThemeScore> {
        pairs
            .iter()
            .map(|(label, score)| ThemeScore {
                label: label.to_string(),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_select_themes_threshold_and_truncation() {
        let input = scores(&[
            ("Work & Career", 0.9),
            ("Relationships & Social", 0.5),
            ("Health & Wellness", 0.31),
            ("Personal Growth", 0.29),
            ("Nature & Outdoors", 0.1),
        ]);

        let selected = select_themes(input);
        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0].label, "Work & Career");
        assert_eq!(selected[1].label, "Relationships & Social");
        assert_eq!(selected[2].label, "Health & Wellness");
    }

    #[test]
    fn test_select_themes_all_below_threshold() {
        let input = scores(&[
            ("Work & Career", 0.30),
            ("Health & Wellness", 0.2),
            ("Nature & Outdoors", 0.05),
        ]);

        // 0.30 does not clear a strictly-greater-than threshold
        let selected = select_themes(input);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_select_themes_sorts_descending() {
        let input = scores(&[
            ("Daily Life & Routine", 0.4),
            ("Emotions & Mental Health", 0.8),
            ("Creativity & Hobbies", 0.6),
        ]);

        let selected = select_themes(input);
        let labels: Vec<_> = selected.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Emotions & Mental Health",
                "Creativity & Hobbies",
                "Daily Life & Routine"
            ]
        );
    }

    #[test]
    fn test_theme_labels() {
        let analysis = Analysis {
            sentiment_label: "positive".to_string(),
            sentiment_score: 0.95,
            themes: scores(&[("Health & Wellness", 0.7), ("Nature & Outdoors", 0.4)]),
        };

        assert_eq!(
            analysis.theme_labels(),
            vec!["Health & Wellness", "Nature & Outdoors"]
        );
    }
}
