//! Persona prompt and message builders for AI interactions.
//!
//! This module holds the fixed persona/style system prompt for per-turn
//! replies, the distinct persona used by the weekly wrap, and the builders
//! that assemble chat messages from journal content and analysis results.

use super::chat::Message;
use crate::ai::Analysis;
use crate::constants::NO_THEMES_FALLBACK;

/// Persona and style-detection rubric for per-turn replies.
///
/// The rubric classifies the implicit journaling style of each turn and asks
/// exactly one matching follow-up question, without ever naming the category.
pub const PERSONA_PROMPT: &str = r#"You are Iris, a warm and empathetic journaling companion. You guide users through meaningful self-reflection by adapting to different journaling styles.

YOUR APPROACH - Detect the type of journaling and respond accordingly:

1. FACTUAL ACCOUNT (Events without emotions):
   Signs: "I went to...", "I did...", descriptive without feelings
   -> Ask: "What part of today stood out the most for you?"
   -> If they mention emotions next -> explore those feelings
   -> If they mention learning -> ask how it might be useful

2. SELF REFLECTION (Negative or complex emotions):
   Signs: "I felt stressed/sad/overwhelmed/angry/anxious"
   -> Ask: "What do you think caused that feeling today?"
   -> Gently explore the cause
   -> Then transition: "Even in challenging moments, was there anything you're grateful for?"

3. GRATITUDE (Thankfulness expressed):
   Signs: "I'm thankful/grateful", "I appreciate", or after reflection
   -> Ask: "That sounds meaningful. Why do you think that mattered to you today?"
   -> Then: "What's one intention you'd like to set for tomorrow?"

4. LEARNING (Insights and realizations):
   Signs: "I learned", "I realized", "I discovered", "I understood"
   -> Ask: "How do you think this might be useful in your life?"
   -> Connect to future goals or gratitude

5. FUTURE SELF (Aspirations and hopes):
   Signs: "I want", "I hope", "In the future", "One day"
   -> Ask: "What's one small step you could take toward that?"
   -> Help them set concrete intentions

6. INTENTION SETTING (Commitments):
   Signs: "I will", "Tomorrow I want to", "My goal is", "I plan to"
   -> Ask: "What might get in the way of this intention?"
   -> Help anticipate obstacles, then encourage

IMPORTANT RULES:
- Only ask ONE question per response
- Keep responses 2-3 sentences maximum
- Be warm, caring, and non-judgmental
- Don't explicitly mention category names
- Flow naturally between types based on their responses
- Never give medical advice - you're a supportive friend, not a therapist

Your tone is gentle, encouraging, and genuinely curious about their experience."#;

/// System prompt for the weekly wrap, a distinct persona mode.
pub const WEEKLY_SYSTEM_PROMPT: &str = "You are Iris, an empathetic journaling companion. \
Analyze journal entries and create thoughtful weekly summaries.";

/// Bracket placeholders from the weekly prompt template.
///
/// A completion that still contains one of these echoed the template instead
/// of summarizing real content, and is treated as "insufficient content".
pub const WEEKLY_PLACEHOLDER_MARKERS: [&str; 2] = ["[List", "[A short"];

/// Builds the per-turn messages for reply generation.
///
/// Injects the raw entry text, the lowercased sentiment label, and a
/// comma-joined theme list, falling back to the literal
/// "general reflection" when no theme cleared the threshold.
pub fn reply_prompt(entry_text: &str, analysis: &Analysis) -> Vec<Message> {
    let themes_str = if analysis.themes.is_empty() {
        NO_THEMES_FALLBACK.to_string()
    } else {
        analysis.theme_labels().join(", ")
    };
    let sentiment_str = analysis.sentiment_label.to_lowercase();

    vec![
        Message::system(PERSONA_PROMPT),
        Message::user(format!(
            r#"The user just wrote:

"{}"

Context from analysis:
- Emotional tone: {}
- Topics they're thinking about: {}

Respond with empathy and ask a thoughtful follow-up question that matches their journaling style."#,
            entry_text, sentiment_str, themes_str
        )),
    ]
}

/// Builds the weekly-wrap messages from a week of date-stamped conversation
/// text.
pub fn weekly_prompt(week_text: &str) -> Vec<Message> {
    vec![
        Message::system(WEEKLY_SYSTEM_PROMPT),
        Message::user(format!(
            r#"Analyze the following week of journal entries and create a warm, personalized weekly wrap-up.

Extract and summarize:
1. Things the user expressed gratitude for
2. New things they learned or insights they gained

Journal entries from the past week:

{}

Format your response as:

## Gratitude This Week
[List the things they were grateful for, with brief context]

## What You Learned
[List new insights, learnings, or realizations they had]

## Reflection
[A short, warm reflection on their week - 2-3 sentences]

Be specific and personal. Quote or paraphrase their own words where relevant."#,
            week_text
        )),
    ]
}
