//! Readability statistics and engagement scoring over extracted text.

mod scoring;
mod statistics;

pub use scoring::{
    EngagementScorer, Rule, Scorecard, RULES, SUGGEST_MORE_CONTENT, SUGGEST_QUESTIONS,
    SUGGEST_SHORTER_SENTENCES,
};
pub use statistics::{count_sentence_segments, count_words, Statistics, TextAnalyzer};

use serde::Serialize;

/// Full analysis of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub statistics: Statistics,
    pub engagement_score: u8,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Analyze and score a text in one step.
    pub fn from_text(text: &str) -> Self {
        let statistics = TextAnalyzer::new().analyze(text);
        let Scorecard { score, suggestions } = EngagementScorer::new().score(text, &statistics);

        Self {
            statistics,
            engagement_score: score,
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let result = AnalysisResult::from_text("Hello world.");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["engagementScore"], 70);
        assert_eq!(json["statistics"]["wordCount"], 2);
        assert_eq!(json["statistics"]["averageWordsPerSentence"], "1.0");
        assert_eq!(
            json["suggestions"],
            serde_json::json!([SUGGEST_MORE_CONTENT, SUGGEST_QUESTIONS])
        );
    }

    #[test]
    fn test_from_text_is_deterministic() {
        let text = "Short text. No questions here!";
        assert_eq!(AnalysisResult::from_text(text), AnalysisResult::from_text(text));
    }
}
