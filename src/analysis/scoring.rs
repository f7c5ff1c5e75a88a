//! Rule-based engagement scoring.
//!
//! Score penalties and suggestions come from one rule table so the two can
//! never disagree about thresholds.

use super::statistics::Statistics;

/// Starting score before penalties.
pub const BASE_SCORE: i32 = 100;

pub const SUGGEST_MORE_CONTENT: &str = "Consider adding more content for better engagement.";
pub const SUGGEST_SHORTER_SENTENCES: &str =
    "Try breaking down some longer sentences for better readability.";
pub const SUGGEST_QUESTIONS: &str = "Add questions to encourage user interaction.";

/// One scoring rule.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&str, &Statistics) -> bool,
    pub penalty: i32,
    pub suggestion: Option<&'static str>,
}

/// Evaluated in order; suggestions are emitted in this order too.
pub const RULES: &[Rule] = &[
    Rule {
        name: "short_content",
        applies: short_content,
        penalty: 20,
        suggestion: Some(SUGGEST_MORE_CONTENT),
    },
    Rule {
        name: "long_sentences",
        applies: long_sentences,
        penalty: 20,
        suggestion: Some(SUGGEST_SHORTER_SENTENCES),
    },
    Rule {
        name: "short_sentences",
        applies: short_sentences,
        penalty: 10,
        suggestion: None,
    },
    Rule {
        name: "long_content",
        applies: long_content,
        penalty: 10,
        suggestion: None,
    },
    Rule {
        name: "no_questions",
        applies: no_questions,
        penalty: 0,
        suggestion: Some(SUGGEST_QUESTIONS),
    },
];

fn short_content(_: &str, stats: &Statistics) -> bool {
    stats.word_count < 100
}

fn long_sentences(_: &str, stats: &Statistics) -> bool {
    stats.average_words_per_sentence > 25.0
}

fn short_sentences(_: &str, stats: &Statistics) -> bool {
    stats.average_words_per_sentence < 10.0
}

fn long_content(_: &str, stats: &Statistics) -> bool {
    stats.word_count > 1000
}

fn no_questions(text: &str, _: &Statistics) -> bool {
    !text.contains('?')
}

/// Score and suggestions for one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    /// Clamped to 0..=100.
    pub score: u8,
    pub suggestions: Vec<String>,
}

/// Applies [`RULES`] to a text and its statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementScorer;

impl EngagementScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, text: &str, stats: &Statistics) -> Scorecard {
        let mut score = BASE_SCORE;
        let mut suggestions = Vec::new();

        for rule in RULES.iter().filter(|rule| (rule.applies)(text, stats)) {
            tracing::trace!("Rule {} applies (-{})", rule.name, rule.penalty);
            score -= rule.penalty;
            if let Some(suggestion) = rule.suggestion {
                suggestions.push(suggestion.to_string());
            }
        }

        Scorecard {
            score: score.clamp(0, 100) as u8,
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(word_count: usize, sentence_count: usize) -> Statistics {
        Statistics {
            word_count,
            sentence_count,
            average_words_per_sentence: word_count as f64 / sentence_count as f64,
        }
    }

    #[test]
    fn test_hello_world() {
        let card = EngagementScorer::new().score("Hello world.", &stats(2, 2));
        assert_eq!(card.score, 70);
        assert_eq!(card.suggestions, vec![SUGGEST_MORE_CONTENT, SUGGEST_QUESTIONS]);
    }

    #[test]
    fn test_empty_text() {
        let card = EngagementScorer::new().score("", &stats(0, 1));
        assert_eq!(card.score, 70);
        assert_eq!(card.suggestions, vec![SUGGEST_MORE_CONTENT, SUGGEST_QUESTIONS]);
    }

    #[test]
    fn test_long_wordy_text_with_question() {
        let card = EngagementScorer::new().score("Why?", &stats(1500, 50));
        assert_eq!(card.score, 70);
        assert_eq!(card.suggestions, vec![SUGGEST_SHORTER_SENTENCES]);
    }

    #[test]
    fn test_ideal_text_keeps_full_score() {
        let card = EngagementScorer::new().score("Any questions?", &stats(300, 20));
        assert_eq!(card.score, 100);
        assert!(card.suggestions.is_empty());
    }

    #[test]
    fn test_average_thresholds_are_strict() {
        let scorer = EngagementScorer::new();
        // avg exactly 25 and exactly 10: no sentence-length penalty
        assert_eq!(scorer.score("?", &stats(250, 10)).score, 100);
        assert_eq!(scorer.score("?", &stats(200, 20)).score, 100);
        // just past each threshold
        assert_eq!(scorer.score("?", &stats(260, 10)).score, 80);
        assert_eq!(scorer.score("?", &stats(190, 20)).score, 90);
    }

    #[test]
    fn test_word_count_thresholds_are_strict() {
        let scorer = EngagementScorer::new();
        assert_eq!(scorer.score("?", &stats(100, 10)).score, 100);
        assert_eq!(scorer.score("?", &stats(99, 9)).score, 80);
        assert_eq!(scorer.score("?", &stats(1000, 50)).score, 100);
        assert_eq!(scorer.score("?", &stats(1001, 50)).score, 90);
    }

    #[test]
    fn test_penalties_accumulate() {
        // short content and long sentences together
        let card = EngagementScorer::new().score("no question", &stats(60, 2));
        assert_eq!(card.score, 60);
        assert_eq!(
            card.suggestions,
            vec![SUGGEST_MORE_CONTENT, SUGGEST_SHORTER_SENTENCES, SUGGEST_QUESTIONS]
        );
    }

    #[test]
    fn test_score_always_in_range() {
        let scorer = EngagementScorer::new();
        for words in [0, 1, 9, 10, 99, 100, 500, 1000, 1001, 50_000] {
            for sentences in [1, 2, 3, 10, 100, 1000] {
                let card = scorer.score("", &stats(words, sentences));
                assert!(card.score <= 100);
            }
        }
    }

    #[test]
    fn test_rule_table_suggestion_order() {
        let with_suggestions: Vec<_> = RULES.iter().filter_map(|r| r.suggestion).collect();
        assert_eq!(
            with_suggestions,
            vec![SUGGEST_MORE_CONTENT, SUGGEST_SHORTER_SENTENCES, SUGGEST_QUESTIONS]
        );
    }
}
