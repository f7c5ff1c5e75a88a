//! Word and sentence statistics over extracted text.

use serde::{Serialize, Serializer};

/// Characters that end a sentence segment.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Counts derived from a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub word_count: usize,
    /// Always at least 1.
    pub sentence_count: usize,
    /// Unrounded; serialized with one fractional digit.
    #[serde(serialize_with = "serialize_one_decimal")]
    pub average_words_per_sentence: f64,
}

impl Statistics {
    /// Average rendered for display, e.g. `"12.5"`.
    pub fn average_display(&self) -> String {
        one_decimal(self.average_words_per_sentence)
    }
}

/// Format with one fractional digit, breaking exact ties upward.
///
/// Only multiples of 0.25 can sit exactly halfway between two tenths, and
/// those scale by 10 without rounding error.
fn one_decimal(value: f64) -> String {
    let scaled = value * 10.0;
    if (value * 4.0).fract() == 0.0 && scaled.fract() == 0.5 {
        return format!("{:.1}", (scaled.floor() + 1.0) / 10.0);
    }
    format!("{:.1}", value)
}

fn serialize_one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&one_decimal(*value))
}

/// Computes [`Statistics`] for a text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> Statistics {
        let word_count = count_words(text);
        let sentence_count = count_sentence_segments(text);

        Statistics {
            word_count,
            sentence_count,
            average_words_per_sentence: word_count as f64 / sentence_count as f64,
        }
    }
}

/// Number of maximal non-whitespace runs.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of segments produced by splitting on runs of `.`, `!` or `?`.
///
/// Empty segments count, so `"a.b."` is 3 and `""` is 1. The result is
/// therefore one more than the number of terminator runs and never zero.
pub fn count_sentence_segments(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in text.chars() {
        let is_terminator = SENTENCE_TERMINATORS.contains(&c);
        if is_terminator && !in_run {
            runs += 1;
        }
        in_run = is_terminator;
    }
    runs + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("  leading and trailing  "), 3);
        assert_eq!(count_words("tabs\tand\nnewlines\r\nmixed"), 4);
        assert_eq!(count_words("page one\x0cpage two"), 4);
    }

    #[test]
    fn test_sentence_segments() {
        assert_eq!(count_sentence_segments(""), 1);
        assert_eq!(count_sentence_segments("no terminator here"), 1);
        assert_eq!(count_sentence_segments("Hello world."), 2);
        assert_eq!(count_sentence_segments("a.b."), 3);
        assert_eq!(count_sentence_segments("Wait... what?!"), 3);
        assert_eq!(count_sentence_segments(".leading"), 2);
        assert_eq!(count_sentence_segments("?!."), 2);
    }

    #[test]
    fn test_analyze_hello_world() {
        let stats = TextAnalyzer::new().analyze("Hello world.");
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.average_words_per_sentence, 1.0);
        assert_eq!(stats.average_display(), "1.0");
    }

    #[test]
    fn test_analyze_empty() {
        let stats = TextAnalyzer::new().analyze("");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 1);
        assert_eq!(stats.average_words_per_sentence, 0.0);
        assert_eq!(stats.average_display(), "0.0");
    }

    #[test]
    fn test_average_keeps_precision() {
        // 7 words over 3 segments
        let stats = TextAnalyzer::new().analyze("one two three. four five! six seven");
        assert_eq!(stats.word_count, 7);
        assert_eq!(stats.sentence_count, 3);
        assert!((stats.average_words_per_sentence - 7.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.average_display(), "2.3");
    }

    #[test]
    fn test_average_ties_round_up() {
        // 5 words over 4 segments
        let stats = TextAnalyzer::new().analyze("a b. c. d. e");
        assert_eq!(stats.average_words_per_sentence, 1.25);
        assert_eq!(stats.average_display(), "1.3");
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["averageWordsPerSentence"], "1.3");

        assert_eq!(one_decimal(2.25), "2.3");
        assert_eq!(one_decimal(0.75), "0.8");
        assert_eq!(one_decimal(0.05), "0.1");
        assert_eq!(one_decimal(1.24), "1.2");
        assert_eq!(one_decimal(3.0), "3.0");
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let text = "Is this stable? It should be. Twice over!";
        let analyzer = TextAnalyzer::new();
        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }

    #[test]
    fn test_serializes_camel_case_with_one_decimal() {
        let stats = TextAnalyzer::new().analyze("Hello world.");
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["wordCount"], 2);
        assert_eq!(json["sentenceCount"], 2);
        assert_eq!(json["averageWordsPerSentence"], "1.0");
    }
}
