use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};

use super::result::{AnalysisResult, ResultBuilder, round4};
use super::Analyzer;

pub const INVALID_TEXT: &str = "Invalid input text";
pub const SHORT_TEXT: &str = "Text is very short for meaningful analysis";

const SHORT_TEXT_MAX_WORDS: usize = 10;
const TOP_WORDS: usize = 10;

// Lexicon sentiment is a rough signal, not a trained model.
const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "positive", "happy",
];
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "disappointing", "negative", "sad", "poor",
];

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    pub score: f64,
    pub positive_hits: usize,
    pub negative_hits: usize,
}

impl Sentiment {
    pub fn of(words: &[&str]) -> Self {
        let mut positive_hits = 0;
        let mut negative_hits = 0;
        for word in words {
            let normalized = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if POSITIVE_WORDS.contains(&normalized.as_str()) {
                positive_hits += 1;
            } else if NEGATIVE_WORDS.contains(&normalized.as_str()) {
                negative_hits += 1;
            }
        }
        let score = if words.is_empty() {
            0.0
        } else {
            (positive_hits as f64 - negative_hits as f64) / words.len() as f64
        };
        Sentiment {
            score,
            positive_hits,
            negative_hits,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.score > 0.0 {
            "positive"
        } else if self.score < 0.0 {
            "negative"
        } else {
            "neutral"
        }
    }
}

pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn readability(word_count: usize, sentence_count: usize, avg_word_length: f64) -> f64 {
    if word_count == 0 || sentence_count == 0 {
        return 0.0;
    }
    let words = word_count as f64;
    let score = 206.835 - 1.015 * (words / sentence_count as f64) - 84.6 * (avg_word_length / words);
    score.clamp(0.0, 100.0)
}

/// Most frequent tokens, ties kept in first-seen order.
pub fn top_words<'a>(words: &[&'a str], limit: usize) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, &word) in words.iter().enumerate() {
        counts.entry(word).or_insert((index, 0)).1 += 1;
    }
    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (first, count))| (word, first, count))
        .collect();
    ranked.sort_unstable_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _, count)| (word, count))
        .collect()
}

impl Analyzer {
    /// Accepts any JSON value; only non-blank strings are analyzed.
    pub fn analyze_text_value(&self, input: &Value) -> AnalysisResult {
        match input.as_str() {
            Some(text) => self.analyze_text(text),
            None => AnalysisResult::failure(INVALID_TEXT, text_advice()),
        }
    }

    pub fn analyze_text(&self, text: &str) -> AnalysisResult {
        if text.trim().is_empty() {
            return AnalysisResult::failure(INVALID_TEXT, text_advice());
        }

        let mut builder = ResultBuilder::start();
        let words: Vec<&str> = text.split_whitespace().collect();
        let sentences = split_sentences(text);

        let word_count = words.len();
        let sentence_count = sentences.len();
        let mut unique: Vec<&str> = words.clone();
        unique.sort_unstable();
        unique.dedup();
        let unique_words = unique.len();

        let avg_word_length = if word_count > 0 {
            words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64
        } else {
            0.0
        };
        let avg_sentence_length = if sentence_count > 0 {
            word_count as f64 / sentence_count as f64
        } else {
            0.0
        };
        let readability_score = readability(word_count, sentence_count, avg_word_length);
        let sentiment = Sentiment::of(&words);
        let frequency: Vec<Value> = top_words(&words, TOP_WORDS)
            .into_iter()
            .map(|(word, count)| json!({ "word": word, "count": count }))
            .collect();

        builder
            .data("character_count", text.chars().count())
            .data("word_count", word_count)
            .data("sentence_count", sentence_count)
            .data("unique_words", unique_words)
            .data("avg_word_length", round4(avg_word_length))
            .data("avg_sentence_length", round4(avg_sentence_length))
            .data("readability_score", round4(readability_score))
            .data(
                "sentiment",
                json!({
                    "score": round4(sentiment.score),
                    "label": sentiment.label(),
                    "positive_hits": sentiment.positive_hits,
                    "negative_hits": sentiment.negative_hits,
                }),
            )
            .data("word_frequency", frequency);

        if word_count <= SHORT_TEXT_MAX_WORDS {
            builder.warn(SHORT_TEXT);
        }
        for advice in text_advice() {
            builder.recommend(advice);
        }

        let lexical_diversity = if word_count > 0 {
            unique_words as f64 / word_count as f64
        } else {
            0.0
        };
        let elapsed = builder.elapsed();
        builder
            .metric("processing_time", elapsed)
            .metric("readability_score", readability_score)
            .metric("sentiment_score", sentiment.score)
            .metric("lexical_diversity", lexical_diversity);

        tracing::debug!(words = word_count, sentences = sentence_count, "Text analysis complete");
        builder.finish()
    }
}

fn text_advice() -> Vec<String> {
    vec![
        "Longer samples give more stable statistics".to_string(),
        "Sentiment is lexicon-based; review results in context".to_string(),
    ]
}
