//! Lexical overlap retrieval
//!
//! Ranks chunks by the number of distinct words they share with the question.
//! Intentionally the simplest possible baseline: exact word matches, no
//! stemming, no term-frequency weighting. Deterministic and dependency-free,
//! at the cost of poor recall for paraphrased questions.

use std::cmp::Reverse;
use std::collections::HashSet;

/// Default number of chunks forwarded as context
pub const DEFAULT_TOP_K: usize = 3;

/// Lowercase word tokens of a text. A word is a maximal run of
/// alphanumeric-or-underscore characters; Unicode-aware, so non-Latin
/// scripts tokenize correctly.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Count of distinct words shared between a chunk and the question tokens
fn overlap_score(chunk: &str, question_words: &HashSet<String>) -> usize {
    tokenize(chunk)
        .iter()
        .filter(|word| question_words.contains(*word))
        .count()
}

/// Select the `top_k` most relevant chunks for a question, most relevant
/// first.
///
/// Chunks are scored by word-set overlap and sorted descending. The sort is
/// stable, so chunks with equal scores keep their original document order.
/// Only positively scoring chunks are returned; if no chunk shares a single
/// word with the question, the first `top_k` of the sorted sequence are
/// returned instead so the caller always gets some context.
pub fn rank(question: &str, chunks: &[String], top_k: usize) -> Vec<String> {
    if chunks.is_empty() {
        return Vec::new();
    }

    let question_words = tokenize(question);

    let mut scored: Vec<(usize, &String)> = chunks
        .iter()
        .map(|chunk| (overlap_score(chunk, &question_words), chunk))
        .collect();

    // Stable sort: equal scores preserve original chunk position
    scored.sort_by_key(|(score, _)| Reverse(*score));

    let relevant: Vec<String> = scored
        .iter()
        .filter(|(score, _)| *score > 0)
        .take(top_k)
        .map(|(_, chunk)| (*chunk).clone())
        .collect();

    if !relevant.is_empty() {
        return relevant;
    }

    // No chunk shares a word with the question: fall back to the best of
    // the worst rather than returning nothing
    scored
        .into_iter()
        .take(top_k)
        .map(|(_, chunk)| chunk.clone())
        .collect()
}
