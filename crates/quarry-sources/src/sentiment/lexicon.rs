//! Keyword lexicon scoring.

/// Words counted as positive.
pub const POSITIVE_WORDS: &[&str] = &["bullish", "growth", "profit", "gain", "positive"];

/// Words counted as negative.
pub const NEGATIVE_WORDS: &[&str] = &["bearish", "loss", "drop", "decline", "negative"];

/// Score `text` in `[-1.0, 1.0]`.
///
/// Each lexicon word contributes once if it occurs anywhere in the
/// lowercased text (substring match, so `gains` counts as `gain`). The
/// score is `(pos - neg) / (pos + neg)`, or `0.0` when nothing matches.
#[must_use]
pub fn score(text: &str) -> f64 {
    let text = text.to_lowercase();
    let count = |words: &[&str]| words.iter().filter(|w| text.contains(*w)).count();

    let positive = count(POSITIVE_WORDS);
    let negative = count(NEGATIVE_WORDS);
    let total = positive + negative;

    if total == 0 {
        return 0.0;
    }
    (positive as f64 - negative as f64) / total as f64
}
