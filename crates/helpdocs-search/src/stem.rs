//! Keyword extraction: tokenize, filter, stem, count.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Stems seen fewer times than this on a page are dropped.
pub const DEFAULT_MIN_STEM_COUNT: usize = 3;

/// Tokens shorter than this are never keywords.
const MIN_TOKEN_LEN: usize = 3;

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)[^a-z0-9 ]").unwrap());

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Common English words that carry no search value.
const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are", "aren",
    "because", "been", "before", "being", "below", "between", "both", "but", "can", "cannot",
    "could", "did", "didn", "does", "doesn", "doing", "don", "down", "during", "each", "even",
    "few", "for", "from", "further", "get", "gets", "had", "has", "have", "having", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "into", "isn", "its", "itself", "just",
    "let", "like", "made", "make", "many", "may", "more", "most", "much", "must", "myself", "nor",
    "not", "now", "off", "once", "one", "only", "other", "our", "ours", "ourselves", "out", "over",
    "own", "same", "see", "she", "should", "since", "some", "still", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "too", "under", "until", "upon", "use", "used", "using", "very", "was",
    "wasn", "way", "well", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "won", "would", "you", "your", "yours", "yourself", "yourselves",
];

/// Whether `word` (lower-case) is a stopword.
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Split text into lower-case candidate keywords.
///
/// Anything outside `[a-z0-9 ]` becomes a word break. Tokens shorter than
/// three characters and stopwords are dropped. Duplicates are kept.
///
/// # Example
///
/// ```
/// use helpdocs_search::tokenize;
///
/// assert_eq!(tokenize("Sync your notes: it's on!"), vec!["sync", "notes"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    NON_WORD_RE
        .replace_all(text, " ")
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .filter(|word| word.len() >= MIN_TOKEN_LEN && !is_stopword(word))
        .collect()
}

/// Stem a single lower-case token.
#[must_use]
pub fn stem(word: &str) -> String {
    STEMMER.stem(word).into_owned()
}

/// Count stems over the token stream of `text`.
#[must_use]
pub fn stem_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(stem(&token)).or_insert(0) += 1;
    }
    counts
}

/// Stems of `text` occurring at least `min_count` times, sorted.
///
/// # Example
///
/// ```
/// use helpdocs_search::find_stems;
///
/// let text = "syncing synced sync notes";
/// assert_eq!(find_stems(text, 3), vec!["sync"]);
/// assert_eq!(find_stems(text, 1), vec!["note", "sync"]);
/// ```
#[must_use]
pub fn find_stems(text: &str, min_count: usize) -> Vec<String> {
    stem_counts(text)
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(stem, _)| stem)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_tokenize_drops_short_words_and_stopwords() {
        assert_eq!(
            tokenize("The app is on an iPad, and it syncs."),
            vec!["app", "ipad", "syncs"]
        );
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(tokenize("e-mail re:sync"), vec!["mail", "sync"]);
    }

    #[test]
    fn test_counts_are_not_deduplicated() {
        let counts = stem_counts("note notes noted");
        assert_eq!(counts.get("note"), Some(&3));
    }

    #[test]
    fn test_floor_two_vs_three() {
        let text = "backup backups export";
        assert_eq!(find_stems(text, 3), Vec::<String>::new());
        assert_eq!(find_stems(text, 2), vec!["backup"]);
    }

    #[test]
    fn test_floor_zero_keeps_every_stem() {
        assert_eq!(find_stems("Tags", 0), vec!["tag"]);
    }
}
