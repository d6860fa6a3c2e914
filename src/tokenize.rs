//! The text-to-frequency pipeline: normalize, filter, count.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::config::Config;

/// Turns raw text into filtered tokens. Holds the compiled cleanup regex so
/// repeated submissions don't recompile it.
pub struct Tokenizer {
    // Everything that is not a word character, whitespace, or apostrophe.
    junk: Regex,
    pub stop_words: HashSet<String>,
    pub min_word_length: usize,
    pub max_words: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        let junk = Regex::new(r"[^\w\s']").expect("Unable to compile cleanup regex");

        Tokenizer {
            junk,
            stop_words: Default::default(),
            min_word_length: 0,
            max_words: 200,
        }
    }
}

impl Tokenizer {
    pub fn from_config(config: &Config) -> Self {
        Tokenizer {
            stop_words: config.stop_words().clone(),
            min_word_length: config.min_word_length,
            max_words: config.max_words,
            ..Default::default()
        }
    }

    pub fn with_stop_words(mut self, words: &[&str]) -> Self {
        self.stop_words = words.iter().map(|w| w.to_lowercase()).collect();
        self
    }

    pub fn with_min_word_length(mut self, value: usize) -> Self {
        self.min_word_length = value;
        self
    }

    pub fn with_max_words(mut self, value: usize) -> Self {
        self.max_words = value;
        self
    }

    /// Lowercase, strip punctuation, and split into tokens in first-seen
    /// order. Apostrophes are dropped outright so contractions collapse
    /// ("don't" becomes "dont" rather than splitting). Any leftover
    /// punctuation or digits at token edges are trimmed; tokens that end up
    /// empty are discarded. Accepts anything, never errors.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let spaced = self.junk.replace_all(&lowered, " ");
        let cleaned = spaced.replace('\'', "");

        cleaned
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_ascii_digit()))
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Drop stop words and anything shorter than `min_word_length`.
    /// Duplicates and relative order survive; counting happens later.
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|word| {
                word.chars().count() >= self.min_word_length && !self.stop_words.contains(word)
            })
            .collect()
    }

    pub fn process(&self, text: &str) -> Vec<String> {
        self.filter(self.normalize(text))
    }

    /// Normalize, filter, and count in one call.
    pub fn word_frequencies(&self, text: &str) -> Vec<(String, usize)> {
        count_top(&self.process(text), self.max_words)
    }
}

/// Aggregate occurrence counts and keep the `max_words` most frequent
/// tokens, ordered by descending count. Ties are broken by first occurrence
/// in the token stream, which keeps truncation deterministic.
/// `max_words == 0` yields an empty mapping.
pub fn count_top(tokens: &[String], max_words: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (index, token) in tokens.iter().enumerate() {
        let entry = counts.entry(token.as_str()).or_insert((0, index));
        entry.0 += 1;
    }

    let mut sorted: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    sorted.sort_by(|a, b| {
        let (count_a, first_a) = a.1;
        let (count_b, first_b) = b.1;
        count_b.cmp(&count_a).then(first_a.cmp(&first_b))
    });

    sorted
        .into_iter()
        .take(max_words)
        .map(|(word, (count, _))| (word.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config_tokenizer() -> Tokenizer {
        Tokenizer::from_config(&Config::default())
    }

    #[test]
    fn cat_mat_scenario() {
        let tokenizer = default_config_tokenizer();

        // Apostrophe removal happens before tokenization, so the
        // possessive "Cat's" becomes the distinct token "cats".
        let tokens = tokenizer.process("The Cat sat on the Cat's mat.");
        assert_eq!(tokens, vec!["cat", "sat", "cats", "mat"]);

        let frequencies = count_top(&tokens, 50);
        assert_eq!(
            frequencies,
            vec![
                ("cat".to_string(), 1),
                ("sat".to_string(), 1),
                ("cats".to_string(), 1),
                ("mat".to_string(), 1)
            ]
        );
    }

    #[test]
    fn repeated_words_aggregate() {
        let tokenizer = default_config_tokenizer();

        let tokens = tokenizer.process("The Cat sat on the cat mat.");
        assert_eq!(tokens, vec!["cat", "sat", "cat", "mat"]);

        let frequencies = count_top(&tokens, 50);
        assert_eq!(
            frequencies,
            vec![
                ("cat".to_string(), 2),
                ("sat".to_string(), 1),
                ("mat".to_string(), 1)
            ]
        );
    }

    #[test]
    fn normalize_strips_edges_and_lowercases() {
        let tokenizer = Tokenizer::default();

        let tokens = tokenizer.normalize("  Hello, WORLD!! 42 foo123bar ...baz7 ");
        for token in &tokens {
            assert_eq!(token, &token.to_lowercase());
            assert!(!token.is_empty());
            let first = token.chars().next().unwrap();
            let last = token.chars().last().unwrap();
            for c in [first, last] {
                assert!(!c.is_ascii_punctuation() && !c.is_ascii_digit(), "{token:?}");
            }
        }
        assert_eq!(tokens, vec!["hello", "world", "foo123bar", "baz"]);
    }

    #[test]
    fn normalize_collapses_contractions() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.normalize("don't can't"), vec!["dont", "cant"]);
    }

    #[test]
    fn normalize_empty_input() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.normalize("").is_empty());
        assert!(tokenizer.normalize("   \t\n  ").is_empty());
        assert!(tokenizer.normalize("... 123 !!!").is_empty());
    }

    #[test]
    fn filter_respects_stops_and_length() {
        let tokenizer = Tokenizer::default()
            .with_stop_words(&["the", "on"])
            .with_min_word_length(3);

        let tokens = vec!["the", "cat", "on", "at", "mat", "mat"]
            .into_iter()
            .map(String::from)
            .collect();
        let kept = tokenizer.filter(tokens);

        assert_eq!(kept, vec!["cat", "mat", "mat"]);
        for word in &kept {
            assert!(word.chars().count() >= 3);
            assert!(!tokenizer.stop_words.contains(word));
        }
    }

    #[test]
    fn count_top_sorted_and_truncated() {
        let tokens: Vec<String> = "a a a b b c".split_whitespace().map(String::from).collect();

        let all = count_top(&tokens, 50);
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|pair| pair[0].1 >= pair[1].1));
        assert_eq!(all[0], ("a".to_string(), 3));

        let total: usize = all.iter().map(|(_, count)| count).sum();
        assert_eq!(total, tokens.len());

        let top_two = count_top(&tokens, 2);
        assert_eq!(top_two.len(), 2);

        assert!(count_top(&tokens, 0).is_empty());
        assert!(count_top(&[], 10).is_empty());
    }

    #[test]
    fn count_top_breaks_ties_by_first_occurrence() {
        // a and b are tied at 5; a appeared first, so max_words=1 keeps a.
        let mut tokens = Vec::new();
        tokens.push("a".to_string());
        for _ in 0..4 {
            tokens.push("b".to_string());
            tokens.push("a".to_string());
        }
        tokens.push("b".to_string());
        tokens.push("c".to_string());

        let top = count_top(&tokens, 1);
        assert_eq!(top, vec![("a".to_string(), 5)]);

        let all = count_top(&tokens, 10);
        assert_eq!(all[0].0, "a");
        assert_eq!(all[1].0, "b");
        assert_eq!(all[2], ("c".to_string(), 1));
    }

    #[test]
    fn config_defaults_flow_into_tokenizer() {
        let tokenizer = default_config_tokenizer();
        assert_eq!(tokenizer.min_word_length, 3);
        assert_eq!(tokenizer.max_words, 50);
        assert!(tokenizer.stop_words.contains("the"));

        // "at" survives normalization but is both short and a stop word.
        assert!(tokenizer.process("at at at").is_empty());
    }
}
