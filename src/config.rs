//! Application configuration: processing limits, stop words, color palettes.
//!
//! A `Config` is created once at startup and passed by reference into the
//! pipeline. The stop-word set is the only mutable part, and only changes
//! through the explicit `add_stop_words` / `remove_stop_words` calls.

use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_MAX_WORDS: usize = 50;
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_COLOR_SCHEME: &str = "random";
pub const DEFAULT_BACKGROUND_COLOR: &str = "white";
pub const DEFAULT_SAMPLE_DIRECTORY: &str = "samples";
pub const DEFAULT_SAVE_FORMAT: &str = "png";

/// Common English words excluded from frequency counting by default.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "a", "an", "as",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "should", "could", "can", "may", "might", "must", "shall", "is", "am", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
    "them", "my", "your", "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs",
    "myself", "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
];

/// Named palettes. `"random"` maps to no fixed palette, which means the
/// engine's own randomized coloring is used.
const COLOR_SCHEMES: &[(&str, &[&str])] = &[
    ("blue", &["#0066CC", "#0080FF", "#3399FF", "#66B2FF", "#99CCFF"]),
    ("warm", &["#FF6B35", "#F7931E", "#FFD23F", "#EE4B2B", "#C21807"]),
    ("nature", &["#228B22", "#32CD32", "#90EE90", "#006400", "#9ACD32"]),
    ("purple", &["#800080", "#9932CC", "#BA55D3", "#DA70D6", "#DDA0DD"]),
    ("ocean", &["#006994", "#0892A5", "#13A5B7", "#1FB8C8", "#2ECBD9"]),
    ("sunset", &["#FF6B6B", "#FF8E53", "#FF6B35", "#C44536", "#8B2635"]),
    ("forest", &["#2D5016", "#3E7B27", "#4F9A31", "#6AB04C", "#9DC209"]),
    (
        "monochrome",
        &["#2C3E50", "#34495E", "#7F8C8D", "#95A5A6", "#BDC3C7"],
    ),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub max_words: usize,
    pub min_word_length: usize,
    pub width: u32,
    pub height: u32,
    pub default_color_scheme: String,
    pub default_background_color: String,
    pub sample_directory: PathBuf,
    pub default_save_format: String,
    stop_words: HashSet<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_words: DEFAULT_MAX_WORDS,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            default_color_scheme: DEFAULT_COLOR_SCHEME.to_string(),
            default_background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            sample_directory: PathBuf::from(DEFAULT_SAMPLE_DIRECTORY),
            default_save_format: DEFAULT_SAVE_FORMAT.to_string(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Config {
    /// Case-insensitive stop-word membership test.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    /// Insert words into the stop set. Entries are lowercased before
    /// storage; inserting an existing word is a no-op.
    pub fn add_stop_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.stop_words.insert(word.as_ref().to_lowercase());
        }
    }

    /// Remove words from the stop set. Absent words are ignored.
    pub fn remove_stop_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.stop_words.remove(&word.as_ref().to_lowercase());
        }
    }

    /// Scheme names in menu order, `"random"` first.
    pub fn color_scheme_names(&self) -> Vec<&'static str> {
        let mut names = vec![DEFAULT_COLOR_SCHEME];
        names.extend(COLOR_SCHEMES.iter().map(|(name, _)| *name));
        names
    }

    /// The fixed palette for a known scheme. `None` means "random" or an
    /// unrecognized name: let the engine pick its own colors.
    pub fn color_scheme_colors(&self, name: &str) -> Option<&'static [&'static str]> {
        COLOR_SCHEMES
            .iter()
            .find(|(scheme, _)| *scheme == name)
            .map(|(_, colors)| *colors)
    }
}

/// Per-request customization overlay. Built from `Config` defaults, then
/// overwritten by whatever the user chose for this one word cloud. Never
/// persisted.
#[derive(Debug, Clone)]
pub struct Preferences {
    pub max_words: usize,
    pub color_scheme: String,
    pub background_color: String,
    pub mask_path: Option<PathBuf>,
}

impl Preferences {
    pub fn from_config(config: &Config) -> Self {
        Preferences {
            max_words: config.max_words,
            color_scheme: config.default_color_scheme.clone(),
            background_color: config.default_background_color.clone(),
            mask_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_word_lookup_is_case_insensitive() {
        let config = Config::default();
        assert!(config.is_stop_word("the"));
        assert!(config.is_stop_word("The"));
        assert!(config.is_stop_word("THEMSELVES"));
        assert!(!config.is_stop_word("cat"));
    }

    #[test]
    fn add_stop_words_is_idempotent() {
        let mut config = Config::default();
        let before = config.stop_words().len();

        config.add_stop_words(["Rust"]);
        assert!(config.is_stop_word("rust"));
        assert_eq!(config.stop_words().len(), before + 1);

        config.add_stop_words(["rust"]);
        assert_eq!(config.stop_words().len(), before + 1);
    }

    #[test]
    fn add_then_remove_restores_membership() {
        let mut config = Config::default();
        assert!(!config.is_stop_word("ferris"));

        config.add_stop_words(["Ferris"]);
        assert!(config.is_stop_word("ferris"));

        config.remove_stop_words(["FERRIS"]);
        assert!(!config.is_stop_word("ferris"));

        // Removing something that was never there is fine.
        config.remove_stop_words(["ferris"]);
    }

    #[test]
    fn scheme_lookup() {
        let config = Config::default();
        let blue = config.color_scheme_colors("blue").unwrap();
        assert_eq!(blue.len(), 5);
        assert_eq!(blue[0], "#0066CC");

        assert!(config.color_scheme_colors("random").is_none());
        assert!(config.color_scheme_colors("plaid").is_none());

        let names = config.color_scheme_names();
        assert_eq!(names[0], "random");
        assert!(names.contains(&"monochrome"));
    }
}
