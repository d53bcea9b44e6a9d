/*!
 * Sort key extraction for bibliography entries.
 *
 * The first author's surname is recovered from unstructured entry text by an
 * ordered list of matchers. Each matcher returns `Some(key)` on success and
 * `None` otherwise; the first success wins. When no matcher succeeds the raw
 * entry text is used, so extraction never fails.
 */

use std::fmt;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

// @const: `\bibitem[<names>(<year>)]{` display label
static BRACKET_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\bibitem\[([^()\]]*)\([^)\]]*\)\]?\{").unwrap()
});

// @const: Author line following the closing brace of the citation key; the surname ends on that line
static AUTHOR_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\}\r?\n\s*([^,\r\n]+),").unwrap()
});

/// Which matcher produced a sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// First name token of the `\bibitem[...]` display label
    BracketLabel,
    /// Text before the first comma of the author line
    AuthorLine,
    /// The whole entry text
    RawText,
}

impl KeyStrategy {
    // @returns: Short identifier used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BracketLabel => "label",
            Self::AuthorLine => "author-line",
            Self::RawText => "raw",
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort key derived from one entry.
///
/// `value` keeps its original case; case folding happens only when
/// comparing, through [`SortKey::normalized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub value: String,
    pub strategy: KeyStrategy,
}

impl SortKey {
    pub fn new(value: impl Into<String>, strategy: KeyStrategy) -> Self {
        Self {
            value: value.into(),
            strategy,
        }
    }

    /// Case-folded form used for ordering
    pub fn normalized(&self) -> String {
        self.value.to_lowercase()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

type Matcher = fn(&str) -> Option<String>;

// Priority order matters: the label is more reliable than the author line.
const MATCHERS: [(KeyStrategy, Matcher); 2] = [
    (KeyStrategy::BracketLabel, surname_from_label),
    (KeyStrategy::AuthorLine, surname_from_author_line),
];

/// Derive the sort key of a single entry
pub fn extract_key(entry_text: &str) -> SortKey {
    for (strategy, matcher) in MATCHERS {
        if let Some(value) = matcher(entry_text) {
            trace!("Sort key '{}' found by {} strategy", value, strategy);
            return SortKey::new(value, strategy);
        }
    }

    trace!("No surname pattern matched, falling back to raw entry text");
    SortKey::new(entry_text, KeyStrategy::RawText)
}

/// Surname from the display label, e.g. `\bibitem[Rizvi, M.(2023)]{...}` gives `Rizvi`
pub fn surname_from_label(entry_text: &str) -> Option<String> {
    let caps = BRACKET_LABEL_REGEX.captures(entry_text)?;
    let first_token = caps.get(1)?.as_str().split_whitespace().next()?;
    let surname = first_token.trim_end_matches([',', '.']);

    if surname.is_empty() {
        None
    } else {
        Some(surname.to_string())
    }
}

/// Surname from the line after the citation key, e.g. `}\nHamdi, M., ...` gives `Hamdi`
pub fn surname_from_author_line(entry_text: &str) -> Option<String> {
    let caps = AUTHOR_LINE_REGEX.captures(entry_text)?;
    let surname = caps.get(1)?.as_str().trim();

    if surname.is_empty() {
        None
    } else {
        Some(surname.to_string())
    }
}
