use regex::Regex;
use std::{fs, path::PathBuf};

use crate::prelude::{Result, SiteError};

/// Matches the word-display section from its opening tag up to the first
/// closing tag at the same indentation, across newlines, shortest match.
const WORD_DISPLAY_PATTERN: &str =
    r#"(?s)            <div class="word-display">.*?            </div>"#;

const WORD_DISPLAY_REPLACEMENT: &str = r#"            <div class="word-display">
                <button id="speakButton" class="listen-btn" aria-label="Listen to the word">
                    <span class="icon">🔊</span> <span>Listen</span>
                </button>
                <button id="allWordsButton" class="all-words-btn" aria-label="Show all words">
                    <span class="icon">📝</span> <span>All Words</span>
                </button>
            </div>"#;

pub struct Patcher {
    path: PathBuf,
}

impl Patcher {
    pub fn new(path: impl Into<PathBuf>) -> Patcher {
        Patcher { path: path.into() }
    }

    /// Replaces the leftmost word-display section with the two-button
    /// version and overwrites the file in place. Returns how many sections
    /// matched; anything past the first is left untouched.
    pub fn apply(&self) -> Result<usize> {
        let content = fs::read_to_string(&self.path)?;
        let pattern = Regex::new(WORD_DISPLAY_PATTERN)?;
        let matches = pattern.find_iter(&content).count();
        if matches == 0 {
            return Err(SiteError::FragmentNotFound(
                self.path.display().to_string(),
            ));
        }
        if matches > 1 {
            tracing::warn!(
                "found {} word-display sections in {}, replacing the first",
                matches,
                self.path.display()
            );
        }
        let patched = pattern.replace(&content, WORD_DISPLAY_REPLACEMENT);
        fs::write(&self.path, patched.as_bytes())?;
        tracing::debug!("patched {}", self.path.display());
        Ok(matches)
    }
}
