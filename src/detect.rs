//! Code fence language detection.
//!
//! Guesses an info string for a bare code fence from the first line of the
//! block it opens. The checks are plain prefix/substring heuristics and run
//! in a fixed order; the first match wins.

use serde::{Deserialize, Serialize};

/// Language tag appended to a bare fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FenceLanguage {
    Python,
    JavaScript,
    Bash,
    Json,
    Http,
    /// Plain text, also the fallback for anything unrecognized.
    Text,
}

impl FenceLanguage {
    /// The info string written after the backticks.
    pub fn tag(&self) -> &'static str {
        match self {
            FenceLanguage::Python => "python",
            FenceLanguage::JavaScript => "javascript",
            FenceLanguage::Bash => "bash",
            FenceLanguage::Json => "json",
            FenceLanguage::Http => "http",
            FenceLanguage::Text => "text",
        }
    }
}

impl std::fmt::Display for FenceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Three backticks, the only fence marker mdfix recognizes.
pub const FENCE_MARKER: &str = "```";

const PYTHON_PREFIXES: &[&str] = &[
    "def ", "class ", "import ", "from ", "print(", "for ", "if ", "return",
];
const JAVASCRIPT_PREFIXES: &[&str] = &["const ", "let ", "var ", "function ", "class ", "=>"];
const BASH_PREFIXES: &[&str] = &["$", "#", "cd ", "ls ", "mkdir ", "rm ", "cat ", "echo "];
const JSON_PREFIXES: &[&str] = &["{", "["];
const HTTP_MARKERS: &[&str] = &["GET ", "POST ", "HTTP"];

/// Infer a fence language from the line following the fence.
///
/// Prefix checks look at the trimmed line; the HTTP check looks at the raw
/// line. Header-style `key:` lines, email bodies and anything unrecognized
/// end up as [`FenceLanguage::Text`].
///
/// # Example
/// ```
/// use mdfix::detect::{infer_fence_language, FenceLanguage};
///
/// assert_eq!(infer_fence_language("def foo():"), FenceLanguage::Python);
/// assert_eq!(infer_fence_language("$ ls -la"), FenceLanguage::Bash);
/// ```
pub fn infer_fence_language(next_line: &str) -> FenceLanguage {
    let trimmed = next_line.trim();

    if starts_with_any(trimmed, PYTHON_PREFIXES) {
        FenceLanguage::Python
    } else if starts_with_any(trimmed, JAVASCRIPT_PREFIXES) {
        FenceLanguage::JavaScript
    } else if starts_with_any(trimmed, BASH_PREFIXES) {
        FenceLanguage::Bash
    } else if starts_with_any(trimmed, JSON_PREFIXES) {
        FenceLanguage::Json
    } else if HTTP_MARKERS.iter().any(|m| next_line.contains(m)) {
        FenceLanguage::Http
    } else {
        FenceLanguage::Text
    }
}

/// Whether the trimmed line is exactly a fence marker with no info string.
pub fn is_bare_fence(line: &str) -> bool {
    line.trim() == FENCE_MARKER
}

/// Whether the trimmed line starts with a fence marker (opening or closing).
pub fn is_fence_marker(line: &str) -> bool {
    line.trim().starts_with(FENCE_MARKER)
}

fn starts_with_any(text: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| text.starts_with(p))
}
