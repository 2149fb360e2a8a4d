//! Fix options and rule selection.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A markdownlint rule that mdfix knows how to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// MD009: trailing spaces
    TrailingSpaces,
    /// MD036: emphasis used instead of a heading
    BoldHeading,
    /// MD040: fenced code blocks should have a language specified
    FenceLanguage,
    /// MD034: bare URL used
    BareUrl,
    /// MD031: fenced code blocks should be surrounded by blank lines
    FenceSpacing,
    /// MD032: lists should be surrounded by blank lines
    ListSpacing,
}

impl Rule {
    /// Every rule, in the order fixes are reported.
    pub const ALL: [Rule; 6] = [
        Rule::BoldHeading,
        Rule::ListSpacing,
        Rule::FenceSpacing,
        Rule::FenceLanguage,
        Rule::BareUrl,
        Rule::TrailingSpaces,
    ];

    /// The markdownlint rule code.
    pub fn code(&self) -> &'static str {
        match self {
            Rule::TrailingSpaces => "MD009",
            Rule::BoldHeading => "MD036",
            Rule::FenceLanguage => "MD040",
            Rule::BareUrl => "MD034",
            Rule::FenceSpacing => "MD031",
            Rule::ListSpacing => "MD032",
        }
    }

    /// Short description of what the fix does.
    pub fn description(&self) -> &'static str {
        match self {
            Rule::TrailingSpaces => "Removed trailing spaces",
            Rule::BoldHeading => "Converted bold text to proper headings",
            Rule::FenceLanguage => "Added language specifiers to code blocks",
            Rule::BareUrl => "Wrapped bare URLs",
            Rule::FenceSpacing => "Added blank lines around code blocks",
            Rule::ListSpacing => "Added blank lines around lists",
        }
    }

    /// Look a rule up by its markdownlint code (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self> {
        let code = code.trim();
        Rule::ALL
            .iter()
            .copied()
            .find(|rule| rule.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::InvalidRule(code.to_string()))
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rule::from_code(s)
    }
}

/// Which bare fences receive an inferred language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FenceTracking {
    /// Tag every bare fence that has a following line, closing fences included.
    #[default]
    Adjacency,
    /// Track open/closed state; only fences that open a block are tagged.
    Parity,
}

/// Options for fixing a document.
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// Strip a single trailing space (MD009)
    pub trailing_spaces: bool,

    /// Promote bold-only lines to headings (MD036)
    pub bold_headings: bool,

    /// Tag bare code fences with a language (MD040)
    pub fence_languages: bool,

    /// Wrap bare URLs in angle brackets (MD034)
    pub bare_urls: bool,

    /// Blank lines around code fences (MD031)
    pub fence_spacing: bool,

    /// Blank lines around lists (MD032)
    pub list_spacing: bool,

    /// Which bare fences get a language tag
    pub fence_tracking: FenceTracking,

    /// Level of headings produced from bold lines (1-6)
    pub heading_level: u8,

    /// Upper bound on full rounds run while waiting for the output to settle
    pub max_rounds: u8,
}

impl FixOptions {
    /// Create new fix options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable a single rule.
    pub fn with_rule(mut self, rule: Rule, enabled: bool) -> Self {
        *self.flag_mut(rule) = enabled;
        self
    }

    /// Enable exactly the given rules.
    pub fn only(mut self, rules: &[Rule]) -> Self {
        for rule in Rule::ALL {
            *self.flag_mut(rule) = rules.contains(&rule);
        }
        self
    }

    /// Set the fence tracking mode.
    pub fn with_fence_tracking(mut self, tracking: FenceTracking) -> Self {
        self.fence_tracking = tracking;
        self
    }

    /// Set the heading level for promoted bold lines.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    /// Set how many rounds may run before giving up on a fixed point.
    ///
    /// One round reproduces a single scan. Spacing inserted by a round can
    /// expose more bold headings to the next, so the default allows a few.
    pub fn with_max_rounds(mut self, rounds: u8) -> Self {
        self.max_rounds = rounds.max(1);
        self
    }

    /// Whether a rule is enabled.
    pub fn is_enabled(&self, rule: Rule) -> bool {
        match rule {
            Rule::TrailingSpaces => self.trailing_spaces,
            Rule::BoldHeading => self.bold_headings,
            Rule::FenceLanguage => self.fence_languages,
            Rule::BareUrl => self.bare_urls,
            Rule::FenceSpacing => self.fence_spacing,
            Rule::ListSpacing => self.list_spacing,
        }
    }

    /// Rules currently enabled, in report order.
    pub fn enabled_rules(&self) -> Vec<Rule> {
        Rule::ALL
            .into_iter()
            .filter(|rule| self.is_enabled(*rule))
            .collect()
    }

    fn flag_mut(&mut self, rule: Rule) -> &mut bool {
        match rule {
            Rule::TrailingSpaces => &mut self.trailing_spaces,
            Rule::BoldHeading => &mut self.bold_headings,
            Rule::FenceLanguage => &mut self.fence_languages,
            Rule::BareUrl => &mut self.bare_urls,
            Rule::FenceSpacing => &mut self.fence_spacing,
            Rule::ListSpacing => &mut self.list_spacing,
        }
    }
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            trailing_spaces: true,
            bold_headings: true,
            fence_languages: true,
            bare_urls: true,
            fence_spacing: true,
            list_spacing: true,
            fence_tracking: FenceTracking::Adjacency,
            heading_level: 3,
            max_rounds: 4,
        }
    }
}
