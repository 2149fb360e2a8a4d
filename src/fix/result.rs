//! Fix result with per-rule statistics.

use super::Rule;
use serde::{Deserialize, Serialize};

/// Result of fixing a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixResult {
    /// The fixed document
    pub content: String,

    /// What was changed
    pub stats: FixStats,
}

impl FixResult {
    /// Create a new fix result.
    pub fn new(content: String, stats: FixStats) -> Self {
        Self { content, stats }
    }

    /// Whether any fix was applied.
    pub fn has_changes(&self) -> bool {
        self.stats.total() > 0
    }
}

/// Number of fixes applied, per rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixStats {
    /// Lines with a stray trailing space removed
    pub trailing_spaces: u32,

    /// Bold lines promoted to headings
    pub bold_headings: u32,

    /// Bare fences given a language tag
    pub fence_languages: u32,

    /// URLs wrapped in angle brackets
    pub bare_urls: u32,

    /// Blank lines inserted around code fences
    pub fence_spacing: u32,

    /// Blank lines inserted around lists
    pub list_spacing: u32,
}

impl FixStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one application of a rule.
    pub fn record(&mut self, rule: Rule) {
        self.record_n(rule, 1);
    }

    /// Record several applications of a rule.
    pub fn record_n(&mut self, rule: Rule, n: u32) {
        *self.counter_mut(rule) += n;
    }

    /// Number of fixes applied for a rule.
    pub fn count(&self, rule: Rule) -> u32 {
        match rule {
            Rule::TrailingSpaces => self.trailing_spaces,
            Rule::BoldHeading => self.bold_headings,
            Rule::FenceLanguage => self.fence_languages,
            Rule::BareUrl => self.bare_urls,
            Rule::FenceSpacing => self.fence_spacing,
            Rule::ListSpacing => self.list_spacing,
        }
    }

    /// Total fixes across all rules.
    pub fn total(&self) -> u32 {
        Rule::ALL.iter().map(|rule| self.count(*rule)).sum()
    }

    /// `(rule, count)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Rule, u32)> + '_ {
        Rule::ALL.into_iter().map(move |rule| (rule, self.count(rule)))
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &FixStats) {
        for (rule, n) in other.iter() {
            self.record_n(rule, n);
        }
    }

    fn counter_mut(&mut self, rule: Rule) -> &mut u32 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_stats_record_and_total() {
        let mut stats = FixStats::new();
        stats.record(Rule::BareUrl);
        stats.record(Rule::BareUrl);
        stats.record_n(Rule::ListSpacing, 3);

        assert_eq!(stats.bare_urls, 2);
        assert_eq!(stats.count(Rule::ListSpacing), 3);
        assert_eq!(stats.total(), 5);
    }

    #[test]
    fn test_fix_stats_merge() {
        let mut stats1 = FixStats::new();
        stats1.trailing_spaces = 5;
        stats1.fence_spacing = 2;

        let stats2 = FixStats {
            trailing_spaces: 3,
            fence_spacing: 1,
            bold_headings: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.trailing_spaces, 8);
        assert_eq!(stats1.fence_spacing, 3);
        assert_eq!(stats1.bold_headings, 4);
    }

    #[test]
    fn test_fix_result_has_changes() {
        let unchanged = FixResult::new("# Title".to_string(), FixStats::default());
        assert!(!unchanged.has_changes());

        let mut stats = FixStats::new();
        stats.record(Rule::BoldHeading);
        assert!(FixResult::new("### Title".to_string(), stats).has_changes());
    }

    #[test]
    fn test_fix_stats_serializes_field_names() {
        let mut stats = FixStats::new();
        stats.record(Rule::FenceLanguage);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["fence_languages"], 1);
        assert_eq!(json["bare_urls"], 0);
    }
}
