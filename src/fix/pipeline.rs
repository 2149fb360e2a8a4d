//! The line transformer: normalization followed by spacing.

use log::debug;

use super::normalize::LineNormalizer;
use super::spacing::BlockSpacer;
use super::{FixOptions, FixResult, FixStats};

/// Markdown fix pipeline.
///
/// Compiles its patterns once; reuse a `Fixer` when fixing many documents.
///
/// # Example
///
/// ```
/// use mdfix::{Fixer, FixOptions};
///
/// let fixer = Fixer::new(FixOptions::default());
/// let fixed = fixer.process("Intro\n- item one\n");
/// assert_eq!(fixed, "Intro\n\n- item one\n");
/// ```
#[derive(Debug, Clone)]
pub struct Fixer {
    options: FixOptions,
    normalizer: LineNormalizer,
    spacer: BlockSpacer,
}

impl Fixer {
    /// Create a new fixer with the given options.
    pub fn new(options: FixOptions) -> Self {
        Self {
            options,
            normalizer: LineNormalizer::new(),
            spacer: BlockSpacer::new(),
        }
    }

    /// The options this fixer was built with.
    pub fn options(&self) -> &FixOptions {
        &self.options
    }

    /// Fix a document and return the corrected text.
    pub fn process(&self, text: &str) -> String {
        self.process_with_stats(text).content
    }

    /// Fix a document and report what was changed.
    ///
    /// Rounds repeat until a round changes nothing or `max_rounds` is hit.
    pub fn process_with_stats(&self, text: &str) -> FixResult {
        let mut stats = FixStats::new();
        let mut current = text.to_string();

        // A zero cap set through the public field still runs one round.
        for round in 1..=self.options.max_rounds.max(1) {
            let mut round_stats = FixStats::new();
            let next = self.run_round(&current, &mut round_stats);
            if next == current {
                break;
            }

            debug!("round {}: {} fixes applied", round, round_stats.total());
            stats.merge(&round_stats);
            current = next;
        }

        for (rule, count) in stats.iter().filter(|(_, count)| *count > 0) {
            debug!("{} ({}): {}", rule.code(), rule.description(), count);
        }

        FixResult::new(current, stats)
    }

    fn run_round(&self, text: &str, stats: &mut FixStats) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let normalized = self.normalizer.run(&lines, &self.options, stats);
        self.spacer.run(&normalized, &self.options, stats).join("\n")
    }
}

impl Default for Fixer {
    fn default() -> Self {
        Self::new(FixOptions::default())
    }
}

/// Fix a Markdown document with default options.
pub fn fix_markdown(text: &str) -> String {
    Fixer::default().process(text)
}

/// Fix a Markdown document with custom options, collecting statistics.
pub fn fix_markdown_with_options(text: &str, options: &FixOptions) -> FixResult {
    Fixer::new(options.clone()).process_with_stats(text)
}
