//! Per-line normalization pass.
//!
//! Each line goes through trailing-space removal, bold-heading promotion,
//! fence language tagging and bare URL wrapping, in that order. The only
//! context a line sees is the previously emitted line and the next raw line.

use regex::Regex;

use super::{FenceTracking, FixOptions, FixStats, Rule};
use crate::detect::{infer_fence_language, is_bare_fence, is_fence_marker, FENCE_MARKER};

/// Compiled patterns for the normalization pass.
#[derive(Debug, Clone)]
pub(crate) struct LineNormalizer {
    bold_heading: Regex,
    markdown_link: Regex,
    bare_url: Regex,
}

impl LineNormalizer {
    pub(crate) fn new() -> Self {
        Self {
            bold_heading: Regex::new(r"^\*\*[^*]+\*\*\s*:?\s*$").expect("bold heading pattern"),
            markdown_link: Regex::new(r"\[.*\]\(http").expect("markdown link pattern"),
            bare_url: Regex::new(r"https?://[^\s)>]+").expect("bare url pattern"),
        }
    }

    /// Run the pass over raw document lines.
    pub(crate) fn run(
        &self,
        lines: &[&str],
        options: &FixOptions,
        stats: &mut FixStats,
    ) -> Vec<String> {
        let mut fixed: Vec<String> = Vec::with_capacity(lines.len());
        let mut in_fence = false;

        for (i, raw) in lines.iter().enumerate() {
            let mut line = raw.to_string();

            if options.trailing_spaces {
                if let Some(stripped) = strip_single_trailing_space(&line) {
                    line = stripped;
                    stats.record(Rule::TrailingSpaces);
                }
            }

            // The first line of a document is never promoted.
            let after_blank = i > 0 && fixed.last().is_some_and(|prev| prev.trim().is_empty());
            if options.bold_headings && after_blank {
                if let Some(heading) = self.promote_bold_heading(&line, options.heading_level) {
                    line = heading;
                    stats.record(Rule::BoldHeading);
                }
            }

            if options.fence_languages && is_bare_fence(&line) {
                let eligible = match options.fence_tracking {
                    FenceTracking::Parity => !in_fence,
                    FenceTracking::Adjacency => true,
                };
                match lines.get(i + 1) {
                    Some(next) if eligible => {
                        line = format!("{}{}", FENCE_MARKER, infer_fence_language(next).tag());
                        stats.record(Rule::FenceLanguage);
                    }
                    _ => {}
                }
            }

            if is_fence_marker(&line) {
                in_fence = !in_fence;
            }

            if options.bare_urls {
                if let Some((wrapped, count)) = self.wrap_bare_urls(&line) {
                    line = wrapped;
                    stats.record_n(Rule::BareUrl, count);
                }
            }

            fixed.push(line);
        }

        fixed
    }

    /// Rewrite `**Title**` (optionally followed by a colon) as an ATX heading.
    fn promote_bold_heading(&self, line: &str, level: u8) -> Option<String> {
        if !self.bold_heading.is_match(line) {
            return None;
        }
        let text = line.trim_matches('*').trim().trim_end_matches(':');
        Some(format!("{} {}", "#".repeat(level as usize), text))
    }

    /// Wrap bare `http(s)` URLs in angle brackets.
    ///
    /// Lines that already hold a Markdown link to an http URL or an
    /// autolink are left alone entirely. Returns `None` when nothing changed.
    fn wrap_bare_urls(&self, line: &str) -> Option<(String, u32)> {
        if !line.contains("http") || self.markdown_link.is_match(line) || line.contains("<http") {
            return None;
        }

        let mut out = String::with_capacity(line.len() + 8);
        let mut copied = 0;
        let mut pos = 0;
        let mut count = 0;

        while let Some(m) = self.bare_url.find_at(line, pos) {
            match accept_url(line, m.start(), m.end()) {
                Some(end) => {
                    out.push_str(&line[copied..m.start()]);
                    out.push('<');
                    out.push_str(&line[m.start()..end]);
                    out.push('>');
                    copied = end;
                    pos = end;
                    count += 1;
                }
                // Matches start with an ASCII 'h', so +1 stays on a char boundary.
                None => pos = m.start() + 1,
            }
        }

        if count == 0 {
            return None;
        }
        out.push_str(&line[copied..]);
        Some((out, count))
    }
}

/// Strip trailing whitespace from a line that ends in exactly one space.
///
/// Two trailing spaces are a Markdown hard line break and are kept.
fn strip_single_trailing_space(line: &str) -> Option<String> {
    if line.ends_with(' ') && !line.ends_with("  ") {
        Some(line.trim_end().to_string())
    } else {
        None
    }
}

/// Decide where a candidate URL match at `start..end` really ends.
///
/// A URL directly after `<` or `(` is already delimited and is rejected. A
/// URL running into `)` or `>` gives up its last character instead, which is
/// what a backtracking matcher does with a trailing negative lookahead; if
/// that would leave nothing after the scheme the candidate is rejected.
fn accept_url(line: &str, start: usize, end: usize) -> Option<usize> {
    if matches!(line[..start].chars().next_back(), Some('<' | '(')) {
        return None;
    }

    if !matches!(line[end..].chars().next(), Some('>' | ')')) {
        return Some(end);
    }

    let last = line[..end].chars().next_back()?;
    let shortened = end - last.len_utf8();
    let scheme_len = if line[start..].starts_with("https://") {
        "https://".len()
    } else {
        "http://".len()
    };
    (shortened > start + scheme_len).then_some(shortened)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> (String, FixStats) {
        normalize_with(text, &FixOptions::default())
    }

    fn normalize_with(text: &str, options: &FixOptions) -> (String, FixStats) {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut stats = FixStats::new();
        let fixed = LineNormalizer::new().run(&lines, options, &mut stats);
        (fixed.join("\n"), stats)
    }

    #[test]
    fn test_single_trailing_space_removed() {
        let (result, stats) = normalize("foo ");
        assert_eq!(result, "foo");
        assert_eq!(stats.trailing_spaces, 1);
    }

    #[test]
    fn test_hard_break_kept() {
        let (result, stats) = normalize("foo  ");
        assert_eq!(result, "foo  ");
        assert_eq!(stats.trailing_spaces, 0);
    }

    #[test]
    fn test_trailing_space_strips_all_trailing_whitespace() {
        let (result, _) = normalize("foo\t ");
        assert_eq!(result, "foo");
    }

    #[test]
    fn test_bold_heading_after_blank() {
        let (result, stats) = normalize("\n**Overview**\n");
        assert_eq!(result, "\n### Overview\n");
        assert_eq!(stats.bold_headings, 1);
    }

    #[test]
    fn test_bold_heading_with_colon() {
        let (result, _) = normalize("\n**Note:**");
        assert_eq!(result, "\n### Note");
    }

    #[test]
    fn test_bold_heading_colon_outside_keeps_inner_stars() {
        // Only the leading and trailing asterisks of the whole line are stripped.
        let (result, _) = normalize("\n**Note**:");
        assert_eq!(result, "\n### Note**");
    }

    #[test]
    fn test_bold_not_after_blank_unchanged() {
        let (result, stats) = normalize("Intro\n**Overview**");
        assert_eq!(result, "Intro\n**Overview**");
        assert_eq!(stats.bold_headings, 0);
    }

    #[test]
    fn test_bold_on_first_line_unchanged() {
        let (result, _) = normalize("**Overview**\n");
        assert_eq!(result, "**Overview**\n");
    }

    #[test]
    fn test_bold_heading_level_option() {
        let options = FixOptions::new().with_heading_level(2);
        let (result, _) = normalize_with("\n**Overview**", &options);
        assert_eq!(result, "\n## Overview");
    }

    #[test]
    fn test_inline_bold_not_promoted() {
        let (result, _) = normalize("\n**Bold** and more");
        assert_eq!(result, "\n**Bold** and more");
    }

    #[test]
    fn test_fence_tagged_from_next_line() {
        let (result, stats) = normalize("```\ndef foo():\n    pass\n```");
        assert_eq!(result, "```python\ndef foo():\n    pass\n```");
        assert_eq!(stats.fence_languages, 1);

        let (result, _) = normalize("```\n$ ls -la\n```");
        assert_eq!(result, "```bash\n$ ls -la\n```");
    }

    #[test]
    fn test_closing_fence_left_bare_with_parity() {
        let options = FixOptions::new().with_fence_tracking(FenceTracking::Parity);
        let (result, stats) = normalize_with("```\necho hi\n```\nAfter text", &options);
        assert_eq!(result, "```bash\necho hi\n```\nAfter text");
        assert_eq!(stats.fence_languages, 1);
    }

    #[test]
    fn test_closing_fence_tagged_by_default() {
        let (result, stats) = normalize("```\necho hi\n```\nAfter text");
        assert_eq!(result, "```bash\necho hi\n```text\nAfter text");
        assert_eq!(stats.fence_languages, 2);
    }

    #[test]
    fn test_tagged_fence_counts_for_parity() {
        let options = FixOptions::new().with_fence_tracking(FenceTracking::Parity);
        let (result, _) = normalize_with("```rust\nlet x = 1;\n```\n\n```\n{}\n```", &options);
        assert_eq!(result, "```rust\nlet x = 1;\n```\n\n```json\n{}\n```");
    }

    #[test]
    fn test_closing_fence_before_blank_tagged_text() {
        let (result, stats) = normalize("```rust\nlet x = 1;\n```\n\n```\n{}\n```");
        assert_eq!(result, "```rust\nlet x = 1;\n```text\n\n```json\n{}\n```");
        assert_eq!(stats.fence_languages, 2);
    }

    #[test]
    fn test_fence_on_last_line_untouched() {
        let (result, stats) = normalize("text\n```");
        assert_eq!(result, "text\n```");
        assert_eq!(stats.fence_languages, 0);
    }

    #[test]
    fn test_bare_url_wrapped() {
        let (result, stats) = normalize("See http://example.com for info");
        assert_eq!(result, "See <http://example.com> for info");
        assert_eq!(stats.bare_urls, 1);
    }

    #[test]
    fn test_multiple_urls_wrapped() {
        let (result, stats) = normalize("http://a.com and https://b.org/x?y=1");
        assert_eq!(result, "<http://a.com> and <https://b.org/x?y=1>");
        assert_eq!(stats.bare_urls, 2);
    }

    #[test]
    fn test_markdown_link_line_unchanged() {
        let (result, stats) = normalize("[text](http://example.com)");
        assert_eq!(result, "[text](http://example.com)");
        assert_eq!(stats.bare_urls, 0);
    }

    #[test]
    fn test_autolink_line_unchanged() {
        let (result, _) = normalize("<http://a.com> and http://b.com");
        assert_eq!(result, "<http://a.com> and http://b.com");
    }

    #[test]
    fn test_parenthesized_url_unchanged() {
        let (result, _) = normalize("(http://example.com)");
        assert_eq!(result, "(http://example.com)");
    }

    #[test]
    fn test_url_before_close_paren_gives_up_last_char() {
        let (result, _) = normalize("see http://example.com) here");
        assert_eq!(result, "see <http://example.co>m) here");
    }

    #[test]
    fn test_disabled_rules_skip_work() {
        let options = FixOptions::new().only(&[Rule::TrailingSpaces]);
        let (result, stats) = normalize_with("\n**Bold** \n```\nx", &options);
        assert_eq!(result, "\n**Bold**\n```\nx");
        assert_eq!(stats.total(), 1);
    }

    #[test]
    fn test_accept_url_short_body_rejected() {
        let line = "go http://x) now";
        assert_eq!(accept_url(line, 3, 11), None);
    }
}
