//! Blank-line spacing pass.
//!
//! Re-scans normalized lines and inserts blank lines around code fence
//! regions and list regions. Fence contents are always copied verbatim, so
//! list-looking lines inside code blocks are never touched.

use regex::Regex;

use super::{FixOptions, FixStats, Rule};
use crate::detect::is_fence_marker;

/// Inserts blank lines around fenced code blocks and lists.
#[derive(Debug, Clone)]
pub(crate) struct BlockSpacer {
    list_item: Regex,
}

impl BlockSpacer {
    pub(crate) fn new() -> Self {
        Self {
            list_item: Regex::new(r"^(\s*[-*+]\s|\s*\d+\.)").expect("list item pattern"),
        }
    }

    /// Whether a line starts a bullet or numbered list item.
    pub(crate) fn is_list_item(&self, line: &str) -> bool {
        self.list_item.is_match(line)
    }

    /// Run the pass over normalized lines.
    pub(crate) fn run(
        &self,
        lines: &[String],
        options: &FixOptions,
        stats: &mut FixStats,
    ) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(lines.len() + lines.len() / 8);
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];

            if is_fence_marker(line) {
                i = self.emit_fence(lines, i, options, &mut out, stats);
                continue;
            }

            if options.list_spacing && self.is_list_item(line) {
                i = self.emit_list(lines, i, &mut out, stats);
                continue;
            }

            out.push(line.clone());
            i += 1;
        }

        out
    }

    /// Copy a fence region starting at `start`; returns the index after it.
    ///
    /// The region runs to the next fence marker line, or to the end of the
    /// document when the fence is never closed.
    fn emit_fence(
        &self,
        lines: &[String],
        start: usize,
        options: &FixOptions,
        out: &mut Vec<String>,
        stats: &mut FixStats,
    ) -> usize {
        if options.fence_spacing && out.last().is_some_and(|prev| !is_blank(prev)) {
            out.push(String::new());
            stats.record(Rule::FenceSpacing);
        }
        out.push(lines[start].clone());

        let mut i = start + 1;
        while i < lines.len() && !is_fence_marker(&lines[i]) {
            out.push(lines[i].clone());
            i += 1;
        }
        if i < lines.len() {
            out.push(lines[i].clone());
            i += 1;
        }

        if options.fence_spacing && lines.get(i).is_some_and(|next| !is_blank(next)) {
            out.push(String::new());
            stats.record(Rule::FenceSpacing);
        }
        i
    }

    /// Copy a list region starting at `start`; returns the index after it.
    ///
    /// Blank lines between items belong to the region. Blank lines after the
    /// last item do not.
    fn emit_list(
        &self,
        lines: &[String],
        start: usize,
        out: &mut Vec<String>,
        stats: &mut FixStats,
    ) -> usize {
        if out
            .last()
            .is_some_and(|prev| !is_blank(prev) && !self.is_list_item(prev))
        {
            out.push(String::new());
            stats.record(Rule::ListSpacing);
        }
        out.push(lines[start].clone());

        let mut i = start + 1;
        while let Some(line) = lines.get(i) {
            if self.is_list_item(line) {
                out.push(line.clone());
                i += 1;
                continue;
            }
            if !is_blank(line) {
                break;
            }
            match self.next_content_line(lines, i) {
                Some(next) if self.is_list_item(&lines[next]) => {
                    out.extend_from_slice(&lines[i..next]);
                    i = next;
                }
                _ => break,
            }
        }

        if lines
            .get(i)
            .is_some_and(|next| !is_blank(next) && !is_heading_or_rule(next))
        {
            out.push(String::new());
            stats.record(Rule::ListSpacing);
        }
        i
    }

    fn next_content_line(&self, lines: &[String], from: usize) -> Option<usize> {
        lines[from..]
            .iter()
            .position(|line| !is_blank(line))
            .map(|offset| from + offset)
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Lines a list may run straight into without a separating blank.
fn is_heading_or_rule(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("---")
}
