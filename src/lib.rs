//! # mdfix
//!
//! Heuristic fixes for common markdownlint violations.
//!
//! mdfix does not parse Markdown. It recognizes headings, lists and code
//! fences by surface patterns on each line and rewrites the document in two
//! passes: a per-line normalization pass followed by a blank-line spacing
//! pass.
//!
//! ## Quick Start
//!
//! ```
//! use mdfix::fix_markdown;
//!
//! let fixed = fix_markdown("See http://example.com \n```\ndef main():\n```\nDone");
//! assert_eq!(
//!     fixed,
//!     "See <http://example.com>\n\n```python\ndef main():\n```text\n\nDone"
//! );
//! ```
//!
//! ## Rules
//!
//! - **MD009**: strip a single trailing space (two spaces are a hard break)
//! - **MD036**: promote a bold-only line after a blank line to a heading
//! - **MD040**: tag a bare fence with a language guessed from the line after it
//!   (closing fences included unless [`FenceTracking::Parity`] is selected)
//! - **MD034**: wrap bare URLs in angle brackets
//! - **MD031**: blank lines around fenced code blocks
//! - **MD032**: blank lines around lists

pub mod detect;
pub mod driver;
pub mod error;
pub mod fix;

// Re-export commonly used types
pub use detect::{infer_fence_language, FenceLanguage};
pub use driver::{
    backup_path_for, fix_file, fix_file_with_observer, read_document, write_backup, FileReport,
    FixObserver, FixStep,
};
pub use error::{Error, Result};
pub use fix::{
    fix_markdown, fix_markdown_with_options, FenceTracking, FixOptions, FixResult, FixStats,
    Fixer, Rule,
};
