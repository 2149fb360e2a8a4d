//! Markdown fixing: the two-pass line transformer and its options.

mod normalize;
mod options;
mod pipeline;
mod result;
mod spacing;

pub use options::{FenceTracking, FixOptions, Rule};
pub use pipeline::{fix_markdown, fix_markdown_with_options, Fixer};
pub use result::{FixResult, FixStats};
