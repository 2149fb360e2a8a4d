//! File-level driver: read, back up, fix, write back.
//!
//! The backup is always written before the input file is overwritten, and
//! nothing is written at all if the input cannot be read as UTF-8.

use crate::error::{Error, Result};
use crate::fix::{FixOptions, FixStats, Fixer};
use log::info;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// File fixed when no path is given on the command line.
pub const DEFAULT_INPUT: &str = "AI LLM Red Team Hand book.md";

/// Suffix appended to the input file name to form the backup path.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Outcome of fixing a file in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// The file that was fixed
    pub input: PathBuf,

    /// Where the original content was saved
    pub backup: PathBuf,

    /// Fixes applied
    pub stats: FixStats,

    /// Whether the written content differs from the original
    pub changed: bool,
}

/// Backup path for an input file: the full file name plus `.backup`.
///
/// ```
/// use mdfix::driver::backup_path_for;
/// use std::path::PathBuf;
///
/// assert_eq!(backup_path_for("docs/guide.md"), PathBuf::from("docs/guide.md.backup"));
/// ```
pub fn backup_path_for<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut name = OsString::from(path.as_ref().as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Read a Markdown file, rejecting content that is not UTF-8.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| {
        Error::Encoding(format!(
            "{} is not valid UTF-8 (invalid byte at offset {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })
}

/// Write an unmodified copy of `content` next to `path`; returns the backup path.
pub fn write_backup<P: AsRef<Path>>(path: P, content: &str) -> Result<PathBuf> {
    let backup = backup_path_for(path);
    fs::write(&backup, content)?;
    Ok(backup)
}

/// A stage of [`fix_file_with_observer`], in the order the stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixStep {
    /// Reading and UTF-8 checking the input
    Read,
    /// Writing the untouched original to the backup path
    Backup,
    /// Running the fixer over the content
    Fix,
    /// Overwriting the input with the fixed content
    Write,
}

impl FixStep {
    /// Every step, in execution order.
    pub const ALL: [FixStep; 4] = [FixStep::Read, FixStep::Backup, FixStep::Fix, FixStep::Write];
}

/// Hooks called around each step of fixing a file.
///
/// Both methods do nothing by default. A step that fails never reports its
/// end, and later steps never start.
pub trait FixObserver {
    /// Called before a step runs. `target` is the file the step reads or
    /// writes (the input for [`FixStep::Fix`]).
    fn on_step_start(&mut self, step: FixStep, target: &Path) {
        let _ = (step, target);
    }

    /// Called after a step completed.
    fn on_step_end(&mut self, step: FixStep) {
        let _ = step;
    }
}

impl FixObserver for () {}

/// Fix a Markdown file in place, keeping a backup of the original.
///
/// # Example
///
/// ```no_run
/// use mdfix::{fix_file, FixOptions};
///
/// let report = fix_file("README.md", &FixOptions::default())?;
/// println!("{} fixes, backup at {}", report.stats.total(), report.backup.display());
/// # Ok::<(), mdfix::Error>(())
/// ```
pub fn fix_file<P: AsRef<Path>>(path: P, options: &FixOptions) -> Result<FileReport> {
    fix_file_with_observer(path, options, &mut ())
}

/// Like [`fix_file`], reporting each [`FixStep`] to `observer`.
pub fn fix_file_with_observer<P, O>(
    path: P,
    options: &FixOptions,
    observer: &mut O,
) -> Result<FileReport>
where
    P: AsRef<Path>,
    O: FixObserver + ?Sized,
{
    let path = path.as_ref();

    observer.on_step_start(FixStep::Read, path);
    info!("Reading {}", path.display());
    let original = read_document(path)?;
    observer.on_step_end(FixStep::Read);

    observer.on_step_start(FixStep::Backup, &backup_path_for(path));
    let backup = write_backup(path, &original)?;
    info!("Backup saved to {}", backup.display());
    observer.on_step_end(FixStep::Backup);

    observer.on_step_start(FixStep::Fix, path);
    let result = Fixer::new(options.clone()).process_with_stats(&original);
    let changed = result.content != original;
    observer.on_step_end(FixStep::Fix);

    observer.on_step_start(FixStep::Write, path);
    fs::write(path, &result.content)?;
    info!(
        "Wrote {} ({} fixes applied)",
        path.display(),
        result.stats.total()
    );
    observer.on_step_end(FixStep::Write);

    Ok(FileReport {
        input: path.to_path_buf(),
        backup,
        stats: result.stats,
        changed,
    })
}
