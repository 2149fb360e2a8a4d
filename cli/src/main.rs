//! mdfix CLI - fix common markdownlint violations in place

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdfix::driver::DEFAULT_INPUT;
use mdfix::{
    fix_file_with_observer, read_document, FenceTracking, FixObserver, FixOptions, FixStats,
    FixStep, Fixer, Rule,
};

#[derive(Parser)]
#[command(name = "mdfix")]
#[command(version)]
#[command(about = "Fix common markdownlint issues in a Markdown file", long_about = None)]
struct Cli {
    /// Markdown file to fix in place
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Print the fixed document to stdout instead of writing it (no backup is made)
    #[arg(long)]
    stdout: bool,

    /// Print fix statistics as JSON
    #[arg(long, conflicts_with = "stdout")]
    json: bool,

    /// Which bare fences get a language tag
    #[arg(long, value_enum, default_value = "adjacency")]
    fence_tracking: FenceMode,

    /// Only apply these rules (comma-separated markdownlint codes, e.g. MD009,MD034)
    #[arg(long, value_name = "RULES", value_delimiter = ',')]
    only: Vec<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FenceMode {
    /// Tag every bare fence followed by a line, closing fences included
    Adjacency,
    /// Tag only fences that open a code block
    Parity,
}

impl From<FenceMode> for FenceTracking {
    fn from(mode: FenceMode) -> Self {
        match mode {
            FenceMode::Parity => FenceTracking::Parity,
            FenceMode::Adjacency => FenceTracking::Adjacency,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = build_options(&cli).and_then(|options| {
        if cli.stdout {
            cmd_print(&cli.input, options)
        } else {
            cmd_fix(&cli.input, options, cli.json)
        }
    });

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(cli: &Cli) -> Result<FixOptions, Box<dyn std::error::Error>> {
    let mut options = FixOptions::new().with_fence_tracking(cli.fence_tracking.into());

    if !cli.only.is_empty() {
        let rules = cli
            .only
            .iter()
            .map(|code| code.parse::<Rule>())
            .collect::<Result<Vec<_>, _>>()?;
        options = options.only(&rules);
    }

    Ok(options)
}

fn cmd_print(input: &Path, options: FixOptions) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_document(input)?;
    let fixed = Fixer::new(options).process(&content);
    print!("{}", fixed);
    Ok(())
}

/// Drives the progress bar from the steps of fixing a file.
struct ProgressObserver {
    pb: ProgressBar,
}

impl FixObserver for ProgressObserver {
    fn on_step_start(&mut self, step: FixStep, target: &Path) {
        let message = match step {
            FixStep::Read => format!("Reading {}...", target.display()),
            FixStep::Backup => format!("Creating backup at {}...", target.display()),
            FixStep::Fix => "Applying markdown fixes...".to_string(),
            FixStep::Write => format!("Writing fixed content to {}...", target.display()),
        };
        self.pb.set_message(message);
    }

    fn on_step_end(&mut self, _step: FixStep) {
        self.pb.inc(1);
    }
}

fn cmd_fix(
    input: &Path,
    options: FixOptions,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(FixStep::ALL.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let mut observer = ProgressObserver { pb };
    let report = fix_file_with_observer(input, &options, &mut observer)?;
    observer.pb.finish_with_message("Done!");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report.input, &report.backup, &report.stats);
    }

    Ok(())
}

fn print_summary(input: &Path, backup: &Path, stats: &FixStats) {
    println!(
        "\n{}",
        "✓ Markdown fixes applied successfully!".green().bold()
    );
    println!("  {} Backup saved to: {}", "├─".dimmed(), backup.display());
    println!("  {} Fixed file: {}", "└─".dimmed(), input.display());

    println!("\n{}", "Fixes applied:".cyan().bold());
    for (i, (rule, count)) in stats.iter().enumerate() {
        let mark = if count > 0 {
            "✓".green()
        } else {
            "·".dimmed()
        };
        println!(
            "  {}. {} {} ({}): {}",
            i + 1,
            mark,
            rule.description(),
            rule.code(),
            count
        );
    }
}
