//! Gait Sensing command line.
//!
//! ```text
//! gait-sensing analyze <frames.json>... [--pretty]
//! gait-sensing compare <baseline.json> <followup.json> [--pretty]
//! gait-sensing findings <result.json>
//! ```
//!
//! Results are written to stdout as JSON; logs go to stderr and are
//! controlled with `RUST_LOG` (default `gait_sensing=info`).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gait_sensing::export::{load_frames, load_json, to_json};
use gait_sensing::{analyze, analyze_trials, compare_sessions, findings, GaitAnalysisResult, GaitError};

const USAGE: &str = "\
usage:
  gait-sensing analyze <frames.json>... [--pretty]
  gait-sensing compare <baseline.json> <followup.json> [--pretty]
  gait-sensing findings <result.json>";

enum Command {
    Analyze(Vec<PathBuf>),
    Compare { baseline: PathBuf, followup: PathBuf },
    Findings(PathBuf),
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<(Command, bool)> {
    let mut pretty = false;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--pretty" => pretty = true,
            "-h" | "--help" => bail!("{USAGE}"),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        Some("analyze") => {
            let paths: Vec<PathBuf> = positional.map(PathBuf::from).collect();
            if paths.is_empty() {
                bail!("analyze needs at least one frames file\n{USAGE}");
            }
            Command::Analyze(paths)
        }
        Some("compare") => match (positional.next(), positional.next(), positional.next()) {
            (Some(baseline), Some(followup), None) => Command::Compare {
                baseline: baseline.into(),
                followup: followup.into(),
            },
            _ => bail!("compare takes exactly two result files\n{USAGE}"),
        },
        Some("findings") => match (positional.next(), positional.next()) {
            (Some(path), None) => Command::Findings(path.into()),
            _ => bail!("findings takes exactly one result file\n{USAGE}"),
        },
        Some(other) => bail!("unknown command {other}\n{USAGE}"),
        None => bail!("{USAGE}"),
    };

    Ok((command, pretty))
}

fn run_analyze(paths: &[PathBuf], pretty: bool) -> Result<String> {
    let trials = paths
        .iter()
        .map(|path| load_frames(path).with_context(|| format!("reading {}", path.display())))
        .collect::<Result<Vec<_>>>()?;

    if let [frames] = trials.as_slice() {
        return match analyze(frames) {
            Ok(result) => Ok(to_json(&result, pretty)?),
            Err(err @ GaitError::InsufficientFrames { .. }) => {
                warn!(error = %err, "no result produced");
                Ok("null".to_string())
            }
            Err(err) => Err(err.into()),
        };
    }

    let summary = analyze_trials(&trials)?;
    Ok(to_json(&summary, pretty)?)
}

fn run_compare(baseline: &Path, followup: &Path, pretty: bool) -> Result<String> {
    let before: GaitAnalysisResult =
        load_json(baseline).with_context(|| format!("reading baseline {}", baseline.display()))?;
    let after: GaitAnalysisResult =
        load_json(followup).with_context(|| format!("reading follow-up {}", followup.display()))?;

    Ok(to_json(&compare_sessions(&before, &after), pretty)?)
}

fn run_findings(path: &Path) -> Result<String> {
    let result: GaitAnalysisResult =
        load_json(path).with_context(|| format!("reading {}", path.display()))?;

    let lines: Vec<String> = findings(&result).iter().map(ToString::to_string).collect();
    Ok(lines.join("\n"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "gait_sensing=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (command, pretty) = parse_args(std::env::args().skip(1))?;
    info!(version = env!("CARGO_PKG_VERSION"), "gait-sensing starting");

    let output = match &command {
        Command::Analyze(paths) => run_analyze(paths, pretty)?,
        Command::Compare { baseline, followup } => run_compare(baseline, followup, pretty)?,
        Command::Findings(path) => run_findings(path)?,
    };

    println!("{output}");
    Ok(())
}
