//! Headless runner for the autoencoder walkthrough demo.
//!
//! Drives the same controller as the browser app from a tokio interval and
//! prints each screen to the terminal.
//!
//! Examples:
//!   aedemo-runner run data/KDDTest+.csv
//!   aedemo-runner run sample.csv --stop-after 4
//!   aedemo-runner --json run sample.csv
//!   aedemo-runner preview sample.csv
//!   aedemo-runner sample sample.csv
//!   aedemo-runner paths
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process;

use aedemo::preview::{LoadedDataset, SAMPLE_CSV, SAMPLE_CSV_FILENAME};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod paths;
mod session;
mod ticker;

use config::RunnerConfig;
use error::RunnerError;
use paths::AppPaths;
use session::{run_walkthrough, Walkthrough};

fn usage() -> ! {
    eprintln!("aedemo-runner (simulated autoencoder training walkthrough)");
    eprintln!("Usage: aedemo-runner [--config path] [--json] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  run <csv> [--stop-after N]  Upload, preprocess, train and show results");
    eprintln!("  preview <csv>               Show the upload preview only");
    eprintln!("  sample [path]               Write the sample CSV (stdout if no path)");
    eprintln!("  paths                       Show config directory and file path");
    process::exit(1);
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    json: bool,
    rest: Vec<String>,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, RunnerError> {
    let mut args = Args::default();
    let mut it = raw.into_iter();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--config" => {
                let path = it
                    .next()
                    .ok_or_else(|| RunnerError::Usage("--config needs a path".to_string()))?;
                args.config = Some(PathBuf::from(path));
            }
            "--json" => args.json = true,
            _ => {
                args.rest.push(a);
                args.rest.extend(it);
                break;
            }
        }
    }
    if args.rest.is_empty() {
        return Err(RunnerError::Usage("missing command".to_string()));
    }
    Ok(args)
}

fn parse_run_args(rest: &[String]) -> Result<(PathBuf, Option<u32>), RunnerError> {
    let mut csv = None;
    let mut stop_after = None;
    let mut it = rest.iter();
    while let Some(a) = it.next() {
        if a == "--stop-after" {
            let n = it
                .next()
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    RunnerError::Usage("--stop-after needs a positive epoch".to_string())
                })?;
            stop_after = Some(n);
        } else if csv.is_none() {
            csv = Some(PathBuf::from(a));
        } else {
            return Err(RunnerError::Usage(format!("unexpected argument {a:?}")));
        }
    }
    let csv = csv.ok_or_else(|| RunnerError::Usage("run needs a CSV path".to_string()))?;
    Ok((csv, stop_after))
}

fn read_csv(path: &Path) -> Result<(Option<String>, String), RunnerError> {
    let text = fs::read_to_string(path).map_err(|source| RunnerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    Ok((name, text))
}

fn load_config(explicit: Option<&Path>) -> Result<RunnerConfig, RunnerError> {
    match explicit {
        Some(path) => RunnerConfig::load(path, true),
        None => RunnerConfig::load(&AppPaths::new()?.config_file(), false),
    }
}

async fn dispatch(args: Args) -> Result<(), RunnerError> {
    let cmd = args.rest[0].as_str();
    let rest = &args.rest[1..];
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        "run" => {
            let (path, stop_after) = parse_run_args(rest)?;
            let cfg = load_config(args.config.as_deref())?;
            let (file_name, csv) = read_csv(&path)?;
            let plan = Walkthrough {
                file_name,
                csv,
                stop_after,
                quiet: args.json,
            };
            let snapshot = run_walkthrough(cfg.demo, &plan, &mut out).await?;
            if args.json {
                writeln!(out, "{}", snapshot.to_json()?)?;
            }
        }
        "preview" => {
            let path = rest
                .first()
                .map(PathBuf::from)
                .ok_or_else(|| RunnerError::Usage("preview needs a CSV path".to_string()))?;
            let (file_name, csv) = read_csv(&path)?;
            let dataset = LoadedDataset::from_text(file_name, &csv)?;
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&dataset)?)?;
            } else {
                writeln!(out, "{}", dataset.preview.header().join(" | "))?;
                for row in dataset.preview.rows() {
                    writeln!(out, "{}", row.join(" | "))?;
                }
                writeln!(out, "Detected features: {}", dataset.feature_count)?;
            }
        }
        "sample" => match rest.first() {
            Some(path) => {
                let path = PathBuf::from(path);
                fs::write(&path, SAMPLE_CSV).map_err(|source| RunnerError::Write {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), "sample written");
            }
            None => {
                writeln!(out, "{SAMPLE_CSV}")?;
                info!(name = SAMPLE_CSV_FILENAME, "sample printed");
            }
        },
        "paths" => {
            let paths = AppPaths::new()?;
            writeln!(out, "Config directory: {}", paths.config_dir().display())?;
            writeln!(out, "Config file: {}", paths.config_file().display())?;
        }
        other => return Err(RunnerError::Usage(format!("unknown command {other:?}"))),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging (stderr keeps stdout clean for --json)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            usage();
        }
    };

    if let Err(e) = dispatch(args).await {
        if matches!(e, RunnerError::Usage(_)) {
            eprintln!("{e}");
            usage();
        }
        error!("{e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn global_flags_precede_the_command() {
        let a = parse_args(strings(&["--json", "--config", "c.json", "run", "x.csv"])).unwrap();
        assert!(a.json);
        assert_eq!(a.config, Some(PathBuf::from("c.json")));
        assert_eq!(a.rest, strings(&["run", "x.csv"]));
    }

    #[test]
    fn flags_after_the_command_belong_to_it() {
        let a = parse_args(strings(&["run", "x.csv", "--json"])).unwrap();
        assert!(!a.json);
        assert_eq!(a.rest, strings(&["run", "x.csv", "--json"]));
    }

    #[test]
    fn missing_command_is_usage_error() {
        assert!(matches!(parse_args(Vec::new()), Err(RunnerError::Usage(_))));
        assert!(matches!(
            parse_args(strings(&["--config"])),
            Err(RunnerError::Usage(_))
        ));
    }

    #[test]
    fn run_args_accept_stop_after_anywhere() {
        let (p, n) = parse_run_args(&strings(&["--stop-after", "3", "a.csv"])).unwrap();
        assert_eq!(p, PathBuf::from("a.csv"));
        assert_eq!(n, Some(3));
        let (_, n) = parse_run_args(&strings(&["a.csv"])).unwrap();
        assert_eq!(n, None);
    }

    #[test]
    fn run_args_reject_bad_input() {
        for bad in [
            vec![],
            vec!["a.csv", "--stop-after"],
            vec!["a.csv", "--stop-after", "0"],
            vec!["a.csv", "--stop-after", "x"],
            vec!["a.csv", "b.csv"],
        ] {
            assert!(
                matches!(parse_run_args(&strings(&bad)), Err(RunnerError::Usage(_))),
                "{bad:?}"
            );
        }
    }
}
