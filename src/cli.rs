//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::model::Phase;

pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    pub steps: usize,
    pub import: Option<PathBuf>,
    pub sockets: Vec<(String, String)>,
    pub threshold: Option<String>,
    pub series: Vec<(String, Phase)>,
    pub log_file: Option<PathBuf>,
    pub tui: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        config: None,
        preset: None,
        seed: None,
        steps: 1,
        import: None,
        sockets: Vec::new(),
        threshold: None,
        series: Vec::new(),
        log_file: None,
        tui: false,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--steps" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --steps (expected a count)")?;
                opts.steps = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--steps value \"{raw}\" is not a valid count"))?;
            }
            "--import" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --import (expected a CSV file path)")?;
                if opts.import.replace(PathBuf::from(path)).is_some() {
                    return Err("--import provided more than once".to_string());
                }
            }
            "--sockets" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --sockets (expected <room>=<count>)")?;
                let (room, count) = raw
                    .rsplit_once('=')
                    .ok_or_else(|| format!("--sockets value \"{raw}\" must look like <room>=<count>"))?;
                opts.sockets.push((room.trim().to_string(), count.trim().to_string()));
            }
            "--threshold" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --threshold (expected watts)")?;
                opts.threshold = Some(raw.to_string());
            }
            "--series" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --series (expected <room>:<phase>)")?;
                opts.series.push(parse_series(raw)?);
            }
            "--log-file" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --log-file (expected a file path)")?;
                opts.log_file = Some(PathBuf::from(path));
            }
            #[cfg(feature = "tui")]
            "--tui" => opts.tui = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.config.is_none() && opts.preset.is_none() {
        opts.preset = Some("house".to_string());
    }

    Ok(opts)
}

fn parse_series(raw: &str) -> Result<(String, Phase), String> {
    let (room, phase) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("--series value \"{raw}\" must look like <room>:<phase>"))?;
    let index = phase
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("--series phase \"{phase}\" is not 1, 2 or 3"))?;
    let phase = Phase::from_index(index).map_err(|e| e.to_string())?;
    Ok((room.trim().to_string(), phase))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("phase-monitor - per-room three-phase consumption monitor");
    eprintln!();
    eprintln!("Usage: phase-monitor [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load configuration from a TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (house, studio, workshop)");
    eprintln!("  --seed <u64>             Override the random seed");
    eprintln!("  --steps <n>              Number of simulated updates (default: 1)");
    eprintln!("  --import <csv>           Import history from CSV into every room");
    eprintln!("  --sockets <room>=<n>     Set a room's socket count (repeatable)");
    eprintln!("  --threshold <watts>      Set the warning threshold");
    eprintln!("  --series <room>:<phase>  Print a room's phase history (repeatable)");
    eprintln!("  --log-file <path>        Write logs to a file instead of stderr");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Start the interactive terminal UI");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the house preset is used.");
}
