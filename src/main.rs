//! phase-monitor entry point: CLI wiring and config-driven session setup.

use std::path::Path;
use std::process;

use phase_monitor::cli::{CliOptions, parse_args, print_usage};
use phase_monitor::config::MonitorConfig;
use phase_monitor::logging::{LogTarget, init_tracing};
use phase_monitor::model::{parse_socket_count, parse_threshold};
use phase_monitor::reporting::{phase_series, status_table};
use phase_monitor::runner::Monitor;

/// Loads the configuration: `--config` takes priority, then `--preset`.
fn load_config(cli: &CliOptions) -> MonitorConfig {
    let loaded = if let Some(ref path) = cli.config {
        MonitorConfig::from_toml_file(path)
    } else {
        MonitorConfig::from_preset(cli.preset.as_deref().unwrap_or("house"))
    };
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

/// Applies socket, threshold, and import options in that order.
fn apply_overrides(monitor: &mut Monitor, cli: &CliOptions) {
    for (room, raw) in &cli.sockets {
        match parse_socket_count(room, raw).and_then(|n| monitor.set_sockets(room, n)) {
            Ok(change) => eprintln!("{change}"),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    }

    if let Some(ref raw) = cli.threshold {
        if let Err(e) = parse_threshold(raw).and_then(|w| monitor.set_threshold(w)) {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }

    if let Some(ref path) = cli.import {
        match monitor.import_file(path) {
            Ok(rows) => eprintln!("Imported {rows} rows from {}", path.display()),
            Err(e) => {
                eprintln!("error: failed to import {}: {e}", path.display());
                process::exit(1);
            }
        }
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) {
    let target = match log_file {
        Some(path) => LogTarget::File(path),
        // stderr output would corrupt the terminal UI
        None if interactive => return,
        None => LogTarget::Stderr,
    };
    if let Err(e) = init_tracing(target) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn main() {
    let cli = parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        print_usage();
        process::exit(1);
    });

    init_logging(cli.log_file.as_deref(), cli.tui);

    let config = load_config(&cli);
    let mut monitor = Monitor::from_config(config).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    apply_overrides(&mut monitor, &cli);

    #[cfg(feature = "tui")]
    if cli.tui {
        let preset = match (&cli.config, &cli.preset) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(name)) => name.clone(),
            (None, None) => "house".to_string(),
        };
        phase_monitor::tui::run(monitor, &preset, cli.import.clone());
        return;
    }

    for _ in 0..cli.steps {
        if let Err(e) = monitor.tick() {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }

    println!("{}", status_table(monitor.registry()));

    for (room, phase) in &cli.series {
        match phase_series(monitor.registry(), room, *phase) {
            Some(series) => print!("\n{series}"),
            None => {
                eprintln!("error: unknown room \"{room}\"");
                process::exit(1);
            }
        }
    }
}
