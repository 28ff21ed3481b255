//! Load monitor entry point — CLI wiring and config-driven service construction.

use std::path::Path;
use std::process;

use smartload::config::MonitorConfig;
use smartload::io::export::export_csv;
use smartload::monitor::MonitoringService;
use smartload::runner::run_monitor;

/// Parsed CLI arguments.
struct CliArgs {
    settings_path: Option<String>,
    preset: Option<String>,
    mode_override: Option<String>,
    ticks: u64,
    interval_override_ms: Option<u64>,
    seed_override: Option<u64>,
    fast: bool,
    quiet: bool,
    telemetry_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("smartload — Smart-home electrical load monitor and simulator");
    eprintln!();
    eprintln!("Usage: smartload [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --settings <path>        Load settings from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (standard)");
    eprintln!("  --mode <name>            Override simulation mode (random, scripted)");
    eprintln!("  --ticks <u64>            Number of monitoring ticks to run (default: 36)");
    eprintln!("  --interval-ms <u64>      Override tick interval in milliseconds");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --fast                   Run without sleeping between ticks");
    eprintln!("  --quiet                  Suppress per-tick output");
    eprintln!("  --telemetry-out <path>   Export tick snapshots to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server instead of a batch run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Start the terminal dashboard");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --settings or --preset is given, the standard preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        settings_path: None,
        preset: None,
        mode_override: None,
        ticks: 36,
        interval_override_ms: None,
        seed_override: None,
        fast: false,
        quiet: false,
        telemetry_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--settings" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --settings requires a path argument");
                    process::exit(1);
                }
                cli.settings_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--mode" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --mode requires a name argument");
                    process::exit(1);
                }
                cli.mode_override = Some(args[i].clone());
            }
            "--ticks" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --ticks requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(t) = args[i].parse::<u64>() {
                    cli.ticks = t;
                } else {
                    eprintln!("error: --ticks value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--interval-ms" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --interval-ms requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(ms) = args[i].parse::<u64>() {
                    cli.interval_override_ms = Some(ms);
                } else {
                    eprintln!("error: --interval-ms value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--fast" => {
                cli.fast = true;
            }
            "--quiet" => {
                cli.quiet = true;
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --settings takes priority, then --preset, then standard default
    let mut config = if let Some(ref path) = cli.settings_path {
        match MonitorConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match MonitorConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        MonitorConfig::standard()
    };

    // Apply CLI overrides
    if let Some(ref mode) = cli.mode_override {
        config.simulation.mode = mode.clone();
    }
    if let Some(ms) = cli.interval_override_ms {
        config.simulation.tick_interval_ms = ms;
    }
    if let Some(seed) = cli.seed_override {
        config.simulation.seed = seed;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let settings = config.build_settings();
    let mut service = MonitoringService::new(settings, config.simulation.seed);

    // Interactive surfaces take over the process when requested
    #[cfg(feature = "tui")]
    if cli.tui {
        if let Err(e) = smartload::tui::run(service) {
            eprintln!("error: terminal dashboard failed: {e}");
            process::exit(1);
        }
        return;
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::{Arc, Mutex};

        let state = Arc::new(Mutex::new(service));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(smartload::api::serve(state, addr));
        return;
    }

    // Batch run
    let summary = run_monitor(&mut service, cli.ticks, cli.fast, cli.quiet);
    service.stop();

    println!("\n{summary}");

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&summary.snapshots, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
