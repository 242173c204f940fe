//! memwarden CLI - user-space memory pressure monitor

use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use memwarden::core::config::MonitorConfig;
use memwarden::core::memory::MemorySnapshot;
use memwarden::core::monitor::PressureMonitor;
use memwarden::platform::linux::current_uid;
use memwarden::platform::ProcSource;

#[derive(Parser)]
#[command(name = "memwarden")]
#[command(about = "User-space memory pressure monitor with OOM mitigation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor loop
    Run {
        /// Available memory threshold in percent; 0 disables killing
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Subtract a positive oom_score_adj from the badness score
        #[arg(short, long)]
        ignore_adj: bool,

        /// Preferred process name substring to kill first
        #[arg(short, long)]
        prefer: Option<String>,

        /// Compute and report, but do not kill
        #[arg(short, long)]
        simulate: bool,

        /// Verbose logging
        #[arg(short, long)]
        verbose: bool,

        /// Seconds between samples
        #[arg(long)]
        interval: Option<u64>,

        /// TOML configuration file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show current memory status
    Status,

    /// Show the effective configuration as TOML
    Config {
        /// TOML configuration file to resolve against
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            threshold,
            ignore_adj,
            prefer,
            simulate,
            verbose,
            interval,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(threshold) = threshold {
                config.threshold_percent = threshold;
            }
            if let Some(prefer) = prefer {
                config.prefer = prefer;
            }
            if let Some(interval) = interval {
                config.interval_secs = interval;
            }
            config.ignore_adj |= ignore_adj;
            config.simulate |= simulate;
            config.verbose |= verbose;

            init_logging(config.verbose)?;
            run(config)
        }

        Commands::Status => {
            init_logging(false)?;
            status()
        }

        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<MonitorConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => MonitorConfig::load(path),
        None => Ok(MonitorConfig::default()),
    }
}

fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// The outer tick loop: fully sequential, one blocking cycle per interval.
fn run(config: MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "starting monitor (threshold {}%, sampling every {}s)",
        config.threshold_percent, config.interval_secs
    );

    let interval = Duration::from_secs(config.interval_secs);
    let monitor = PressureMonitor::new(config, ProcSource::new(), current_uid());
    let mut stdout = io::stdout();

    loop {
        // Clear screen and home the cursor before each report
        print!("\x1B[2J\x1B[1;1H");

        if let Err(err) = monitor.tick(&mut stdout) {
            // Systemic for this tick only; try again on the next one
            warn!("sampling cycle failed: {}", err);
        }

        thread::sleep(interval);
    }
}

fn status() -> Result<(), Box<dyn std::error::Error>> {
    let source = ProcSource::new();
    let snapshot = MemorySnapshot::read(&source)?;

    println!("Memory status:");
    println!("  Total:     {} MiB", snapshot.metric("MemTotal")? / 1024);
    println!(
        "  Available: {} MiB ({:.0}%)",
        snapshot.metric("MemAvailable")? / 1024,
        snapshot.available_percent()?
    );
    println!(
        "  Swap free: {} MiB of {} MiB ({:.0}%)",
        snapshot.metric("SwapFree")? / 1024,
        snapshot.metric("SwapTotal")? / 1024,
        snapshot.swap_free_percent()?
    );
    Ok(())
}
