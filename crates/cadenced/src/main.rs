//! cadenced - run a cadence phase program in the terminal
//!
//! Wires together:
//! - Program file loading
//! - Session engine and runner
//! - Keystroke commands from stdin
//! - Event and status output

mod display;
mod keys;

use anyhow::{Context, Result};
use cadence_api::{ActivityItem, Command, Event, EventPayload};
use cadence_config::load_config;
use cadence_core::SessionEngine;
use cadence_runner::{CommandSender, RunnerHandle, SessionRunner, TokioClock};
use cadence_util::default_config_path;
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::keys::{KEY_HELP, KeyAction, parse_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// cadenced - timed phase programs (workouts, focus blocks) in the terminal
#[derive(Parser, Debug)]
#[command(name = "cadenced")]
#[command(about = "Run a timed phase program in the terminal", long_about = None)]
struct Args {
    /// Program file path (default: $CADENCE_CONFIG, else ~/.config/cadence/program.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Skip the preparation countdown
    #[arg(long)]
    no_prep: bool,

    /// Print event envelopes as JSON lines instead of text
    #[arg(long)]
    json_events: bool,

    /// Keep running after the session completes
    #[arg(long)]
    stay: bool,
}

fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Read keystroke lines from stdin until EOF or quit
fn spawn_stdin_reader(commands: CommandSender, quit_tx: mpsc::UnboundedSender<()>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            };

            match parse_key(&line) {
                Some(KeyAction::Command(command)) => {
                    debug!(command = ?command, "Key command");
                    if commands.send(command).is_err() {
                        break;
                    }
                }
                Some(KeyAction::Quit) => {
                    let _ = quit_tx.send(());
                    break;
                }
                None => println!("{}", KEY_HELP),
            }
        }
    });
}

struct Terminal {
    items: Vec<ActivityItem>,
    json_events: bool,
}

impl Terminal {
    fn print_event(&self, event: &Event) -> Result<()> {
        if self.json_events {
            let line = serde_json::to_string(event).context("Failed to serialize event")?;
            println!("{}", line);
        } else if let Some(line) = display::describe_event(&event.payload, &self.items) {
            println!("{}", line);
        }
        Ok(())
    }

    fn print_status(&self, handle: &RunnerHandle) {
        if self.json_events {
            return;
        }
        let snapshot = handle.snapshot();
        if !snapshot.phase.is_running() {
            return;
        }
        print!("\r{}", display::status_line(&snapshot, &self.items));
        let _ = std::io::stdout().flush();
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load program from {:?}", args.config))?;

    let mut program = config.program.clone();
    if args.no_prep {
        program = program.with_prep_duration(Duration::ZERO);
    }

    info!(
        program = config.display_name(),
        item_count = program.item_count(),
        total_duration_secs = program.total_duration().as_secs(),
        "Program ready"
    );

    let terminal = Terminal {
        items: program.items().to_vec(),
        json_events: args.json_events,
    };

    let engine = SessionEngine::new(program, TokioClock);
    let handle = SessionRunner::spawn(engine, config.runner);
    let mut events = handle.subscribe();

    let (quit_tx, mut quit_rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(handle.commander(), quit_tx);

    let mut sigterm = signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

    if !args.json_events {
        println!("{}", config.display_name());
        println!("{}", KEY_HELP);
    }
    handle.send(Command::Start)?;

    let mut status_timer = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, stopping");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, stopping");
                break;
            }
            Some(()) = quit_rx.recv() => {
                info!("Quit requested");
                break;
            }
            received = events.recv() => {
                let event = match received {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event output lagging");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };

                if !args.json_events {
                    println!();
                }
                terminal.print_event(&event)?;

                if matches!(event.payload, EventPayload::SessionCompleted { .. }) && !args.stay {
                    break;
                }
            }
            _ = status_timer.tick() => {
                terminal.print_status(&handle);
            }
        }
    }

    handle.shutdown().await.context("Session runner failed")?;

    // Drain whatever the shutdown produced
    while let Ok(event) = events.try_recv() {
        terminal.print_event(&event)?;
    }

    info!("Shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    info!(version = env!("CARGO_PKG_VERSION"), "cadenced starting");

    run(args).await
}
