use abacus::keymap::parse_line;
use abacus::persistence::{FileStore, KeyValueStore, MemoryStore};
use abacus::session::{Session, SessionConfig, SessionHandle};
use abacus::terminal::TerminalScreen;
use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
keys: 0-9 . + - * / % = Enter Escape c h
actions: root square reciprocal negate percent storage-retrieve storage-save
         storage-increase storage-decrease history history-clear
         history-select:<n> theme
empty line, quit or Ctrl-D exits";

/// Accumulator-style pocket calculator
#[derive(Parser, Debug)]
#[command(name = "abacus", version, about)]
struct Args {
    /// Directory for history, memory and settings [default: platform data dir]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep nothing between runs
    #[arg(long)]
    no_persist: bool,

    /// Milliseconds the error display stays up before resetting
    #[arg(long, default_value_t = 2000)]
    reset_delay_ms: u64,

    /// Log filter such as "debug" or "abacus=trace"; RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = SessionConfig {
        reset_delay: Duration::from_millis(args.reset_delay_ms),
        ..SessionConfig::default()
    };
    let store = open_store(&args);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    println!("{HELP}");
    let session = Session::open(store, TerminalScreen::new());
    let handle = runtime.block_on(async { SessionHandle::spawn(session, config) });

    let mut editor = DefaultEditor::new().context("failed to open line editor")?;
    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("failed to read input"),
        };

        let line = line.trim();
        if line.is_empty() || line == "quit" || line == "exit" {
            break;
        }
        editor.add_history_entry(line)?;

        let parsed = parse_line(line);
        for token in &parsed.unknown {
            println!("unknown key or action: {token}");
        }
        runtime.block_on(handle.dispatch_all(parsed.commands))?;
    }

    println!("Goodbye!");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_store(args: &Args) -> Box<dyn KeyValueStore> {
    if args.no_persist {
        return Box::new(MemoryStore::new());
    }

    let dir = args
        .data_dir
        .clone()
        .or_else(|| dirs::data_dir().map(|dir| dir.join("abacus")));
    match dir {
        Some(dir) => {
            info!("Persisting to {}", dir.display());
            Box::new(FileStore::new(dir))
        }
        None => {
            warn!("No data directory available, nothing will be kept between runs");
            Box::new(MemoryStore::new())
        }
    }
}
