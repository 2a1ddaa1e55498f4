//! Schema canvas CLI - drive a canvas session from the command line.
//!
//! Replays recorded commands and gesture events (one JSON object per
//! line) or runs an interactive prompt against a fresh session.

mod logger;

use anyhow::{Context, Result};
use api::{process_message, Query};
use canvas::{Canvas, CanvasConfig};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use node::Schema;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Schema canvas CLI - replay and inspect canvas sessions
#[derive(Parser)]
#[command(name = "schema-canvas")]
#[command(about = "Command-line interface for the schema canvas transform core")]
struct Cli {
    /// Zoom configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Schema document whose models are placed on the canvas at startup
    #[arg(short, long, global = true)]
    schema: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, env = "SCHEMA_CANVAS_LOG", default_value = "warn", global = true)]
    log_level: LevelFilter,

    /// Directory for run logs (default: ~/.schema-canvas/logs)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log to stderr only
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines script of commands and queries ("-" for stdin)
    Replay {
        /// Script to replay
        script: PathBuf,
    },

    /// Start an interactive session
    Repl,

    /// Validate a configuration file and print the effective values
    CheckConfig {
        /// Configuration file (JSON)
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let run = logger::RunLogger::init(cli.log_level, cli.log_dir.as_deref(), !cli.no_log_file)?;
    log::debug!("run {}", run.run_id);

    match &cli.command {
        Commands::Replay { script } => {
            let mut canvas = open_session(&cli)?;
            replay(&mut canvas, script)
        }
        Commands::Repl => {
            let mut canvas = open_session(&cli)?;
            repl(&mut canvas)
        }
        Commands::CheckConfig { path } => check_config(path),
    }
}

/// Build the session from the config and schema flags.
fn open_session(cli: &Cli) -> Result<Canvas> {
    let config = match &cli.config {
        Some(path) => CanvasConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CanvasConfig::default(),
    };
    let mut canvas = Canvas::new(config)?;

    if let Some(path) = &cli.schema {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema {}", path.display()))?;
        let schema = Schema::from_json_str(&json)
            .with_context(|| format!("Invalid schema {}", path.display()))?;
        log::info!("loaded {} models from {}", schema.models.len(), path.display());
        canvas.load_schema(schema);
        canvas.take_redraw();
        canvas.drain_events();
    }

    Ok(canvas)
}

/// Replay every line of a script, printing one response per line.
fn replay(canvas: &mut Canvas, script: &Path) -> Result<()> {
    logger::log_section(&format!("replay {}", script.display()));

    let reader: Box<dyn BufRead> = if script == Path::new("-") {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = std::fs::File::open(script)
            .with_context(|| format!("Failed to open script {}", script.display()))?;
        Box::new(BufReader::new(file))
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut frames = 0usize;

    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", number + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let response = process_message(canvas, line);
        writeln!(out, "{}", response)?;

        if canvas.take_redraw() {
            frames += 1;
            for event in canvas.drain_events() {
                log::trace!("line {}: {:?}", number + 1, event);
            }
        }
    }

    out.flush()?;
    log::info!("replay finished, {} frames redrawn", frames);
    Ok(())
}

/// Read commands from stdin until EOF or `quit`.
fn repl(canvas: &mut Canvas) -> Result<()> {
    println!("Schema canvas session. Enter commands (JSON) or 'help' for usage. Ctrl+D to exit.\n");

    let stdin = std::io::stdin();

    loop {
        print!("canvas> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let message = match input {
            "help" | "?" => {
                print_help();
                continue;
            }
            "quit" | "exit" => break,
            "transform" => serde_json::to_string(&Query::GetTransform)?,
            "tables" => serde_json::to_string(&Query::GetTables)?,
            "positions" => serde_json::to_string(&Query::GetPositions)?,
            "render" => serde_json::to_string(&Query::GetRender)?,
            _ => input.to_string(),
        };

        print_response(&process_message(canvas, &message))?;
        canvas.take_redraw();
        canvas.drain_events();
    }

    Ok(())
}

fn print_help() {
    println!("Schema Canvas Interactive Mode");
    println!("==============================");
    println!();
    println!("Built-in commands:");
    println!("  transform   - Get viewport offset and scale");
    println!("  tables      - Get all tables");
    println!("  positions   - Get all table positions");
    println!("  render      - Get the render snapshot");
    println!("  help, ?     - Show this help");
    println!("  quit, exit  - Exit interactive mode");
    println!();
    println!("JSON Commands (examples):");
    println!("  {{\"type\": \"add_table\", \"table\": {{\"name\": \"User\"}}}}");
    println!("  {{\"type\": \"pan\", \"delta\": [10, -5]}}");
    println!("  {{\"type\": \"zoom\", \"pointer\": [100, 100], \"direction\": \"in\"}}");
    println!("  {{\"type\": \"begin_drag\", \"name\": \"User\"}}");
    println!("  {{\"type\": \"update_drag\", \"name\": \"User\", \"delta\": [50, 0]}}");
    println!("  {{\"type\": \"input\", \"event\": {{\"type\": \"wheel\", \"pointer\": [0, 0], \"delta_y\": -1}}}}");
    println!();
    println!("JSON Queries:");
    println!("  {{\"type\": \"get_transform\"}}");
    println!("  {{\"type\": \"get_position\", \"name\": \"User\"}}");
    println!("  {{\"type\": \"screen_to_canvas\", \"point\": [100, 100]}}");
}

fn print_response(response: &str) -> Result<()> {
    // Pretty print when the response is valid JSON
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(response) {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", response.trim());
    }
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = CanvasConfig::load(path)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
