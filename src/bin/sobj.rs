//! sobj - Structured Objects CLI tool
//!
//! Compares, merges and reduces JSON/YAML documents from the command line.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use structured_objects::value::{self, Value};
use structured_objects::{combine, equals, matches, reduce, Error, Result};

#[derive(Debug, Parser)]
#[command(name = "sobj", version, about = "Structural comparison and merge of JSON/YAML documents")]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    /// Output location. Use '-' for stdout
    #[arg(short, long, default_value = "-", global = true)]
    output: String,

    /// Log to stderr; repeat for more detail. RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check two documents for deep equality
    Equals { lhs: PathBuf, rhs: PathBuf },

    /// Check that a document contains everything a pattern specifies
    Matches { subject: PathBuf, pattern: PathBuf },

    /// Deep-merge documents, later files overriding earlier ones
    Combine {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print only what a document changes on top of its bases
    Reduce {
        target: PathBuf,
        #[arg(required = true)]
        bases: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs the command. `Ok(false)` means a comparison came out negative.
fn run(cli: Cli) -> Result<bool> {
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(fs::File::create(&cli.output).map_err(|e| Error::io(&cli.output, e))?)
    };
    let destination = cli.output.as_str();

    match cli.command {
        Command::Equals { lhs, rhs } => {
            let same = equals(&load(&lhs)?, &load(&rhs)?);
            print_verdict(&mut output, destination, same)
        }
        Command::Matches { subject, pattern } => {
            let contained = matches(&load(&subject)?, &load(&pattern)?);
            print_verdict(&mut output, destination, contained)
        }
        Command::Combine { files } => {
            let documents = load_all(&files)?;
            let merged = combine(&documents);
            emit(&mut output, destination, &merged, cli.format)?;
            Ok(true)
        }
        Command::Reduce { target, bases } => {
            let target = load(&target)?;
            let bases = load_all(&bases)?;
            reduce(&target, &bases);
            emit(&mut output, destination, &target, cli.format)?;
            Ok(true)
        }
    }
}

fn load(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "loaded document");
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => value::from_yaml(&content),
        _ => value::from_json(&content),
    }
}

fn load_all(paths: &[PathBuf]) -> Result<Vec<Value>> {
    paths.iter().map(|path| load(path)).collect()
}

fn print_verdict(output: &mut dyn Write, destination: &str, verdict: bool) -> Result<bool> {
    writeln!(output, "{}", verdict).map_err(|e| Error::io(destination, e))?;
    Ok(verdict)
}

fn emit(output: &mut dyn Write, destination: &str, value: &Value, format: Format) -> Result<()> {
    let text = match format {
        Format::Json => value::to_json_pretty(value)?,
        Format::Yaml => value::to_yaml(value)?,
    };
    writeln!(output, "{}", text.trim_end()).map_err(|e| Error::io(destination, e))
}
