use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use smash::cli_util::print_error;
use smash::config;
use smash::{Error, InputMode, Interpreter, filter};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const PROGRAM: &str = "smash";

#[derive(Parser, Debug)]
#[command(name = "smash", version, about = "Run a Smash program")]
struct Cli {
    /// The source file to interpret
    #[arg(value_name = "FILE", required_unless_present = "eval", conflicts_with = "eval")]
    file: Option<PathBuf>,

    /// Run CODE instead of reading FILE
    #[arg(short = 'e', long = "eval", value_name = "CODE")]
    eval: Option<String>,

    /// The number of cells available for runtime (fallback SMASH_CELLS, then smash.toml; default 30000)
    #[arg(short = 's', long = "size", value_name = "CELLS")]
    size: Option<usize>,

    /// Read input as whitespace-separated decimal numbers instead of raw bytes
    #[arg(long = "decimal")]
    decimal: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SMASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let Cli {
        file,
        eval,
        size,
        decimal,
    } = cli;

    // Resolve settings: flags -> env -> config file -> defaults
    let settings = config::settings();
    let cells = match size.or_else(|| env_var("SMASH_CELLS")) {
        Some(n) => n,
        None => settings.cells,
    };
    if cells == 0 {
        eprintln!("{PROGRAM}: cell count must be at least 1");
        let _ = io::stderr().flush();
        return 2;
    }
    let input_mode = if decimal {
        InputMode::Decimal
    } else {
        env_var("SMASH_INPUT").unwrap_or(settings.input_mode)
    };

    let source = match (file, eval) {
        (Some(path), None) => match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                debug!(path = %path.display(), "read failed: {e}");
                eprintln!("{PROGRAM}: failed to open file: {}", path.display());
                let _ = io::stderr().flush();
                return 1;
            }
        },
        (None, Some(code)) => code,
        // clap enforces exactly one of FILE and --eval
        _ => return 2,
    };

    debug!(cells, ?input_mode, bytes = source.len(), "starting");

    let mut smash = match Interpreter::stdio(&source, cells, input_mode) {
        Ok(smash) => smash,
        Err(err) => {
            print_error(Some(PROGRAM), &filter(&source), &Error::Parse(err));
            return 1;
        }
    };

    if let Err(err) = smash.run() {
        print_error(Some(PROGRAM), smash.code(), &Error::Runtime(err));
        return 1;
    }

    0
}

/// Parse an environment variable. A malformed value is logged and ignored.
fn env_var<T>(name: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("ignoring {name}={raw:?}: {e}");
            None
        }
    }
}
