//! Oche CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use oche_runtime::{Repl, RuntimeConfig};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    trace: bool,
    no_banner: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--trace" => config.trace = true,
            "--no-banner" => config.no_banner = true,
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option: {flag}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn init_tracing(config: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color)
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("oche {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Scripts establish context, so skip the banner after them
    let config = RuntimeConfig::default()
        .with_trace(cli.trace)
        .with_banner(!cli.no_banner && cli.files.is_empty());
    init_tracing(&config);

    let mut repl = Repl::new(config)?;

    for file in &cli.files {
        if !repl.eval_file(file).map_err(describe)? {
            return Ok(());
        }
    }

    if cli.batch_mode {
        return Ok(());
    }

    repl.run()?;
    Ok(())
}

/// Appends the script location to an error, when known.
fn describe(error: oche_foundation::Error) -> Box<dyn std::error::Error> {
    match &error.context {
        Some(context) => format!("{error} ({context})").into(),
        None => error.into(),
    }
}

fn print_help() {
    println!(
        "\x1b[1mOche\x1b[0m - Legs darts scorekeeper

\x1b[1mUSAGE:\x1b[0m
    oche [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Command scripts to run before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Run scripts and exit (no REPL)
    --trace            Log dispatched commands (debug level)
    --no-banner        Skip the welcome banner

\x1b[1mEXAMPLES:\x1b[0m
    oche                     Start interactive REPL
    oche setup.oche          Run setup.oche, then start REPL
    oche -b match.oche       Run match.oche and exit
    RUST_LOG=info oche       Log match lifecycle events

\x1b[1mREPL COMMANDS:\x1b[0m
    new <id>                 Create a match and make it current
    player <name> <splash>   Add a player
    start                    Start the match (needs two players)
    score <n>                Score a round for the player due to throw
    board                    Show the scoreboard
    players                  List players and their rounds
    Ctrl+D                   Exit REPL"
    );
}
