// loxfront: tokenize or parse a Lox source file

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::{style, Stylize};
use crossterm::tty::IsTty;
use log::LevelFilter;

use loxfront::diagnostics::Diagnostics;
use loxfront::parser::ast::Expr;
use loxfront::parser::token::Token;
use loxfront::pipeline::{self, PipelineConfig, Schedule, DEFAULT_CHANNEL_CAPACITY};

#[derive(Parser)]
#[command(name = "loxfront")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lox lexer and expression parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// How the lexer and the parser are scheduled
    #[arg(long, global = true, value_enum, default_value_t = ScheduleArg::Streamed)]
    schedule: ScheduleArg,

    /// Tokens buffered between lexer and parser in streamed mode
    #[arg(long, global = true, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    capacity: usize,

    /// Log pipeline activity to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every token of a file, one per line
    #[command(after_help = "Example:\n  loxfront tokenize test.lox")]
    Tokenize {
        /// Path to the Lox source file
        file: PathBuf,
    },

    /// Print the tree of every top-level expression in a file
    #[command(after_help = "Example:\n  loxfront parse test.lox")]
    Parse {
        /// Path to the Lox source file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ScheduleArg {
    /// Lex everything first, then parse
    Eager,
    /// Lex on a separate thread while parsing
    Streamed,
}

impl From<ScheduleArg> for Schedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Eager => Schedule::Eager,
            ScheduleArg::Streamed => Schedule::Streamed,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = PipelineConfig {
        schedule: cli.schedule.into(),
        channel_capacity: cli.capacity,
    };

    let diagnostics = match &cli.command {
        Commands::Tokenize { file } => tokenize_command(&read_source(file)?, &config)?,
        Commands::Parse { file } => parse_command(read_source(file)?, &config)?,
    };

    Ok(ExitCode::from(diagnostics.exit_code() as u8))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Error reading file: {}", path.display()))
}

/// Tokens on stdout, lexical errors on stderr, as they arrive.
fn tokenize_command(source: &[u8], config: &PipelineConfig) -> Result<Diagnostics> {
    let tokens: Box<dyn Iterator<Item = Token>> = match config.schedule {
        Schedule::Eager => Box::new(pipeline::tokenize(source).tokens.into_iter()),
        Schedule::Streamed => Box::new(
            pipeline::stream_tokens(source.to_vec(), config.channel_capacity)
                .context("Failed to start lexer thread")?,
        ),
    };

    let mut stdout = io::stdout().lock();
    let mut diagnostics = Diagnostics::new();

    for token in tokens {
        if diagnostics.record_token(&token) {
            report_error(token.error_message().unwrap_or_default());
        } else {
            writeln!(stdout, "{}", token)?;
        }
    }

    Ok(diagnostics)
}

/// Expression trees on stdout, error nodes on stderr, in source order.
fn parse_command(source: Vec<u8>, config: &PipelineConfig) -> Result<Diagnostics> {
    let parsed = pipeline::run(source, config).context("Failed to start lexer thread")?;

    let mut stdout = io::stdout().lock();
    for expr in &parsed.exprs {
        match expr {
            Expr::Error { message, .. } => report_error(message),
            _ => writeln!(stdout, "{}", expr)?,
        }
    }

    Ok(parsed.diagnostics())
}

fn report_error(message: &str) {
    if io::stderr().is_tty() {
        eprintln!("{}", style(message).red());
    } else {
        eprintln!("{}", message);
    }
}
