//! TerminalTalk: terminal chatbot over the talk-core answer engine. Config-driven via CoreConfig.

mod commands;
mod output;
mod session;
mod trivia;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use talk_core::{Assistant, CoreConfig, HashingEmbedder, KnowledgeStore};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Info,
    Warning,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FileType {
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "terminaltalk", version, about = "TerminalTalk - A Terminal Chatbot")]
struct Cli {
    /// Add a question/answer to the internal list
    #[arg(long, conflicts_with = "remove")]
    add: bool,

    /// Remove a question (or some of its answers) from the internal list
    #[arg(long)]
    remove: bool,

    /// Ask a question in direct mode, or specify the question for --add/--remove
    #[arg(long)]
    question: Option<String>,

    /// Answer text for --add/--remove. Repeat for multiple answers.
    #[arg(long)]
    answer: Vec<String>,

    /// Import questions/answers from a file instead of using internal ones
    #[arg(long = "import")]
    import_mode: bool,

    /// Type of import file
    #[arg(long, value_enum, ignore_case = true, default_value_t = FileType::Csv)]
    filetype: FileType,

    /// Path to the import file (e.g. ./qa.csv)
    #[arg(long)]
    filepath: Option<PathBuf>,

    /// List all known questions and exit
    #[arg(long)]
    list_questions: bool,

    /// Enable logging to a file
    #[arg(long)]
    log: bool,

    /// File logging level
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Warning)]
    log_level: LogLevel,

    /// Log file path
    #[arg(long, default_value = "terminaltalk.log")]
    log_file: PathBuf,

    /// Print internal diagnostic information on the console
    #[arg(long)]
    debug: bool,

    /// Seed for answer and trivia draws, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

/// Console on stderr (WARN, or DEBUG with --debug; RUST_LOG wins) plus an optional file layer.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let console_default = if cli.debug { "debug" } else { "warn" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_default));
    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);

    let file = if cli.log {
        let handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&cli.log_file)
            .with_context(|| format!("open log file {}", cli.log_file.display()))?;
        Some(
            fmt::layer()
                .with_writer(Mutex::new(handle))
                .with_ansi(false)
                .with_filter(LevelFilter::from(cli.log_level)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
    Ok(())
}

fn build_assistant<W: Write>(config: &CoreConfig, out: &mut W) -> io::Result<Assistant> {
    match Assistant::from_config(config) {
        Ok(assistant) => Ok(assistant),
        Err(e) => {
            tracing::warn!(
                target: "terminaltalk::cli",
                error = %e,
                "Could not load question defaults; using built-in questions"
            );
            output::say(out, format!("ERROR: {}. Using built-in questions.", e))?;
            Ok(Assistant::new(
                KnowledgeStore::with_builtin_defaults(),
                Box::new(HashingEmbedder::new(config.embedding_dims)),
                config,
            ))
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env before any env::var calls (config, RUST_LOG)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.debug {
        output::say(&mut out, "DEBUG MODE ENABLED")?;
        tracing::debug!(target: "terminaltalk::cli", ?cli, "Debugging mode initialized");
    }
    if cli.log {
        tracing::info!(
            target: "terminaltalk::cli",
            "Logging enabled at level {:?} (file: {})",
            cli.log_level,
            cli.log_file.display()
        );
    }

    let config = CoreConfig::load().context("load TerminalTalk config")?;
    let mut assistant = build_assistant(&config, &mut out)?;
    if let Some(seed) = cli.seed {
        assistant = assistant.with_seed(seed);
    }

    if cli.import_mode {
        match (&cli.filepath, cli.filetype) {
            (Some(path), FileType::Csv) => {
                commands::import(&mut assistant, path, &mut out)?;
            }
            (None, _) => {
                output::say(&mut out, "ERROR: --import was used but no --filepath was provided.")?;
                output::say(&mut out, "Using internal questions instead.")?;
            }
        }
    }

    if cli.add || cli.remove {
        let flag = if cli.add { "--add" } else { "--remove" };
        let Some(question) = cli.question.as_deref() else {
            output::say(&mut out, format!("ERROR: {} requires --question.", flag))?;
            return Ok(());
        };
        if cli.add {
            if cli.answer.is_empty() {
                output::say(&mut out, "ERROR: --add requires at least one --answer.")?;
                return Ok(());
            }
            commands::add(&mut assistant, question, &cli.answer, &mut out)?;
        } else {
            commands::remove(&mut assistant, question, &cli.answer, &mut out)?;
        }
        return Ok(());
    }

    if cli.list_questions {
        commands::list_questions(&assistant, &mut out)?;
        return Ok(());
    }

    if let Some(question) = cli.question.as_deref() {
        commands::ask(&mut assistant, question, &mut out)?;
        return Ok(());
    }

    drop(out);
    let stdin = io::stdin();
    let mut chat = session::Session::new(&mut assistant, stdin.lock(), io::stdout().lock());
    if let Some(seed) = cli.seed {
        chat = chat.with_seed(seed);
    }
    chat.run()?;
    io::stdout().flush()?;
    Ok(())
}
