// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::app_config::{Config, LogLevel};
use crate::providers::huggingface::HuggingFace;
use crate::translation::TranslationService;
use crate::web::WebServer;

mod app_config;
mod detection;
mod errors;
mod providers;
mod responder;
mod translation;
mod web;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliLogLevel {
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Normal operational output
    Info,
    /// Detailed debugging information
    Debug,
    /// Very verbose tracing output
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Subcommands for the application
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the query-answering HTTP server
    Serve(ServeArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the serve command
#[derive(Parser, Debug, Clone)]
struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "conf.json", env = "POLYREPLY_CONFIG")]
    config: String,

    /// Address to bind the server to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served under /static (overrides config)
    #[arg(long)]
    static_dir: Option<String>,

    /// Warm up every configured model pair before accepting requests
    #[arg(long)]
    preload_models: bool,

    /// Log level for the application
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Command line options for the application
#[derive(Parser, Debug)]
#[command(
    name = "polyreply",
    author = "Polyreply Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Answer customer queries in their own language",
    long_about = "Polyreply detects the language of an incoming query, translates it to \
English with Opus-MT model pairs, generates a reply from keyword rules and can \
translate the reply back before responding.\n\n\
EXAMPLES:\n\
    polyreply                                # Serve using conf.json defaults\n\
    polyreply -p 9000                        # Listen on a different port\n\
    polyreply --host 127.0.0.1 -p 8080       # Bind to localhost only\n\
    polyreply --preload-models               # Warm every model pair at boot\n\
    polyreply -l debug                       # Verbose request logging\n\
    polyreply completions bash               # Generate bash completions\n\n\
CONFIGURATION:\n\
    Settings are read from conf.json (override with --config or POLYREPLY_CONFIG).\n\
    A default configuration file is created on first run if none exists.\n\n\
SUPPORTED LANGUAGES:\n\
    es, fr, de, hi, pt, it are translated through English. English input is\n\
    answered directly and undetected languages pass through untranslated."
)]
struct CommandLineOptions {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, default_value = "conf.json", env = "POLYREPLY_CONFIG")]
    config: String,

    /// Address to bind the server to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served under /static (overrides config)
    #[arg(long)]
    static_dir: Option<String>,

    /// Warm up every configured model pair before accepting requests
    #[arg(long)]
    preload_models: bool,

    /// Log level for the application
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation for console output
// @implements: log::Log trait for integration with log crate
struct CustomLogger;

impl CustomLogger {
    // @creates: New logger instance with specified log level
    // @initializes: Global logger for the application
    fn init(level: LevelFilter) -> std::result::Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji corresponding to log level for visual identification
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => " ",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let emoji = Self::get_emoji_for_level(record.level());
            match record.level() {
                Level::Error => {
                    eprintln!("\x1B[1;31m{} {} {}\x1B[0m", now, emoji, record.args());
                }
                Level::Warn => {
                    eprintln!("\x1B[1;33m{} {} {}\x1B[0m", now, emoji, record.args());
                }
                Level::Info => {
                    eprintln!("{} {} {}", now, emoji, record.args());
                }
                Level::Debug => {
                    eprintln!("\x1B[1;36m{} {} {}\x1B[0m", now, emoji, record.args());
                }
                Level::Trace => {
                    eprintln!("\x1B[1;35m{} {} {}\x1B[0m", now, emoji, record.args());
                }
            }
        }
    }

    fn flush(&self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize our custom logger with info level by default
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let options = CommandLineOptions::parse();

    match options.command {
        Some(Commands::Serve(args)) => run_serve(args).await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "polyreply", &mut std::io::stdout());
            Ok(())
        }
        None => {
            // Top-level arguments behave like an implicit serve command
            let args = ServeArgs {
                config: options.config,
                host: options.host,
                port: options.port,
                static_dir: options.static_dir,
                preload_models: options.preload_models,
                log_level: options.log_level,
            };
            run_serve(args).await
        }
    }
}

/// Load configuration, build the translation service and run the server
async fn run_serve(options: ServeArgs) -> Result<()> {
    // Apply the command line log level right away so config loading is logged at it
    if let Some(cli_level) = options.log_level {
        log::set_max_level(cli_level.into());
    }

    let config_path = Path::new(&options.config);
    let mut config: Config = if config_path.exists() {
        let file = File::open(config_path)
            .with_context(|| format!("Failed to open config file: {}", config_path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        warn!(
            "Config file not found at {}, creating a default one",
            config_path.display()
        );
        let config = Config::default();
        config.to_file(config_path)?;
        config
    };

    // Command line arguments take precedence over the configuration file
    if let Some(host) = &options.host {
        config.server.host = host.clone();
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }
    if let Some(static_dir) = &options.static_dir {
        config.static_dir = static_dir.clone();
    }
    if options.preload_models {
        config.preload_models = true;
    }
    if let Some(cli_level) = options.log_level {
        config.log_level = cli_level.into();
    }

    config
        .validate()
        .context("Invalid configuration, please check your config file")?;

    // Without a command line override the configured level applies
    if options.log_level.is_none() {
        log::set_max_level(match config.log_level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        });
    }

    let backend = HuggingFace::from_config(&config.provider);
    let service = TranslationService::new(Arc::new(backend));

    // The inference API can be slow to wake up, so a failed probe is not fatal
    match service.test_connection().await {
        Ok(()) => info!("Inference API reachable at {}", config.provider.endpoint),
        Err(e) => warn!(
            "Inference API probe failed ({}), pipelines will retry on demand",
            e
        ),
    }

    if config.preload_models {
        service.preload().await;
    }

    let server = WebServer::new(config, service);
    server.start().await?;

    Ok(())
}
