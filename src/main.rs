// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use summarist::app_config::{self, Config, TranslationProvider};
use summarist::app_controller::{Controller, PipelineOptions, Submission};
use summarist::errors::{AppError, NOTHING_TO_SAVE_MESSAGE};
use summarist::export::{parse_save_argument, ExportFormat};
use summarist::file_utils::FileManager;
use summarist::language_utils::TargetLanguage;
use summarist::task_runner::{ProgressSink, SpinnerProgress};
use summarist::SourceSelector;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for TargetLanguage to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    Hindi,
    French,
    Gujarati,
    Japanese,
}

impl From<CliLanguage> for TargetLanguage {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::Hindi => TargetLanguage::Hindi,
            CliLanguage::French => TargetLanguage::French,
            CliLanguage::Gujarati => TargetLanguage::Gujarati,
            CliLanguage::Japanese => TargetLanguage::Japanese,
        }
    }
}

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliExportFormat {
    Text,
    Pdf,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Text => ExportFormat::Text,
            CliExportFormat::Pdf => ExportFormat::Pdf,
        }
    }
}

/// What to do with a summary once it exists
#[derive(Args, Debug)]
struct OutputArgs {
    /// Translate the summary into this language
    #[arg(short, long, value_enum)]
    translate: Option<CliLanguage>,

    /// Save the final summary to this file
    #[arg(short, long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Output format, inferred from the file extension when omitted
    #[arg(short, long, value_enum, requires = "save")]
    format: Option<CliExportFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize the paragraphs of a webpage
    Url {
        /// Address of the page
        #[arg(value_name = "URL")]
        url: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Summarize text given as an argument, a file or on stdin
    Text {
        /// Text to summarize; read from stdin when omitted
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Summarize the text of a PDF document
    Pdf {
        /// PDF file to read
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Skip pages without extractable text instead of failing
        #[arg(long)]
        skip_empty_pages: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Start an interactive session
    Interactive,

    /// Generate shell completions for summarist
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// summarist - summarize web pages, text and PDF documents
#[derive(Parser, Debug)]
#[command(name = "summarist")]
#[command(version)]
#[command(about = "Summarize web pages, text and PDF documents")]
#[command(long_about = "summarist produces a short abstractive summary of a webpage, a piece of text or a PDF
document, can translate it into Hindi, French, Gujarati or Japanese, and can save it as text or PDF.

EXAMPLES:
    summarist url https://example.com/article           # Summarize a webpage
    summarist text \"Long text to summarize...\"           # Summarize text
    cat notes.txt | summarist text                      # Summarize stdin
    summarist pdf report.pdf --save summary.pdf         # Summarize a PDF and save as PDF
    summarist url https://example.com -t french         # Summarize and translate
    summarist interactive                               # Interactive session
    summarist completions bash > summarist.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in summarist.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

TRANSLATION PROVIDERS:
    google    - Google Translate web endpoint (default)
    ollama    - Local Ollama server (default: llama3.2:3b)
    anthropic - Anthropic Claude API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "summarist.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Translation provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliTranslationProvider>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "summarist", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let progress: Arc<dyn ProgressSink> = Arc::new(SpinnerProgress::new());
    let controller = Arc::new(Controller::with_config(config, progress)?);

    let result = match cli.command {
        Commands::Url { url, output } => run_once(&controller, SourceSelector::Url(url), &output).await,
        Commands::Text { text, file, output } => match read_text_input(text, file) {
            Ok(text) => run_once(&controller, SourceSelector::Text(text), &output).await,
            Err(e) => Err(e),
        },
        Commands::Pdf { path, output, .. } => run_once(&controller, SourceSelector::Pdf(path), &output).await,
        Commands::Interactive => run_interactive(Arc::clone(&controller)).await.map_err(AppError::from),
        Commands::Completions { .. } => Ok(()),
    };

    controller.shutdown();
    Ok(result?)
}

/// Load the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Commands::Pdf { skip_empty_pages: true, .. } = &cli.command {
        config.acquisition.skip_empty_pdf_pages = true;
    }

    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration from {:?}", cli.config_path);

    Ok(config)
}

fn read_text_input(text: Option<String>, file: Option<PathBuf>) -> Result<String, AppError> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(file) = file {
        return Ok(FileManager::read_to_string(file)?);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Summarize one source, then optionally translate and save it
async fn run_once(controller: &Controller, selector: SourceSelector, output: &OutputArgs) -> Result<(), AppError> {
    let options = PipelineOptions {
        translate: output.translate.map(Into::into),
        save: output.save.clone(),
        format: output.format.map(Into::into),
    };

    let report = controller.run_pipeline(selector, &options).await?;
    println!("{}", report.summary);
    if let Some(translation) = &report.translation {
        println!("{}", translation);
    }
    if let Some(saved) = &report.saved {
        info!("Saved summary to {:?}", saved);
    }

    Ok(())
}

const INTERACTIVE_HELP: &str = "Commands:
  url <URL>              summarize a webpage
  text <TEXT>            summarize text
  pdf <PATH>             summarize a PDF file
  translate <LANGUAGE>   translate the summary (Hindi, French, Gujarati, Japanese)
  save <PATH> [FORMAT]   save the summary as text or pdf
  show                   print the current summary
  help                   show this help
  quit                   leave the session";

// Print the outcome once the task is done, without blocking the prompt
fn watch(controller: Arc<Controller>, submission: Submission) {
    match submission {
        Submission::Prompt(message) => println!("{}", message),
        Submission::Started(handle) => {
            println!("Started: {}", handle.label());
            tokio::spawn(async move {
                handle.wait().await;
                if let Some(outcome) = controller.last_outcome() {
                    println!("\n{}", outcome);
                }
            });
        }
    }
}

/// Line-oriented interactive session
async fn run_interactive(controller: Arc<Controller>) -> Result<()> {
    println!("{}", INTERACTIVE_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, argument) = line.split_once(' ')
            .map(|(command, argument)| (command, argument.trim()))
            .unwrap_or((line, ""));

        let submission = match command.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", INTERACTIVE_HELP);
                continue;
            }
            "show" => {
                match controller.current_summary() {
                    Some(summary) => println!("{}", summary),
                    None => println!("{}", NOTHING_TO_SAVE_MESSAGE),
                }
                continue;
            }
            "save" => {
                save_interactive(&controller, argument);
                continue;
            }
            "url" => controller.summarize(SourceSelector::Url(argument.to_string())),
            "text" => controller.summarize(SourceSelector::Text(argument.to_string())),
            "pdf" => controller.summarize(SourceSelector::Pdf(PathBuf::from(argument))),
            "translate" => match argument.parse::<TargetLanguage>() {
                Ok(language) => controller.translate(language),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            other => {
                println!("Unknown command '{}', type 'help' for the list", other);
                continue;
            }
        };

        match submission {
            Ok(submission) => watch(Arc::clone(&controller), submission),
            Err(e) => println!("{}", e),
        }
    }

    if controller.is_busy() {
        info!("Leaving while a task is still running, its result is discarded");
    }
    Ok(())
}

fn save_interactive(controller: &Controller, argument: &str) {
    let Some((path, format)) = parse_save_argument(argument) else {
        println!("Usage: save <PATH> [text|pdf]");
        return;
    };

    match controller.download(&path, format).map_err(AppError::from) {
        Ok(saved) => println!("Saved to {:?}", saved),
        Err(e) => {
            error!("Save failed: {}", e);
            println!("{}", e);
        }
    }
}
