// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use bibsort::app_config::{Config, LogLevel};
use bibsort::app_controller::{detection_lines, Controller};
use bibsort::errors::AppError;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the sort key extracted from every entry, in sorted order
    Keys {
        /// Bibliography file to inspect
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
    },

    /// Generate shell completions for bibsort
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// bibsort - sort a LaTeX thebibliography by first author surname
#[derive(Parser, Debug)]
#[command(name = "bibsort")]
#[command(version)]
#[command(about = "Sort \\bibitem entries by first author surname")]
#[command(long_about = "bibsort reads a thebibliography environment, orders its \\bibitem entries
alphabetically by the first author's surname (case-insensitive, stable) and
writes the document back with the same header and footer.

EXAMPLES:
    bibsort                                # bib.txt -> sorted_bib.txt
    bibsort refs.tex refs.sorted.tex       # Explicit input and output
    bibsort --stdout refs.tex              # Print instead of writing
    bibsort --check refs.tex               # Report whether already sorted
    bibsort keys refs.tex                  # Show the extracted sort keys
    bibsort completions bash > bibsort.bash

CONFIGURATION:
    No configuration file is read unless --config is given. The JSON file may
    set input_file, output_file, environment_argument, entry_separator and
    log_level; command line values take precedence.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Bibliography to sort [default: bib.txt]
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Where to write the sorted bibliography [default: sorted_bib.txt]
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Print the sorted document to standard output instead of writing a file
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Only report whether the entries are already sorted
    #[arg(long)]
    check: bool,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Info until the configuration has been read
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "bibsort", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLineOptions) -> Result<ExitCode, AppError> {
    let mut config = match &cli.config_path {
        Some(path) => Config::load(path).map_err(|e| AppError::Config(format!("{:#}", e)))?,
        None => Config::default(),
    };

    // Command line values override the configuration file
    let input_override = match &cli.command {
        Some(Commands::Keys { input }) => input.clone(),
        _ => cli.input.clone(),
    };
    if let Some(input) = input_override {
        config.input_file = input;
    }
    if let Some(output) = cli.output.clone() {
        config.output_file = output;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }

    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    if matches!(cli.command, Some(Commands::Keys { .. })) {
        return list_keys(&controller);
    }

    if cli.check {
        return check_order(&controller);
    }

    sort_bibliography(&controller, cli.stdout)
}

// @prints: Pipeline diagnostics on stdout, in pipeline order
fn sort_bibliography(controller: &Controller, to_stdout: bool) -> Result<ExitCode, AppError> {
    if to_stdout {
        let prepared = controller.prepare()?;
        info!("Detected {} reference entries.", prepared.entry_count());
        let sorted = controller.sort(prepared)?;
        print!("{}", sorted.content);
        return Ok(ExitCode::SUCCESS);
    }

    let report = controller.run_with_progress(|detected| print_lines(&detection_lines(detected)))?;
    print_lines(&report.summary_lines());

    Ok(ExitCode::SUCCESS)
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn check_order(controller: &Controller) -> Result<ExitCode, AppError> {
    let input = controller.config().input_file.display().to_string();

    if controller.check()? {
        println!("'{}' is already sorted.", input);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("'{}' is not sorted.", input);
        Ok(ExitCode::FAILURE)
    }
}

fn list_keys(controller: &Controller) -> Result<ExitCode, AppError> {
    let listings = controller.inspect_keys()?;

    for listing in &listings {
        println!(
            "{:>4}  {:<24} [{}]  {}",
            listing.position + 1,
            listing.key.value.lines().next().unwrap_or_default(),
            listing.key.strategy,
            listing.label
        );
    }
    println!("{} entries.", listings.len());

    Ok(ExitCode::SUCCESS)
}

fn report_error(error: &AppError) {
    println!("Error: {}", error);
}
