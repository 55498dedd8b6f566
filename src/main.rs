// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;

use subedit::app_config::{self, Config};
use subedit::app_controller::Controller;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an SRT file, or every SRT file in a directory, to WebVTT
    Convert {
        /// SRT file or directory to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Re-export an SRT file, leaving out excluded cues
    Export {
        /// SRT file to export
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Cue numbers to leave out, as shown in the file (1-based)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<usize>,

        /// Directory for the exported file (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Apply a JSON edit script to an SRT file and export the result
    Apply {
        /// SRT file to edit
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// JSON edit script
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Directory for the exported file (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the cue displayed at a given time
    Locate {
        /// SRT file to search
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Time as HH:MM:SS.mmm, MM:SS or seconds
        #[arg(value_name = "TIME")]
        time: String,
    },

    /// Generate shell completions for subedit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subedit - subtitle cue editor
///
/// Parses SRT files into cues, edits them and writes WebVTT tracks or
/// cleaned-up SRT exports.
#[derive(Parser, Debug)]
#[command(name = "subedit")]
#[command(version)]
#[command(about = "Subtitle cue editing tool")]
#[command(long_about = "subedit loads SRT subtitles, edits their cues and writes WebVTT or SRT.

EXAMPLES:
    subedit convert movie.srt                       # Write movie.vtt next to movie.srt
    subedit convert /movies/                        # Convert every .srt under a directory
    subedit export movie.srt --exclude 3,7          # Export without cues 3 and 7
    subedit apply movie.srt edits.json -o out/      # Apply an edit script, export to out/
    subedit locate movie.srt 00:12:04.500           # Show the cue at a time
    subedit completions bash > subedit.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in subedit.json by default. You can specify a
    different config file with --config. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "subedit.json", global = true)]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Force overwrite of existing output files
    #[arg(short, long, global = true)]
    force_overwrite: bool,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI colour for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
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
            let (tag, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subedit", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command, cli.force_overwrite).await
}

async fn run_command(controller: &Controller, command: Commands, force_overwrite: bool) -> Result<()> {
    match command {
        Commands::Convert { input_path } => {
            let summary = controller.convert(&input_path, force_overwrite).await?;
            if summary.failed > 0 {
                return Err(anyhow!("{} file(s) could not be converted", summary.failed));
            }
        }
        Commands::Export { input_file, exclude, output_dir } => {
            let exclude = to_zero_based(&exclude)?;
            controller
                .export(&input_file, output_dir.as_deref(), &exclude, force_overwrite)
                .await?;
        }
        Commands::Apply { input_file, script, output_dir } => {
            let (report, _) = controller
                .apply_script(&input_file, &script, output_dir.as_deref(), force_overwrite)
                .await?;
            for (position, reason) in &report.rejected {
                warn!("Script operation {} was rejected: {}", position + 1, reason);
            }
        }
        Commands::Locate { input_file, time } => match controller.locate(&input_file, &time).await? {
            Some((index, cue)) => {
                println!("{}", index + 1);
                println!("{}", cue);
            }
            None => info!("No cue is shown at {} in {}", time, input_file.display()),
        },
        Commands::Completions { .. } => {}
    }

    Ok(())
}

// Cue numbers on the command line are 1-based like the SRT counters
fn to_zero_based(numbers: &[usize]) -> Result<Vec<usize>> {
    numbers
        .iter()
        .map(|&n| n.checked_sub(1).ok_or_else(|| anyhow!("Cue numbers start at 1, got {}", n)))
        .collect()
}
