use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use texdiag_log::{Level, ParseOptions, ParseResult, parse_latex_log};

mod report;

#[derive(Parser)]
#[command(name = "texdiag")]
#[command(about = "Extract errors and warnings from LaTeX logs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a TeX log file and emit the diagnostics as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Print only one bucket instead of the whole result
        #[arg(long, value_enum)]
        level: Option<LevelArg>,
    },
    /// Print one line per diagnostic; exits with status 1 when errors were found
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Path to the .log file, or `-` for standard input
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// JSON file with parser options (`ignoreDuplicates`, `fileBaseNames`)
    #[arg(long, value_name = "JSON")]
    options: Option<PathBuf>,

    /// Drop entries whose raw text was already reported
    #[arg(long)]
    ignore_duplicates: bool,

    /// Pattern for paths outside the project (repeatable, replaces the defaults)
    #[arg(long = "base-name", value_name = "REGEX")]
    base_names: Vec<String>,

    /// Drop entries attributed to files matching a base-name pattern
    #[arg(long)]
    project_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Error,
    Warning,
    Typesetting,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Error => Level::Error,
            LevelArg::Warning => Level::Warning,
            LevelArg::Typesetting => Level::Typesetting,
        }
    }
}

impl InputArgs {
    /// Options file first, then command line flags on top.
    fn parse_options(&self) -> anyhow::Result<ParseOptions> {
        let mut options = match &self.options {
            Some(path) => load_options(path)?,
            None => ParseOptions::default(),
        };
        if self.ignore_duplicates {
            options.ignore_duplicates = true;
        }
        if !self.base_names.is_empty() {
            options.file_base_names = self.base_names.clone();
        }
        Ok(options)
    }

    fn run(&self) -> anyhow::Result<ParseResult> {
        let options = self.parse_options()?;
        let content = read_log(&self.path)?;
        log::debug!("read {} bytes from {}", content.len(), self.path.display());

        let result = parse_latex_log(&content, &options);
        if !self.project_only {
            return Ok(result);
        }
        let matcher = options.compile_base_names()?;
        Ok(matcher.project_only(&result))
    }
}

fn load_options(path: &Path) -> anyhow::Result<ParseOptions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid options file {}", path.display()))
}

fn read_log(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read log from stdin")?;
        return Ok(String::from_utf8_lossy(&buf).into_owned());
    }
    // Logs may contain bytes in the engine's 8-bit output encoding.
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Parse { input, level } => {
            let result = input.run()?;
            let json = match level {
                Some(level) => serde_json::to_string_pretty(result.entries((*level).into()))?,
                None => serde_json::to_string_pretty(&result)?,
            };
            println!("{json}");
        }
        Commands::Summary { input } => {
            let result = input.run()?;
            print!("{}", report::render_summary(&result));
            if result.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
