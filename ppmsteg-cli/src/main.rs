//! ppmsteg CLI - Hide text in the red channel of PPM images.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod exit_codes;
mod utils;

use config::Config;
use exit_codes::ExitCode;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  64  Usage error (invalid arguments)
  65  Data error (malformed image, message does not fit, size mismatch)
  66  Input file missing or unreadable
  74  Output could not be written

Environment:
  PPMSTEG_MAX_PIXELS  Largest accepted image in pixels
  PPMSTEG_SEED        Fixed encoder seed when --seed is absent
  RUST_LOG            Log filter (logs go to stderr)";

#[derive(Parser)]
#[command(name = "ppmsteg")]
#[command(author, version, about = "Hide text in the red channel of PPM images", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress prompts and decorative output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// When to use colored output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Output format for reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an image and print it back as P3 text
    #[command(visible_alias = "t")]
    Test {
        /// Path to a P3 or P6 image
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },

    /// Hide a message in an image and print the result as P3 text
    #[command(visible_alias = "e")]
    Encode {
        /// Path to the carrier image
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Message to hide (prompted for on stdin when omitted)
        #[arg(short, long)]
        message: Option<String>,

        /// Seed for pixel selection (reproducible output)
        #[arg(long)]
        seed: Option<u64>,

        /// Write the encoded image here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Recover a message by comparing an encoded image with its original
    #[command(visible_alias = "d")]
    Decode {
        /// Path to the original image
        #[arg(value_name = "ORIGINAL")]
        original: PathBuf,

        /// Path to the image holding the message
        #[arg(value_name = "MODIFIED")]
        modified: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show an image's header and message capacity
    #[command(visible_alias = "i")]
    Info {
        /// Path to a P3 or P6 image
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn init_tracing(verbose: bool, ansi: bool) {
    let filter = if verbose {
        EnvFilter::new("ppmsteg_cli=debug,ppmsteg_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .init();
}

fn apply_color_choice(choice: ColorChoice) -> bool {
    let enabled = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
    enabled
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Test { image } => commands::roundtrip::execute(image, &config),
        Commands::Encode {
            image,
            message,
            seed,
            output,
        } => commands::encode::execute(image, message, seed, output, &config, quiet),
        Commands::Decode {
            original,
            modified,
            format,
        } => commands::decode::execute(original, modified, format, &config, quiet),
        Commands::Info { image, format } => commands::info::execute(image, format, &config),
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported as "errors" that go to stdout
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    let color = apply_color_choice(cli.color);
    init_tracing(cli.verbose, color && std::io::stderr().is_terminal());

    if let Err(err) = run(cli) {
        let exit = ExitCode::from_anyhow(&err);
        if let Some(message) = &exit.message {
            eprintln!("{} {}", "error:".red().bold(), message);
        }
        process::exit(exit.code);
    }
}
