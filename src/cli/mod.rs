//! Command-line interface for adscan.
//!
//! Argument parsing uses clap's derive API. The one wrinkle is the
//! find(1)-style `-print0`/`-printn` flags: clap has no single-dash
//! long options, so argv is normalized to their double-dash forms
//! before parsing. Parsing goes through `try_parse_from` so usage
//! errors exit 1 while help and version exit 0.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use crate::classifier;
use crate::stream::{self, Delimiter, Tokens};

mod output;

pub use output::Reporter;

const AFTER_HELP: &str = "\
-print0 and -printn may also be spelled with a single dash, find(1) style.
With no PATH arguments, candidate paths are read from standard input.";

/// Report AppleDouble sidecar files among candidate paths
#[derive(Parser, Debug)]
#[command(
    name = "adscan",
    version = env!("CARGO_PKG_VERSION"),
    about = "Report AppleDouble sidecar files among candidate paths",
    disable_version_flag = true,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Print version information
    #[arg(
        short = 'v',
        long = "version",
        action = ArgAction::Version,
        value_parser = clap::value_parser!(bool)
    )]
    version: Option<bool>,

    /// Suppress error diagnostics
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Read NUL-delimited paths from standard input
    #[arg(short = '0', conflicts_with = "newline_input")]
    pub nul_input: bool,

    /// Read newline-delimited paths from standard input (default)
    #[arg(short = 'n')]
    pub newline_input: bool,

    /// Terminate reported paths with NUL
    #[arg(long = "print0", conflicts_with = "newline_output")]
    pub nul_output: bool,

    /// Terminate reported paths with newline (default)
    #[arg(long = "printn")]
    pub newline_output: bool,

    /// Candidate paths; standard input is ignored when any are given
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Rewrite the find(1)-style `-print0`/`-printn` spellings into the
/// double-dash forms clap understands. Tokens after the first `--` are
/// paths and left untouched.
pub fn normalize_args<I>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut escaped = false;
    argv.into_iter()
        .map(|arg| {
            if escaped {
                return arg;
            }
            if arg == "--" {
                escaped = true;
                arg
            } else if arg == "-print0" {
                OsString::from("--print0")
            } else if arg == "-printn" {
                OsString::from("--printn")
            } else {
                arg
            }
        })
        .collect()
}

/// Route log output to stderr so stdout stays a clean data channel.
pub fn setup_logging(quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

impl Cli {
    /// Parse process arguments, exiting 0 for help/version displays and
    /// 1 for configuration errors. No processing happens on either.
    pub fn parse_args() -> Self {
        match Self::try_parse_from(normalize_args(std::env::args_os())) {
            Ok(cli) => cli,
            Err(err) => {
                let code = match err.kind() {
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion => 0,
                    _ => 1,
                };
                let _ = err.print();
                std::process::exit(code);
            }
        }
    }

    fn input_delimiter(&self) -> Delimiter {
        if self.nul_input {
            Delimiter::Nul
        } else {
            Delimiter::Newline
        }
    }

    fn output_delimiter(&self) -> Delimiter {
        if self.nul_output {
            Delimiter::Nul
        } else {
            Delimiter::Newline
        }
    }

    /// Classify every candidate path and report positives on stdout.
    ///
    /// Paths are handled strictly sequentially: each one is classified
    /// and rendered in full before the next is pulled.
    pub fn run(&self) -> Result<()> {
        let reporter = Reporter::new(self.quiet);
        let stdout = io::stdout();
        let mut out = stdout.lock();

        if self.paths.is_empty() {
            tracing::debug!(delimiter = ?self.input_delimiter(), "reading paths from stdin");
            let stdin = io::stdin();
            self.run_stream(stdin.lock(), &mut out, &reporter)?;
        } else {
            tracing::debug!(count = self.paths.len(), "classifying argument paths");
            for path in &self.paths {
                self.process(path, &mut out, &reporter)?;
            }
        }

        out.flush().context("flushing report output")?;
        Ok(())
    }

    fn run_stream<R, W>(&self, input: R, out: &mut W, reporter: &Reporter) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for token in Tokens::new(input, self.input_delimiter()) {
            match token {
                Ok(token) => {
                    let path = stream::token_to_path(token);
                    self.process(&path, out, reporter)?;
                }
                Err(err) => {
                    // No more tokens can be produced, but a torn input
                    // stream does not fail the run as a whole.
                    reporter.stream_error(&err);
                    break;
                }
            }
        }
        Ok(())
    }

    fn process<W: Write>(&self, path: &Path, out: &mut W, reporter: &Reporter) -> Result<()> {
        let result = classifier::classify(path);
        if result.is_positive() {
            stream::write_token(out, &stream::path_to_token(path), self.output_delimiter())
                .context("writing report output")?;
        } else if let Some(err) = &result.error {
            reporter.path_error(path, err);
        }
        Ok(())
    }
}
