use clap::{ArgEnum, Parser};
use rvtrace::{
    error::Error,
    logger::setup_logger,
    trace::{
        comparator::{ComparatorConfig, TraceComparator},
        divergence::DivergenceReport,
        trace_line::TraceFormat,
        trace_log::TraceLog,
    },
};
use std::{
    io::{BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

#[derive(Debug, Parser)]
#[clap(
    author,
    version,
    about = "Compare the retired PCs of a candidate trace against a reference trace.",
    long_about = None
)]
struct Args {
    #[clap(help = "Reference trace, PCs written as `0x<hex>` (e.g. spike.out).")]
    reference_path: PathBuf,
    #[clap(help = "Candidate trace, PCs written as bare hex (e.g. retire.out).")]
    candidate_path: PathBuf,
    #[clap(long, help = "Stop after the first divergence.")]
    stop_at_first_divergence: bool,
    #[clap(long, arg_enum, default_value = "text", help = "Report format.")]
    output: OutputFormat,
    #[clap(short, long, help = "Log debug information to stderr.")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ArgEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Trace(Error),
    #[error(transparent)]
    Io(std::io::Error),
    #[error(transparent)]
    Json(serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logger(if args.verbose { "debug" } else { "warn" });

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let reference = TraceLog::load(&args.reference_path, TraceFormat::Reference)?;
    let candidate = TraceLog::load(&args.candidate_path, TraceFormat::Candidate)?;

    let comparator = TraceComparator::new(ComparatorConfig {
        stop_at_first_divergence: args.stop_at_first_divergence,
    });
    let report = comparator
        .compare(&reference, &candidate)
        .map_err(Error::from)?;

    write_report(&report, args.output)
}

fn write_report(report: &DivergenceReport, format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match format {
        OutputFormat::Text => {
            for divergence in report {
                writeln!(out, "{}", divergence)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

impl From<Error> for CliError {
    fn from(value: Error) -> Self {
        Self::Trace(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
