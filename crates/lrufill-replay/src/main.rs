//! lrufill-replay - replay a key trace through an LRU get-or-fetch cache

mod replay;
mod source;
mod trace;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::warn;

use crate::source::SyntheticSource;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 5)]
    capacity: usize,

    /// Read keys from a file, one per line ("-" for stdin)
    #[arg(short, long, conflicts_with = "keys")]
    trace: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Make the value source fail for this key
    #[arg(long)]
    fail_on: Option<String>,

    /// Log every request
    #[arg(short, long)]
    verbose: bool,

    /// Keys to request, in order
    keys: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for the report
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let keys = match &args.trace {
        Some(path) => trace::load(path)?,
        None => args.keys.clone(),
    };
    if keys.is_empty() {
        warn!("No keys to replay");
    }

    let source = SyntheticSource::new(args.fail_on.clone());
    let report = replay::run(args.capacity, &keys, source)?;

    match args.format {
        Format::Text => print!("{}", report.render_text()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["lrufill-replay", "a", "b"]).unwrap();
        assert_eq!(args.capacity, 5);
        assert_eq!(args.format, Format::Text);
        assert_eq!(args.keys, vec!["a", "b"]);
        assert!(args.trace.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_full() {
        let args = Args::try_parse_from([
            "lrufill-replay",
            "--capacity",
            "3",
            "--trace",
            "keys.txt",
            "--format",
            "json",
            "--fail-on",
            "k9",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.capacity, 3);
        assert_eq!(args.trace, Some(PathBuf::from("keys.txt")));
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.fail_on.as_deref(), Some("k9"));
        assert!(args.verbose);
    }

    #[test]
    fn test_trace_conflicts_with_keys() {
        let result = Args::try_parse_from(["lrufill-replay", "--trace", "keys.txt", "a"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_verify() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
