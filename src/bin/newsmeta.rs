//! Command-line front end: reads one HTML page from a file or stdin and
//! prints the parsed article as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use newsmeta::{Error, Options, Pipeline};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsmeta", version, about = "Extract article metadata from news HTML")]
struct Args {
    /// Source URL of the page (used for date hints and diagnostics)
    #[arg(long)]
    url: String,

    /// HTML file to read; stdin when omitted
    file: Option<PathBuf>,

    /// Do not translate non-English articles
    #[arg(long)]
    no_translate: bool,

    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,
}

fn read_html(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut html = String::new();
            io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let html = match read_html(args.file.as_ref()) {
        Ok(html) => html,
        Err(err) => {
            eprintln!("Failed to read input: {err}");
            return ExitCode::FAILURE;
        }
    };

    let options = Options {
        translate: !args.no_translate,
        ..Options::default()
    };

    let result = Pipeline::new(options).and_then(|pipeline| pipeline.parse(&html, &args.url));
    match result {
        Ok(item) => match serde_json::to_string_pretty(&item) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Failed to serialize article: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err @ Error::DateNotFound { .. }) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
