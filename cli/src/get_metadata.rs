//! get-metadata - print page count, file size and first-page text of a PDF

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use pdf_processor::render::{to_json, JsonFormat};
use pdf_processor::{metadata_from_file, Error};

const USAGE: &str = "Usage: get-metadata <path_to_pdf>";

#[derive(Parser)]
#[command(name = "get-metadata")]
#[command(version)]
#[command(about = "Report page count, file size and first-page text of a PDF as JSON", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "PATH_TO_PDF")]
    pdf_path: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            log::debug!("Argument error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let format = if cli.pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    let result = metadata_from_file(&cli.pdf_path).and_then(|meta| to_json(&meta, format));
    match result {
        Ok(json) => println!("{}", json),
        Err(e @ Error::FileNotFound(_)) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error extracting metadata: {}", e);
            process::exit(1);
        }
    }
}
