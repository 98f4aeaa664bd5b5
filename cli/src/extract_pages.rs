//! extract-pages - print the text and tables of selected PDF pages as JSON

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use pdf_processor::render::{error_json, to_json, JsonFormat};
use pdf_processor::{extract_pages_from_file, Error, ExtractOptions, ExtractionRequest};

const USAGE: &str = "Usage: extract-pages <pdf_path> <page_numbers>";

#[derive(Parser)]
#[command(name = "extract-pages")]
#[command(version)]
#[command(about = "Extract text and tables from specific PDF pages as JSON", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "PDF_PATH")]
    pdf_path: PathBuf,

    /// Comma-separated 0-based page indices (e.g. "0,1,4,5")
    #[arg(value_name = "PAGE_NUMBERS", allow_hyphen_values = true)]
    page_numbers: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip table detection
    #[arg(long)]
    no_tables: bool,

    /// Arguments after the page list. Unknown ones are ignored.
    #[arg(hide = true, num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    extra: Vec<String>,
}

impl Cli {
    /// A flag given before the positionals, or after the page list where
    /// clap collects it as a trailing value.
    fn flag(&self, set: bool, name: &str) -> bool {
        set || self.extra.iter().any(|arg| arg == name)
    }
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            log::debug!("Argument error: {}", e);
            fail(&Error::Usage(USAGE.to_string()));
        }
    };

    if let Err(e) = run(cli) {
        fail(&e);
    }
}

fn run(cli: Cli) -> pdf_processor::Result<()> {
    let pretty = cli.flag(cli.pretty, "--pretty");
    let no_tables = cli.flag(cli.no_tables, "--no-tables");

    // The page list is validated before the file is touched.
    let request = ExtractionRequest::parse(cli.pdf_path, &cli.page_numbers)?;

    let options = ExtractOptions::new().with_tables(!no_tables);
    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    let report = extract_pages_from_file(&request, &options)?;
    println!("{}", to_json(&report, format)?);
    Ok(())
}

fn fail(err: &Error) -> ! {
    eprintln!("{}", error_json(err));
    process::exit(1);
}
