use clap::{Arg, Command};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod report;
mod utils;

use report::{confirm_save, save_query, write_report, OUTPUT_FILE};
use utils::indicators::extract_hashes;
use utils::pdf::extract_text_from_pdf_file;
use utils::splunk_query::generate_splunk_query;

const USAGE: &str = "Usage: pdf-hash-query <file.pdf>";

fn main() {
    let matches = Command::new("pdf-hash-query")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract SHA-256 hashes from a PDF and build a Splunk query")
        .long_about(
            "Reads the text of every page in a PDF, collects 64-character hex\n\
            indicators (contiguous or written as byte pairs) and prints a Splunk\n\
            search matching any of them. The query can optionally be saved to\n\
            splunk_query.txt in the current directory.",
        )
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("PDF document to scan; any further arguments are ignored")
                .num_args(1..)
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    // Logs go to stderr so the report on stdout stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let Some(file_path) = matches
        .get_many::<PathBuf>("file")
        .and_then(|mut paths| paths.next())
    else {
        println!("{}", USAGE);
        return;
    };

    let full_text = match extract_text_from_pdf_file(file_path) {
        Ok(text) => text,
        Err(e) => {
            error!("Error extracting text from PDF: {}", e);
            process::exit(1);
        }
    };

    let hashes = extract_hashes(&full_text);
    let query = generate_splunk_query(&hashes);
    info!(indicators = hashes.len(), "Query generated");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let confirmed = write_report(&mut out, &full_text, &query, &hashes)
        .and_then(|_| confirm_save(&mut io::stdin().lock(), &mut out));

    match confirmed {
        Ok(true) => {
            if let Err(e) = save_query(Path::new(OUTPUT_FILE), &query) {
                error!("Failed to write to file: {:#}", e);
                process::exit(1);
            }
            println!("Query saved to {}", OUTPUT_FILE);
        }
        Ok(false) => {}
        Err(e) => {
            error!("Console I/O failed: {:#}", e);
            process::exit(1);
        }
    }
}
