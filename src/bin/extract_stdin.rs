//! Simple CLI that reads HTML from stdin and prints the extracted article.
//!
//! Output modes mirror the library surface: article HTML (default), plain
//! text, a JSON metadata record, or a readerability check that reports
//! through the exit status.

use std::io::{self, Read};
use std::process::ExitCode;

use rs_readerview::{extract_with_options, harvest_metadata, is_probably_readerable, Options};

const USAGE: &str = "usage: extract_stdin [--html|--text|--metadata|--check] [--base-url URL] [--template FIELDS]";

enum Mode {
    Html,
    Text,
    Metadata,
    Check,
}

fn main() -> ExitCode {
    let mut mode = Mode::Html;
    let mut options = Options::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--html" => mode = Mode::Html,
            "--text" => mode = Mode::Text,
            "--metadata" => mode = Mode::Metadata,
            "--check" => mode = Mode::Check,
            "--base-url" => options.base_url = args.next(),
            "--template" => options.template = args.next(),
            _ => {
                eprintln!("{USAGE}");
                return ExitCode::FAILURE;
            }
        }
    }

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("extract_stdin: failed to read from stdin");
        return ExitCode::FAILURE;
    }

    match mode {
        Mode::Check => {
            if is_probably_readerable(&html) {
                println!("readerable");
                ExitCode::SUCCESS
            } else {
                println!("not readerable");
                ExitCode::FAILURE
            }
        }
        Mode::Metadata => {
            let metadata = harvest_metadata(&html);
            match serde_json::to_string_pretty(&metadata) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("extract_stdin: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        Mode::Html | Mode::Text => match extract_with_options(&html, &options) {
            Ok(result) => {
                match mode {
                    Mode::Html => println!("{}", result.content_html),
                    _ => println!("{}", result.content_text),
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("extract_stdin: {err}");
                ExitCode::FAILURE
            }
        },
    }
}
