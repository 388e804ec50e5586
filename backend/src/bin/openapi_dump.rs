//! Print the OpenAPI document as JSON, or write it to a file.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use shipment_tracker::ApiDoc;
use utoipa::OpenApi;

/// Export the REST API description for client generators.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", version)]
struct Cli {
    /// Destination file; stdout when omitted.
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,
}

fn write_to(path: &Utf8Path, document: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("output path {path} has no file name"))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("open output directory {parent}"))?;
    dir.write(file_name, document)
        .wrap_err_with(|| format!("write {path}"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let document = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialise OpenAPI document")?;

    match cli.output {
        Some(path) => write_to(&path, &document),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{document}").wrap_err("write OpenAPI document to stdout")
        }
    }
}
