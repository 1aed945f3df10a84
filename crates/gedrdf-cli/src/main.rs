//! gedrdf CLI
//!
//! `gedrdf <INPUT> <OUTPUT>` converts between GEDCOM and RDF. The direction
//! follows the input extension:
//! - `.ged` → Turtle (N-Triples when OUTPUT ends in `.nt`)
//! - `.ttl`, `.nt`, `.rdf`, `.xml`, `.owl` → GEDCOM
//!
//! Mapping options come from `GEDRDF_DC_DATE` and `GEDRDF_INFER_PARENTAGE`;
//! log verbosity from `RUST_LOG` (default `warn`).

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use gedrdf_graph::RdfFormat;
use gedrdf_map::{gedcom_text_to_rdf, rdf_to_gedcom_text, MapOptions};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gedrdf")]
#[command(
    author,
    version,
    about = "Convert genealogy data between GEDCOM and RDF (FOAF/BIO)"
)]
struct Cli {
    /// Input file (`.ged`, `.ttl`, `.nt`, `.rdf`, `.xml`, `.owl`)
    input: PathBuf,
    /// Output file
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// GEDCOM in, RDF out.
    Forward(RdfFormat),
    /// RDF in, GEDCOM out.
    Reverse(RdfFormat),
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn direction(input: &Path, output: &Path) -> Result<Direction> {
    if has_extension(input, "ged") {
        return match RdfFormat::from_path(output) {
            Ok(RdfFormat::NTriples) => Ok(Direction::Forward(RdfFormat::NTriples)),
            Ok(RdfFormat::RdfXml) => bail!(
                "cannot write RDF/XML to {}: use .ttl or .nt",
                output.display()
            ),
            _ => Ok(Direction::Forward(RdfFormat::Turtle)),
        };
    }
    let format = RdfFormat::from_path(input).map_err(|_| {
        anyhow!(
            "cannot tell the direction from {}: expected .ged, .ttl, .nt, .rdf, .xml or .owl",
            input.display()
        )
    })?;
    Ok(Direction::Reverse(format))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// GEDCOM text from raw bytes; invalid UTF-8 becomes U+FFFD with a warning.
fn decode_gedcom<'a>(bytes: &'a [u8], input: &Path) -> Cow<'a, str> {
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        tracing::warn!(
            input = %input.display(),
            "input is not valid UTF-8; undecodable bytes were replaced with U+FFFD"
        );
    }
    text
}

fn cmd_convert(input: &Path, output: &Path) -> Result<()> {
    let direction = direction(input, output)?;
    let options = MapOptions::from_env();
    tracing::debug!(?direction, ?options, "starting conversion");

    println!(
        "{} {} -> {}",
        "Converting".green().bold(),
        input.display(),
        output.display()
    );

    let bytes = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let rendered = match direction {
        Direction::Forward(format) => {
            let text = decode_gedcom(&bytes, input);
            gedcom_text_to_rdf(&text, format, &options)
        }
        Direction::Reverse(format) => rdf_to_gedcom_text(&bytes, format, &options),
    }
    .with_context(|| format!("failed to convert {}", input.display()))?;

    fs::write(output, rendered)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("  {} {}", "wrote".green().bold(), output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    cmd_convert(&cli.input, &cli.output)
}
