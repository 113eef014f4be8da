//! Command line interface and the annotation pipeline it drives.
//!
//! One run is one pass over one SVG file: parse it, reconcile the TOML
//! annotation table next to it, write the table back (backing up the old
//! one), inject the annotations into the tree, optionally append captions,
//! and write the annotated SVG (plus an HTML wrapper page on request).

use std::fs;

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;

use crate::caption;
use crate::config::{Config, load_config};
use crate::html;
use crate::parser;
use crate::reconcile;
use crate::rewrite;
use crate::store;
use crate::writer;

#[derive(Parser, Debug)]
#[command(
    name = "svgballoon",
    version,
    about = "Annotate SVG text labels with balloon tooltips and hyperlinks"
)]
pub struct Args {
    /// SVG file whose text labels should be annotated
    #[arg(value_name = "SVG_FILE")]
    pub svg_file: String,

    /// Output path (defaults to `<input>_with_balloons.svg`)
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Additionally write an HTML page embedding the annotated SVG
    #[arg(long)]
    pub html: bool,

    /// Caption line appended below the graphic (repeat for more lines)
    #[arg(long = "caption", value_name = "LINE")]
    pub caption: Vec<String>,

    /// Link caption appended after the last caption line: URL and display text
    #[arg(long = "caption-link", value_name = "VALUE", num_args = 1..)]
    pub caption_link: Option<Vec<String>>,

    /// TOML config file overriding the built-in defaults
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<String>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref().map(Utf8Path::new))?;
    let options = AnnotateOptions {
        output: args.output.map(Utf8PathBuf::from),
        write_html: args.html,
        caption_lines: args.caption,
        caption_link: args.caption_link,
    };
    annotate_file(Utf8Path::new(&args.svg_file), &options, &config)?;
    Ok(())
}

/// Everything one annotation run needs besides the input path and config.
#[derive(Debug, Clone, Default)]
pub struct AnnotateOptions {
    /// Where to write the annotated SVG; derived from the input when `None`.
    pub output: Option<Utf8PathBuf>,
    pub write_html: bool,
    pub caption_lines: Vec<String>,
    pub caption_link: Option<Vec<String>>,
}

/// What a run did, for logging and tests.
#[derive(Debug)]
pub struct RunSummary {
    pub labels: usize,
    pub records: usize,
    pub annotated: usize,
    pub table: Utf8PathBuf,
    pub output: Utf8PathBuf,
    pub html: Option<Utf8PathBuf>,
}

/// Run the full annotation pass for `input`.
pub fn annotate_file(
    input: &Utf8Path,
    options: &AnnotateOptions,
    config: &Config,
) -> Result<RunSummary> {
    let mut doc = parser::load_svg(input, config)?;

    let table_path = with_stem_suffix(input, "", "toml");
    let existing = store::load_table(&table_path)?;
    let records = reconcile::merge_records(existing, &doc.labels);

    let backup_path = with_stem_suffix(&table_path, &config.backup_suffix, "toml");
    match store::backup_table(&table_path, &backup_path) {
        Ok(true) => tracing::info!("backed up annotation table to {}", backup_path),
        Ok(false) => {}
        Err(err) => tracing::warn!("annotation table backup failed: {:#}", err),
    }
    if let Err(err) = store::save_table(&table_path, &records) {
        tracing::warn!("could not update annotation table: {:#}", err);
    }

    let annotated = rewrite::apply_annotations(&mut doc.root, &records, config);
    caption::append_caption(
        &mut doc.root,
        &options.caption_lines,
        options.caption_link.as_deref(),
        config,
    );

    let xml = writer::serialize_document(&doc.root, &doc.namespaces);
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| with_stem_suffix(input, &config.output_suffix, "svg"));

    // The SVG and HTML writes are reported independently; one failing does
    // not block the other.
    if let Err(err) = fs::write(&output, &xml) {
        tracing::error!("could not write {}: {}", output, err);
    } else {
        tracing::info!("wrote {}", output);
    }

    let mut html_path = None;
    if options.write_html {
        let path = output.with_extension("html");
        let page = html::wrap_svg(output.file_stem().unwrap_or("annotated"), &xml);
        if let Err(err) = fs::write(&path, page) {
            tracing::error!("could not write {}: {}", path, err);
        } else {
            tracing::info!("wrote {}", path);
            html_path = Some(path);
        }
    }

    Ok(RunSummary {
        labels: doc.labels.len(),
        records: records.len(),
        annotated,
        table: table_path,
        output,
        html: html_path,
    })
}

/// Derive a sibling path by appending `suffix` to the file stem and swapping
/// the extension: `map.svg` becomes `map_with_balloons.svg`, `map.toml`
/// becomes `map_old.toml`.
pub fn with_stem_suffix(path: &Utf8Path, suffix: &str, extension: &str) -> Utf8PathBuf {
    let stem = path.file_stem().unwrap_or("annotated");
    path.with_file_name(format!("{stem}{suffix}.{extension}"))
}
