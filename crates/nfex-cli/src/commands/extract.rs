//! Extract command - process NF-e XML files into a tabular report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use nfex_core::models::batch::ExtractionBatch;
use nfex_core::models::invoice::COLUMNS;
use nfex_core::report::{self, DEFAULT_XLSX_NAME};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input XML files or glob patterns
    #[arg(required = true)]
    input: Vec<String>,

    /// Output file (default: extracao_notas_fiscais.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: OutputFormat,

    /// Only print the table, skip writing the report file
    #[arg(long)]
    no_export: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Excel spreadsheet
    Xlsx,
    /// CSV table
    Csv,
    /// JSON records
    Json,
}

pub fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let files = collect_files(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching XML files found");
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut batch = ExtractionBatch::new();
    for path in &files {
        process_file(path, &mut batch);
        pb.inc(1);
    }
    pb.finish_and_clear();

    if !batch.records.is_empty() {
        print_table(&batch);
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    println!(
        "   {} extracted, {} failed",
        style(batch.records.len()).green(),
        style(batch.failures.len()).red()
    );

    if !batch.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for name in &batch.failures {
            println!("  - {}", name);
        }
    }

    if !args.no_export && !batch.records.is_empty() {
        let path = output_path(&args);
        match args.format {
            OutputFormat::Xlsx => report::write_xlsx(&batch, &path)?,
            OutputFormat::Csv => fs::write(&path, report::to_csv(&batch)?)?,
            OutputFormat::Json => fs::write(&path, report::to_json(&batch)?)?,
        }
        println!(
            "{} Report written to {}",
            style("✓").green(),
            path.display()
        );
    }

    Ok(())
}

/// Expand patterns and keep only XML files.
fn collect_files(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let matched = glob(pattern)?
            .filter_map(|entry| entry.ok())
            .filter(|path| {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                ext.eq_ignore_ascii_case("xml")
            });
        files.extend(matched);
    }
    Ok(files)
}

fn process_file(path: &Path, batch: &mut ExtractionBatch) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match fs::read(path) {
        Ok(bytes) => nfex_core::process_input(batch, name, &bytes),
        Err(err) => {
            warn!("failed to read {}: {}", path.display(), err);
            batch.push_failure(name);
        }
    }
}

fn output_path(args: &ExtractArgs) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }
    let default = match args.format {
        OutputFormat::Xlsx => DEFAULT_XLSX_NAME.to_string(),
        OutputFormat::Csv => format!("{}.csv", report_stem()),
        OutputFormat::Json => format!("{}.json", report_stem()),
    };
    debug!("no output path given, defaulting to {}", default);
    PathBuf::from(default)
}

fn report_stem() -> &'static str {
    DEFAULT_XLSX_NAME.trim_end_matches(".xlsx")
}

fn print_table(batch: &ExtractionBatch) {
    let rows: Vec<[String; 7]> = batch.records.iter().map(|r| r.row()).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    println!();
    println!("{}", style("Extracted records").green().bold());
    print_row(&COLUMNS.map(String::from), &widths);
    for row in &rows {
        print_row(row, &widths);
    }
}

fn print_row(cells: &[String; 7], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    println!("  {}", line.join("  ").trim_end());
}
