use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use framegrade_core::io::image_io::{load_image, save_mask_png};
use framegrade_core::io::ser::SerReader;
use framegrade_core::quality::{
    evaluate, evaluate_streaming, uniformity, QualityReport, QualityThresholds,
};

use super::info::is_ser;
use crate::summary;

#[derive(Args)]
pub struct CheckArgs {
    /// Image or SER video files to evaluate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Thresholds file (TOML); individual flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Darkness bound on normalized mean brightness
    #[arg(long)]
    pub dark: Option<f32>,

    /// Brightness bound on normalized mean brightness
    #[arg(long)]
    pub bright: Option<f32>,

    /// Lower hysteresis bound of the edge detector
    #[arg(long)]
    pub edge_low: Option<f32>,

    /// Upper hysteresis bound of the edge detector
    #[arg(long)]
    pub edge_high: Option<f32>,

    /// Minimum edge density for a non-uniform frame
    #[arg(long)]
    pub uniform: Option<f32>,

    /// Minimum Laplacian variance for a sharp frame
    #[arg(long)]
    pub blur: Option<f64>,

    /// Maximum acceptable noise sigma
    #[arg(long)]
    pub noise: Option<f64>,

    /// Write per-frame results as CSV
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write edge masks as PNGs into this directory
    #[arg(long)]
    pub dump_edges: Option<PathBuf>,

    /// Suppress the per-frame table
    #[arg(short, long)]
    pub quiet: bool,
}

struct ReportRow {
    source: String,
    report: QualityReport,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let thresholds = resolve_thresholds(args)?;

    if let Some(ref dir) = args.dump_edges {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut rows: Vec<ReportRow> = Vec::new();
    for path in &args.files {
        if is_ser(path) {
            check_ser(path, &thresholds, args.dump_edges.as_deref(), &mut rows)?;
        } else {
            check_image(path, &thresholds, args.dump_edges.as_deref(), &mut rows)?;
        }
    }

    if !args.quiet {
        print_table(&rows);
    }
    summary::print_summary(&thresholds, rows.iter().map(|row| &row.report));

    if let Some(ref path) = args.report {
        write_csv(path, &rows)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn resolve_thresholds(args: &CheckArgs) -> Result<QualityThresholds> {
    let mut thresholds = match args.config {
        Some(ref path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read thresholds {}", path.display()))?;
            toml::from_str(&contents).context("Invalid thresholds file")?
        }
        None => QualityThresholds::default(),
    };

    if let Some(v) = args.dark {
        thresholds.dark = v;
    }
    if let Some(v) = args.bright {
        thresholds.bright = v;
    }
    if let Some(v) = args.edge_low {
        thresholds.edge_low = v;
    }
    if let Some(v) = args.edge_high {
        thresholds.edge_high = v;
    }
    if let Some(v) = args.uniform {
        thresholds.uniform = v;
    }
    if let Some(v) = args.blur {
        thresholds.blur = v;
    }
    if let Some(v) = args.noise {
        thresholds.noise = v;
    }

    Ok(thresholds)
}

fn check_image(
    path: &Path,
    thresholds: &QualityThresholds,
    dump_edges: Option<&Path>,
    rows: &mut Vec<ReportRow>,
) -> Result<()> {
    let frame =
        load_image(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let report = evaluate(&frame, thresholds)?;

    if let Some(dir) = dump_edges {
        let mask =
            uniformity::edge_mask(&frame.luma(), thresholds.edge_low, thresholds.edge_high);
        save_mask_png(&mask, &dir.join(format!("{}_edges.png", file_stem(path))))?;
    }

    rows.push(ReportRow {
        source: file_label(path),
        report,
    });
    Ok(())
}

fn check_ser(
    path: &Path,
    thresholds: &QualityThresholds,
    dump_edges: Option<&Path>,
    rows: &mut Vec<ReportRow>,
) -> Result<()> {
    let reader = SerReader::open(path)?;
    let total = reader.frame_count();
    let label = file_label(path);

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message(format!("Evaluating {label}"));

    let on_progress = |done: usize| pb.set_position(done as u64);
    let reports = evaluate_streaming(&reader, thresholds, Some(&on_progress))?;
    pb.finish_and_clear();

    if let Some(dir) = dump_edges {
        let stem = file_stem(path);
        for frame in reader.frames() {
            let frame = frame?;
            let index = frame.metadata().frame_index;
            let mask =
                uniformity::edge_mask(&frame.luma(), thresholds.edge_low, thresholds.edge_high);
            save_mask_png(&mask, &dir.join(format!("{stem}_{index:05}_edges.png")))?;
        }
    }

    for (index, report) in reports {
        rows.push(ReportRow {
            source: format!("{label}#{index}"),
            report,
        });
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("?")
        .to_string()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("frame")
        .to_string()
}

fn print_table(rows: &[ReportRow]) {
    if rows.is_empty() {
        return;
    }

    println!();
    println!(
        "{:<28}  {:>7}  {:>7}  {:>10}  {:>7}  {}",
        "Source", "Bright", "Edges", "LapVar", "Sigma", "Verdict"
    );
    println!("{}", "-".repeat(80));

    for row in rows {
        let r = &row.report;
        println!(
            "{:<28}  {:>7.3}  {:>7.3}  {:>10.1}  {:>7.1}  {}",
            row.source,
            r.brightness,
            r.edge_density,
            r.laplacian_variance,
            r.noise_sigma,
            r.verdict
        );
    }
}

fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut csv =
        String::from("source,verdict,brightness,edge_density,laplacian_variance,noise_sigma\n");
    for row in rows {
        let r = &row.report;
        csv.push_str(&format!(
            "{},{},{:.6},{:.6},{:.6},{:.6}\n",
            row.source,
            r.verdict,
            r.brightness,
            r.edge_density,
            r.laplacian_variance,
            r.noise_sigma
        ));
    }
    std::fs::write(path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(rows = rows.len(), "CSV report written");
    Ok(())
}
