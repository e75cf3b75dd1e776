//! Command-line interface for the UDF parser.
//!
//! This binary converts `.udf` sensor logs to CSV, auto-detecting the
//! sibling label-info and board configuration documents.

use anyhow::Result;
use clap::Parser;
use log::{info, warn, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use udf_parser::{labels, CsvWriter, LabelTable, UdfReaderBuilder};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert .udf sensor logs to CSV",
    long_about = "Parses Unit Definition Files (.udf) — binary sensor records behind an ASCII \
                  metadata header — and writes analysis-ready CSV.\n\n\
                  Sibling .bmelabelinfo and BoardConfiguration.bmeconfig files are picked up \
                  automatically when present."
)]
struct Args {
    /// Directory containing .udf files
    #[arg(value_name = "IN_DIR")]
    in_dir: String,

    /// Output directory for converted CSV files
    #[arg(short, long, value_name = "OUT_DIR")]
    out_dir: String,
}

/// Find the label-info sibling for a UDF file by file stem.
fn find_labelinfo(udf_path: &Path) -> Option<PathBuf> {
    let stem = udf_path.file_stem()?.to_str()?;
    let dir = udf_path.parent()?;
    ["bmelabelinfo", "labelinfo"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|p| p.exists())
}

/// Find the board configuration in the UDF's directory or its parent.
fn find_board_config(udf_path: &Path) -> Option<PathBuf> {
    let dir = udf_path.parent()?;
    [dir.join("BoardConfiguration.bmeconfig")]
        .into_iter()
        .chain(dir.parent().map(|p| p.join("BoardConfiguration.bmeconfig")))
        .find(|p| p.exists())
}

fn load_labels(udf_path: &Path) -> LabelTable {
    match find_labelinfo(udf_path) {
        Some(path) => match fs::read_to_string(&path).map_err(anyhow::Error::from).and_then(|json| {
            LabelTable::from_json(&json).map_err(anyhow::Error::from)
        }) {
            Ok(table) => {
                info!("   ├─ Labels: {} entries from {}", table.len(), path.display());
                table
            }
            Err(e) => {
                warn!("   ├─ Could not load {}: {}", path.display(), e);
                LabelTable::empty()
            }
        },
        None => {
            warn!("   ├─ No label-info sibling found for {}", udf_path.display());
            LabelTable::empty()
        }
    }
}

fn convert_one_file(input_file: &Path, output_file: &Path) -> Result<()> {
    info!("📄 Processing: {}", input_file.display());

    let start_time = Instant::now();

    if let Some(config_path) = find_board_config(input_file) {
        let config = labels::parse_board_config(&fs::read_to_string(&config_path)?)?;
        if let Some(board_type) = config.header.board_type {
            info!("   ├─ Board: {}", board_type);
        }
    }

    let table = load_labels(input_file);
    let reader = UdfReaderBuilder::new().labels(table).from_file(input_file)?;

    info!("   ├─ Version: {}", reader.version()?);
    info!(
        "   ├─ Header declares {} fields",
        reader.field_definitions()?.len()
    );

    let t0 = Instant::now();
    let (records, summary) = reader.read_all_with_summary()?;
    info!("   ├─ {} in {:.2?}", summary.summary(), t0.elapsed());

    let stats = CsvWriter::new(output_file).write_with_stats(&records)?;
    info!("   ├─ {}", stats.summary());
    info!("   └─ ✓ Total time: {:.2?}\n", start_time.elapsed());

    Ok(())
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let in_path = Path::new(&args.in_dir);
    let out_path = Path::new(&args.out_dir);

    if !in_path.is_dir() {
        anyhow::bail!("'{}' is not a valid directory", args.in_dir);
    }

    // Find all .udf files
    let udf_files: Vec<_> = fs::read_dir(in_path)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("udf"))
        .collect();

    if udf_files.is_empty() {
        info!("No .udf files found in {}", args.in_dir);
        return Ok(());
    }

    fs::create_dir_all(out_path)?;

    info!("");
    info!("📂 Found {} .udf file(s) in {}", udf_files.len(), args.in_dir);
    info!("📁 Output directory: {}", args.out_dir);
    info!("");

    let total_start = Instant::now();

    for (idx, entry) in udf_files.iter().enumerate() {
        let input_file = entry.path();
        let file_stem = input_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        info!("[{}/{}]", idx + 1, udf_files.len());

        let output_file = out_path.join(format!("{}.csv", file_stem));

        if let Err(e) = convert_one_file(&input_file, &output_file) {
            log::error!("   └─ ✗ Error: {}", e);
            log::error!("");
            continue;
        }
    }

    info!("🏁 All files processed in {:.2?}", total_start.elapsed());
    info!("");

    Ok(())
}
