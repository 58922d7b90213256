//! Définition et implémentation des commandes CLI
//!
//! Commandes:
//! - `to-grid`: point géographique → référence de grille
//! - `from-grid`: référence de grille → point géographique
//! - `convert`: conversion de datum directe
//! - `batch`: fichier de lignes `lat,lon` → références, en parallèle

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use clap::Subcommand;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use osgrid::{Datum, GeodeticPoint, OsGridRef};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a geographic point to a National Grid reference
    ToGrid {
        /// Latitude in degrees
        lat: f64,

        /// Longitude in degrees
        lon: f64,

        /// Source datum (wgs84, osgb36, ed50, irl1975, tokyojapan)
        #[arg(long, default_value = "wgs84")]
        datum: String,

        /// Digits of the formatted reference (even, 0-10; 10 = 1m resolution)
        #[arg(long, default_value_t = 10)]
        digits: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a National Grid reference to geographic coordinates
    FromGrid {
        /// Grid reference, e.g. "TQ 388 773" or "SU387148"
        gridref: String,

        /// Target datum (osgb36 or wgs84)
        #[arg(long, default_value = "wgs84")]
        datum: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a point between datums (via WGS84)
    Convert {
        /// Latitude in degrees
        lat: f64,

        /// Longitude in degrees
        lon: f64,

        /// Source datum
        #[arg(long)]
        from: String,

        /// Target datum
        #[arg(long)]
        to: String,

        /// Ellipsoidal height in metres
        #[arg(long, default_value_t = 0.0)]
        height: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a file of `lat,lon` lines to grid references in parallel
    Batch {
        /// Input file, one `lat,lon` pair per line
        input: PathBuf,

        /// Output file (stdout by default)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source datum of the input coordinates
        #[arg(long, default_value = "wgs84")]
        datum: String,

        /// Digits of the formatted references
        #[arg(long, default_value_t = 6)]
        digits: u32,

        /// Emit a JSON report instead of plain lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct GridOutput {
    datum: Datum,
    lat: f64,
    lon: f64,
    easting: i32,
    northing: i32,
    reference: String,
}

#[derive(Serialize)]
struct PointOutput {
    datum: Datum,
    lat: f64,
    lon: f64,
    height: f64,
}

#[derive(Serialize)]
struct BatchRecord {
    line: usize,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct BatchReport {
    total: usize,
    converted: usize,
    failed: usize,
    records: Vec<BatchRecord>,
}

/// Parse un nom de datum fourni par l'utilisateur
fn parse_datum(name: &str) -> Result<Datum> {
    Datum::from_str(name).with_context(|| format!("Invalid datum name '{}'", name))
}

/// Amène un point sur la grille nationale, en convertissant le datum si besoin
fn to_national_grid(point: &GeodeticPoint) -> Result<OsGridRef> {
    let osgb36 = if point.datum == Datum::Osgb36 {
        *point
    } else {
        point
            .convert_datum(Datum::Osgb36)
            .context("Datum conversion to OSGB36 failed")?
    };

    osgb36
        .to_grid()
        .context("National Grid projection failed")
}

/// Exécute la commande to-grid
pub fn cmd_to_grid(lat: f64, lon: f64, datum: &str, digits: u32, json: bool) -> Result<()> {
    let datum = parse_datum(datum)?;
    let point = GeodeticPoint::new(lat, lon, datum);

    let gridref = to_national_grid(&point)?;
    let reference = gridref
        .format(digits)
        .context("Grid reference formatting failed")?;

    if json {
        let output = GridOutput {
            datum,
            lat,
            lon,
            easting: gridref.easting,
            northing: gridref.northing,
            reference,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Easting:   {}", gridref.easting);
        println!("Northing:  {}", gridref.northing);
        println!("Reference: {}", reference);
    }

    Ok(())
}

/// Exécute la commande from-grid
pub fn cmd_from_grid(gridref: &str, datum: &str, json: bool) -> Result<()> {
    let target = parse_datum(datum)?;

    let parsed = OsGridRef::from_str(gridref)
        .with_context(|| format!("Invalid grid reference '{}'", gridref))?;
    let osgb36 = parsed
        .to_lat_lon()
        .context("National Grid inverse projection failed")?;

    let point = if target == Datum::Osgb36 {
        osgb36
    } else {
        // Toute cible autre que WGS84 fait surfacer l'erreur de routage
        osgb36
            .convert_datum(target)
            .with_context(|| format!("Datum conversion to {} failed", target))?
    };

    if json {
        let output = PointOutput {
            datum: point.datum,
            lat: point.lat,
            lon: point.lon,
            height: point.height,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Datum:     {}", point.datum);
        println!("Latitude:  {:.7}", point.lat);
        println!("Longitude: {:.7}", point.lon);
    }

    Ok(())
}

/// Exécute la commande convert
pub fn cmd_convert(
    lat: f64,
    lon: f64,
    from: &str,
    to: &str,
    height: f64,
    json: bool,
) -> Result<()> {
    let from = parse_datum(from)?;
    let to = parse_datum(to)?;

    let point = GeodeticPoint::with_height(lat, lon, height, from);
    let converted = point
        .convert_datum(to)
        .with_context(|| format!("Datum conversion {} -> {} failed", from, to))?;

    if json {
        let output = PointOutput {
            datum: converted.datum,
            lat: converted.lat,
            lon: converted.lon,
            height: converted.height,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Datum:     {}", converted.datum);
        println!("Latitude:  {:.7}", converted.lat);
        println!("Longitude: {:.7}", converted.lon);
        println!("Height:    {:.3}", converted.height);
    }

    Ok(())
}

/// Convertit une ligne `lat,lon` en référence de grille
fn convert_line(line: &str, datum: Datum, digits: u32) -> Result<String> {
    let (lat, lon) = line
        .split_once(',')
        .with_context(|| format!("Expected 'lat,lon', got '{}'", line))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude '{}'", lon.trim()))?;

    let gridref = to_national_grid(&GeodeticPoint::new(lat, lon, datum))?;
    Ok(gridref.format(digits)?)
}

/// Exécute la commande batch
pub fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    datum: &str,
    digits: u32,
    json: bool,
) -> Result<()> {
    let datum = parse_datum(datum)?;

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    info!(input = %input.display(), lines = lines.len(), "Starting batch conversion");

    let failures = AtomicUsize::new(0);

    // Chaque conversion est une fonction pure: parallélisation sans coordination
    let records: Vec<BatchRecord> = lines
        .par_iter()
        .map(|&(line_no, line)| match convert_line(line, datum, digits) {
            Ok(reference) => BatchRecord {
                line: line_no,
                input: line.to_string(),
                reference: Some(reference),
                error: None,
            },
            Err(e) => {
                warn!(line = line_no, "conversion failed: {:#}", e);
                failures.fetch_add(1, Ordering::Relaxed);
                BatchRecord {
                    line: line_no,
                    input: line.to_string(),
                    reference: None,
                    error: Some(format!("{:#}", e)),
                }
            }
        })
        .collect();

    let failed = failures.load(Ordering::Relaxed);
    let report = BatchReport {
        total: records.len(),
        converted: records.len() - failed,
        failed,
        records,
    };

    let rendered = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        report
            .records
            .iter()
            .map(|record| match (&record.reference, &record.error) {
                (Some(reference), _) => format!("{} -> {}", record.input, reference),
                (None, Some(error)) => format!("{} -> ERROR: {}", record.input, error),
                (None, None) => unreachable!("record has neither reference nor error"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    println!("=== Batch {} ===", input.display());
    println!("Converted: {}/{}", report.converted, report.total);
    if report.failed > 0 {
        println!("Failed: {}", report.failed);
    }

    Ok(())
}
