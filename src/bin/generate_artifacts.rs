//! Writes a sample feature schema plus linear and ridge model artifacts so the
//! dashboard can start without a training run.
//!
//! Usage: `generate_artifacts [OUTPUT_DIR]` (defaults to `artifacts`)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

/// Canonical column order, as the training side writes it.
const COLUMNS: [&str; 14] = [
    "Global_reactive_power",
    "Voltage",
    "Global_intensity",
    "Sub_metering_1",
    "Sub_metering_2",
    "Sub_metering_3",
    "Year",
    "Month",
    "Day",
    "Hour",
    "Minute",
    "Is_holiday",
    "Light",
    "Weekday",
];

/// Active power is roughly voltage × intensity, so intensity dominates; the
/// calendar terms only nudge the estimate.
const LINEAR: [f64; 14] = [
    0.052, 0.0011, 0.2361, 0.0009, 0.0007, 0.0012, -0.0004, 0.0021, 0.0001, 0.0017, 0.0, 0.0085,
    -0.0093, 0.0026,
];
const LINEAR_INTERCEPT: f64 = 0.5071;

/// Same fit with an L2 penalty: coefficients pulled toward zero.
const RIDGE: [f64; 14] = [
    0.047, 0.0010, 0.2349, 0.0009, 0.0007, 0.0012, -0.0003, 0.0019, 0.0001, 0.0016, 0.0, 0.0071,
    -0.0080, 0.0023,
];
const RIDGE_INTERCEPT: f64 = 0.3614;

fn write_json(dir: &Path, file: &str, value: &serde_json::Value) -> Result<()> {
    let path = dir.join(file);
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;

    write_json(
        &out,
        "feature_names.json",
        &json!({
            "name": "household-power",
            "version": 1,
            "columns": COLUMNS,
        }),
    )?;

    write_json(
        &out,
        "linear_model.json",
        &json!({
            "kind": "linear",
            "coefficients": LINEAR,
            "intercept": LINEAR_INTERCEPT,
            "feature_names": COLUMNS,
        }),
    )?;

    write_json(
        &out,
        "ridge_model.json",
        &json!({
            "kind": "ridge",
            "coefficients": RIDGE,
            "intercept": RIDGE_INTERCEPT,
            "feature_names": COLUMNS,
            "alpha": 1.0,
        }),
    )?;

    Ok(())
}
