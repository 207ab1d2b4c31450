//! Weights command implementation.

use crate::utils::{check_input, check_output, create_progress_bar, wants_progress};
use oxihuff::{Symbol, WeightTable};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// JSON output for one symbol.
#[derive(Debug, Serialize)]
pub struct WeightEntry {
    pub symbol: Symbol,
    pub label: String,
    pub count: u64,
}

/// JSON output for a whole analysis.
#[derive(Debug, Serialize)]
pub struct WeightsOutput {
    pub input: String,
    pub total: u64,
    pub distinct_symbols: usize,
    /// Symbols with a nonzero count, in index order.
    pub weights: Vec<WeightEntry>,
}

impl WeightsOutput {
    pub fn new(input: &Path, weights: &WeightTable) -> Self {
        Self {
            input: input.display().to_string(),
            total: weights.total(),
            distinct_symbols: weights.distinct_symbols(),
            weights: weights
                .iter()
                .filter(|&(_, count)| count > 0)
                .map(|(symbol, count)| WeightEntry {
                    symbol,
                    label: symbol.to_string(),
                    count,
                })
                .collect(),
        }
    }
}

/// Count symbol frequencies of `path`.
pub fn analyze(path: &Path, quiet: bool) -> Result<WeightTable, Box<dyn std::error::Error>> {
    let len = check_input(path, "input")?;
    info!(input = %path.display(), bytes = len, "generating weights");

    let pb = create_progress_bar(len, wants_progress(len, quiet));
    pb.set_message("counting");
    let weights = WeightTable::from_source(pb.wrap_read(File::open(path)?))?;
    pb.finish_and_clear();

    Ok(weights)
}

/// Persist `weights` to `path`.
pub fn save(
    weights: &WeightTable,
    path: &Path,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_output(path, force)?;
    let mut writer = BufWriter::new(File::create(path)?);
    weights.to_persisted(&mut writer)?;
    writer.flush()?;
    info!(output = %path.display(), "weights saved");
    Ok(())
}

pub fn cmd_weights(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let weights = analyze(input, quiet || json)?;

    if json {
        let report = WeightsOutput::new(input, &weights);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Generating weights for: {}", input.display());
        print!("{}", weights.listing());
        println!(
            "{} characters, {} distinct symbols",
            weights.total(),
            weights.distinct_symbols()
        );
    }

    if let Some(path) = output {
        save(&weights, path, force)?;
        if !json {
            println!("Weights saved to: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_lists_nonzero_symbols() {
        let weights = WeightTable::from_bytes(b"aab");
        let report = WeightsOutput::new(Path::new("in.txt"), &weights);

        assert_eq!(report.total, 4);
        assert_eq!(report.distinct_symbols, 3);
        assert_eq!(report.weights.len(), 3);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["weights"][0]["symbol"], 97);
        assert_eq!(value["weights"][0]["count"], 2);
        assert_eq!(value["weights"][2]["symbol"], 128);
        assert_eq!(value["weights"][2]["label"], "EOF");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("oxihuff-weights-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.txt");
        let output = dir.join("weights.txt");
        std::fs::write(&input, b"mississippi").unwrap();

        let weights = analyze(&input, true).unwrap();
        save(&weights, &output, true).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(WeightTable::parse(&text).unwrap(), weights);
        assert!(text.contains("115,4,"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
