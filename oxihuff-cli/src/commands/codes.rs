//! Codes command implementation.

use super::encode::load_weights;
use oxihuff::{CodeTable, CodecConfig, HuffmanCodec, Symbol, WeightTable};
use serde::Serialize;
use std::path::Path;

/// JSON output for one code.
#[derive(Debug, Serialize)]
pub struct CodeEntry {
    pub symbol: Symbol,
    pub label: String,
    pub weight: u64,
    pub length: u8,
    pub code: String,
}

/// JSON output for a code table.
#[derive(Debug, Serialize)]
pub struct CodesOutput {
    pub tie_break: String,
    pub leaf_count: usize,
    pub depth: u32,
    pub max_length: u8,
    pub encoded_bits: u64,
    pub codes: Vec<CodeEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
}

impl CodesOutput {
    pub fn new(codec: &HuffmanCodec, weights: &WeightTable, with_tree: bool) -> Self {
        let codes = codec.codes();
        Self {
            tie_break: format!("{:?}", codec.tree().tie_break()),
            leaf_count: codec.tree().leaf_count(),
            depth: codec.tree().depth(),
            max_length: codes.max_length(),
            encoded_bits: codes.encoded_bits(weights),
            codes: entries(codes, weights),
            tree: with_tree.then(|| codec.tree().render()),
        }
    }
}

fn entries(codes: &CodeTable, weights: &WeightTable) -> Vec<CodeEntry> {
    codes
        .iter()
        .map(|(symbol, code)| CodeEntry {
            symbol,
            label: symbol.to_string(),
            weight: weights.get(symbol),
            length: code.len(),
            code: code.to_string(),
        })
        .collect()
}

pub fn cmd_codes(
    weights_path: &Path,
    optimize: bool,
    json: bool,
    tree: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let weights = load_weights(weights_path)?;
    let codec = HuffmanCodec::new(&weights, CodecConfig::new(optimize))?;
    let report = CodesOutput::new(&codec, &weights, tree);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Weights: {} ({})", weights_path.display(), report.tie_break);
    println!();
    println!("{:>6} {:>8} {:>12} {:>4}  Code", "Index", "Symbol", "Weight", "Len");
    println!("{}", "-".repeat(48));
    for entry in &report.codes {
        println!(
            "{:>6} {:>8} {:>12} {:>4}  {}",
            entry.symbol.index(),
            entry.label,
            entry.weight,
            entry.length,
            entry.code
        );
    }
    println!("{}", "-".repeat(48));

    let total = weights.total();
    let average = if total > 0 {
        report.encoded_bits as f64 / total as f64
    } else {
        0.0
    };
    println!(
        "{} symbols, depth {}, longest code {} bits, {:.3} bits per symbol",
        report.leaf_count, report.depth, report.max_length, average
    );

    if let Some(dump) = &report.tree {
        println!();
        print!("{}", dump);
    }

    Ok(())
}
