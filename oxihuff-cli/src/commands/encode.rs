//! Encode command implementation.

use super::weights::{analyze, save};
use crate::utils::{check_input, check_output, create_progress_bar, format_ratio, wants_progress};
use oxihuff::{CodecConfig, EncodeSummary, HuffmanCodec, WeightTable};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{info, warn};

/// Read a persisted weight file.
pub fn load_weights(path: &Path) -> Result<WeightTable, Box<dyn std::error::Error>> {
    check_input(path, "weights")?;
    let weights = WeightTable::from_persisted(BufReader::new(File::open(path)?))?;
    info!(
        weights = %path.display(),
        distinct = weights.distinct_symbols(),
        "weights loaded"
    );
    Ok(weights)
}

/// Use the weight file if it has content, otherwise generate and save it.
fn resolve_weights(
    input: &Path,
    weights_path: &Path,
    quiet: bool,
) -> Result<WeightTable, Box<dyn std::error::Error>> {
    let usable = fs::metadata(weights_path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false);
    if usable {
        return load_weights(weights_path);
    }

    warn!(weights = %weights_path.display(), "weight file missing or empty, generating");
    let weights = analyze(input, quiet)?;
    save(&weights, weights_path, true)?;
    if !quiet {
        println!("Weights generated and saved to: {}", weights_path.display());
    }
    Ok(weights)
}

/// Encode `input` into `output` with an already built codec.
pub fn encode_file(
    codec: &HuffmanCodec,
    input: &Path,
    output: &Path,
    quiet: bool,
) -> Result<EncodeSummary, Box<dyn std::error::Error>> {
    let len = check_input(input, "input")?;

    let pb = create_progress_bar(len, wants_progress(len, quiet));
    pb.set_message("encoding");
    let reader = pb.wrap_read(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);

    let summary = codec.encode(reader, writer);
    pb.finish_and_clear();
    Ok(summary?)
}

pub fn cmd_encode(
    input: &Path,
    output: &Path,
    weights_path: &Path,
    optimize: bool,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_input(input, "input")?;
    let weights = resolve_weights(input, weights_path, quiet)?;
    let codec = HuffmanCodec::new(&weights, CodecConfig::new(optimize))?;

    check_output(output, force)?;
    let summary = encode_file(&codec, input, output, quiet)?;

    if !quiet {
        println!("Encoded: {} -> {}", input.display(), output.display());
        println!(
            "  {} bytes -> {} bytes ({})",
            summary.input_bytes,
            summary.output_bytes,
            format_ratio(summary.input_bytes, summary.output_bytes)
        );
        println!(
            "  {} code bits, {:.3} bits per character",
            summary.bits_written,
            summary.bits_written as f64 / summary.input_bytes.max(1) as f64
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::decode::decode_file;

    #[test]
    fn test_encode_generates_missing_weights() {
        let dir = std::env::temp_dir().join(format!("oxihuff-encode-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.txt");
        let packed = dir.join("input.huf");
        let restored = dir.join("restored.txt");
        let weights = dir.join("weights.txt");
        std::fs::write(&input, b"she sells sea shells by the sea shore\n").unwrap();

        cmd_encode(&input, &packed, &weights, true, true, true).unwrap();
        assert!(std::fs::metadata(&weights).unwrap().len() > 0);

        let codec =
            HuffmanCodec::new(&load_weights(&weights).unwrap(), CodecConfig::OPTIMIZED).unwrap();
        decode_file(&codec, &packed, &restored, true).unwrap();
        assert_eq!(
            std::fs::read(&restored).unwrap(),
            std::fs::read(&input).unwrap()
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_encode_rejects_uncovered_characters() {
        let dir = std::env::temp_dir().join(format!("oxihuff-encode-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.txt");
        let weights = dir.join("weights.txt");
        std::fs::write(&input, b"xyz").unwrap();
        std::fs::write(&weights, WeightTable::from_bytes(b"abc").to_string()).unwrap();

        let err =
            cmd_encode(&input, &dir.join("out.huf"), &weights, false, true, true).unwrap_err();
        assert!(err.to_string().contains("Unencodable symbol 120"), "{err}");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
