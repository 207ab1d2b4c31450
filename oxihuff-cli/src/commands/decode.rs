//! Decode command implementation.

use super::encode::load_weights;
use crate::utils::{check_input, check_output, create_progress_bar, wants_progress};
use oxihuff::{CodecConfig, DecodeSummary, HuffmanCodec};
use std::fs::File;
use std::path::Path;

/// Decode `input` into `output` with an already built codec.
pub fn decode_file(
    codec: &HuffmanCodec,
    input: &Path,
    output: &Path,
    quiet: bool,
) -> Result<DecodeSummary, Box<dyn std::error::Error>> {
    let len = check_input(input, "compressed")?;

    let pb = create_progress_bar(len, wants_progress(len, quiet));
    pb.set_message("decoding");
    let reader = pb.wrap_read(File::open(input)?);

    let summary = codec.decode(reader, File::create(output)?);
    pb.finish_and_clear();
    Ok(summary?)
}

pub fn cmd_decode(
    input: &Path,
    output: &Path,
    weights_path: &Path,
    optimize: bool,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_input(input, "compressed")?;
    let weights = load_weights(weights_path)?;
    let codec = HuffmanCodec::new(&weights, CodecConfig::new(optimize))?;

    check_output(output, force)?;
    let summary = decode_file(&codec, input, output, quiet)?;

    if !quiet {
        println!("Decoded: {} -> {}", input.display(), output.display());
        println!(
            "  {} bytes -> {} bytes",
            summary.input_bytes, summary.output_bytes
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxihuff::WeightTable;

    #[test]
    fn test_decode_requires_weight_file() {
        let dir = std::env::temp_dir().join(format!("oxihuff-decode-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let packed = dir.join("input.huf");
        std::fs::write(&packed, [0x00]).unwrap();

        let err = cmd_decode(
            &packed,
            &dir.join("out.txt"),
            &dir.join("none.txt"),
            false,
            true,
            true,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("weights file does not exist"), "{err}");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_decode_reports_corruption() {
        let dir = std::env::temp_dir().join(format!("oxihuff-decode-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let packed = dir.join("input.huf");
        let weights = dir.join("weights.txt");
        // 0xFF decodes as four 'c' and never reaches EOF.
        std::fs::write(&packed, [0xFF]).unwrap();
        std::fs::write(&weights, WeightTable::from_bytes(b"abcabc").to_string()).unwrap();

        let err =
            cmd_decode(&packed, &dir.join("out.txt"), &weights, false, true, true).unwrap_err();
        assert!(err.to_string().starts_with("Corrupt stream"), "{err}");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
