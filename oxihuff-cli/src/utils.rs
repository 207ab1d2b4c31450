//! Utility functions for the CLI.

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Inputs smaller than this are streamed without a progress bar.
const PROGRESS_THRESHOLD: u64 = 1 << 20;

/// Problems with a file named on the command line.
#[derive(Debug, Error)]
pub enum FileError {
    /// No name given.
    #[error("{role} file name is empty")]
    EmptyName { role: &'static str },

    /// The file does not exist.
    #[error("{role} file does not exist: {}", .path.display())]
    Missing { role: &'static str, path: PathBuf },

    /// The path names a directory or other non-regular file.
    #[error("{role} file is not a regular file: {}", .path.display())]
    NotAFile { role: &'static str, path: PathBuf },

    /// The file exists but holds no data.
    #[error("{role} file is empty: {}", .path.display())]
    Empty { role: &'static str, path: PathBuf },

    /// The file cannot be opened for reading.
    #[error("cannot read {role} file {}: {source}", .path.display())]
    Unreadable {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file cannot be created or replaced.
    #[error("output file is not writable: {}", .path.display())]
    NotWritable { path: PathBuf },

    /// The user declined to replace an existing file.
    #[error("not overwriting existing file: {}", .path.display())]
    Declined { path: PathBuf },
}

/// Check that `path` names a readable, non-empty file and return its size.
pub fn check_input(path: &Path, role: &'static str) -> Result<u64, FileError> {
    if path.as_os_str().is_empty() {
        return Err(FileError::EmptyName { role });
    }

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FileError::Missing {
                role,
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(FileError::Unreadable {
                role,
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_file() {
        return Err(FileError::NotAFile {
            role,
            path: path.to_path_buf(),
        });
    }
    if metadata.len() == 0 {
        return Err(FileError::Empty {
            role,
            path: path.to_path_buf(),
        });
    }

    File::open(path).map_err(|source| FileError::Unreadable {
        role,
        path: path.to_path_buf(),
        source,
    })?;

    Ok(metadata.len())
}

/// Check that `path` can be written, asking before replacing an existing file.
pub fn check_output(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.as_os_str().is_empty() {
        return Err(FileError::EmptyName { role: "output" }.into());
    }

    let not_writable = || FileError::NotWritable {
        path: path.to_path_buf(),
    };

    if path
        .parent()
        .is_some_and(|p| !p.as_os_str().is_empty() && !p.is_dir())
    {
        return Err(not_writable().into());
    }

    match fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_file() || metadata.permissions().readonly() {
                return Err(not_writable().into());
            }
            if !force && !confirm_overwrite(path)? {
                return Err(FileError::Declined {
                    path: path.to_path_buf(),
                }
                .into());
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(_) => Err(not_writable().into()),
    }
}

fn confirm_overwrite(path: &Path) -> Result<bool, dialoguer::Error> {
    Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
}

/// Whether a file `len` bytes long is worth a progress bar.
pub fn wants_progress(len: u64, quiet: bool) -> bool {
    !quiet && len >= PROGRESS_THRESHOLD
}

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Install the global tracing subscriber.
pub fn init_logging(log_level: &str, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install logger: {}", e);
    }
}

/// Format a compressed/original size pair as a percentage.
pub fn format_ratio(original: u64, compressed: u64) -> String {
    if original == 0 {
        "-".to_string()
    } else {
        format!("{:.1}%", compressed as f64 / original as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("oxihuff-cli-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_check_input_errors() {
        let dir = scratch_dir("input");

        assert!(matches!(
            check_input(Path::new(""), "input"),
            Err(FileError::EmptyName { .. })
        ));
        assert!(matches!(
            check_input(&dir.join("missing.txt"), "input"),
            Err(FileError::Missing { .. })
        ));
        assert!(matches!(
            check_input(&dir, "input"),
            Err(FileError::NotAFile { .. })
        ));

        let empty = dir.join("empty.txt");
        fs::write(&empty, b"").unwrap();
        assert!(matches!(
            check_input(&empty, "input"),
            Err(FileError::Empty { .. })
        ));

        let full = dir.join("full.txt");
        fs::write(&full, b"hello").unwrap();
        assert_eq!(check_input(&full, "input").unwrap(), 5);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_check_output() {
        let dir = scratch_dir("output");

        check_output(&dir.join("new.huf"), false).unwrap();

        let existing = dir.join("existing.huf");
        fs::write(&existing, b"x").unwrap();
        check_output(&existing, true).unwrap();

        assert!(check_output(&dir.join("no/such/dir/out.huf"), true).is_err());
        assert!(check_output(Path::new(""), true).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let path = PathBuf::from("data.txt");
        let messages = [
            FileError::EmptyName { role: "input" }.to_string(),
            FileError::Missing {
                role: "input",
                path: path.clone(),
            }
            .to_string(),
            FileError::Empty {
                role: "input",
                path: path.clone(),
            }
            .to_string(),
            FileError::NotWritable { path }.to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(messages[1], "input file does not exist: data.txt");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0, 0), "-");
        assert_eq!(format_ratio(200, 50), "25.0%");
    }
}
