//! Shared utilities for CLI commands.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads the schedule text from a file, or from stdin when no path is given.
pub fn read_schedule(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schedule: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read schedule from stdin")?;
            Ok(text)
        }
    }
}

/// Converts a 1-based position typed by the user into an index.
pub fn position_to_index(position: usize, flag: &str) -> Result<usize> {
    position
        .checked_sub(1)
        .with_context(|| format!("--{flag} counts from 1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_schedule_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("schedule.txt");
        std::fs::write(&path, "A | B | C\n5m\n").unwrap();

        assert_eq!(read_schedule(Some(&path)).unwrap(), "A | B | C\n5m\n");
    }

    #[test]
    fn read_schedule_missing_file_names_path() {
        let err = read_schedule(Some(Path::new("/nonexistent/schedule.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/schedule.txt"));
    }

    #[test]
    fn position_to_index_is_one_based() {
        assert_eq!(position_to_index(1, "from").unwrap(), 0);
        assert_eq!(position_to_index(3, "to").unwrap(), 2);
        let err = position_to_index(0, "from").unwrap_err();
        assert_eq!(err.to_string(), "--from counts from 1");
    }
}
