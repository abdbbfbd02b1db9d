//! Best-score persistence
//!
//! A plain-text file holding one non-negative integer. Losing this data
//! is non-critical, so reads never fail: a missing or malformed file is
//! reported as "no recorded best" (0) and logged, never propagated.

use std::fs;
use std::io;
use std::path::Path;

/// Default location, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "data/best_score.txt";

/// Read the recorded best score. Absent file reads as 0; malformed
/// content also reads as 0 with a warning (the record is best-effort).
pub fn read_best(path: &Path) -> u64 {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return 0,
        Err(err) => {
            log::warn!("could not read best score {}: {err}", path.display());
            return 0;
        }
    };
    match contents.lines().next().unwrap_or("").trim().parse() {
        Ok(score) => score,
        Err(_) => {
            log::warn!(
                "best-score file {} is malformed, treating as 0",
                path.display()
            );
            0
        }
    }
}

/// Overwrite the record with the decimal string of `score`, creating the
/// parent directory if needed.
pub fn write_best(path: &Path, score: u64) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, score.to_string())
}
