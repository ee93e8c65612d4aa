use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "serpentine";
const SCORE_FILE_NAME: &str = "best_scores.json";

/// Best score achieved per skill level 0–9, persisted between runs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScores {
    best: [u32; 10],
}

impl BestScores {
    /// Best score recorded for `skill`.
    #[must_use]
    pub fn for_skill(&self, skill: u8) -> u32 {
        self.best.get(usize::from(skill)).copied().unwrap_or(0)
    }

    /// Records `score` for `skill` if it beats the stored best.
    ///
    /// Returns `true` when a new best was set.
    pub fn record(&mut self, skill: u8, score: u32) -> bool {
        let Some(slot) = self.best.get_mut(usize::from(skill)) else {
            return false;
        };
        if score > *slot {
            *slot = score;
            return true;
        }
        false
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Loads best scores from disk; a missing file yields all zeros.
pub fn load_best_scores() -> io::Result<BestScores> {
    load_from_path(&scores_path())
}

/// Saves best scores to disk, creating parent directories when needed.
pub fn save_best_scores(scores: &BestScores) -> io::Result<()> {
    save_to_path(&scores_path(), scores)
}

fn load_from_path(path: &Path) -> io::Result<BestScores> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BestScores::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_to_path(path: &Path, scores: &BestScores) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(scores)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}
