// Player CSV loading and normalization.
//
// League exports are plain comma-separated text: one header line, then one
// row per player. There is no quoting or escaping, short rows are padded with
// empty strings, and every value is trimmed.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::record::{PlayerRecord, NAME_COLUMNS};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read player file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("player CSV has no header row")]
    MissingHeader,
}

// ---------------------------------------------------------------------------
// Reader-based parser
// ---------------------------------------------------------------------------

fn parse_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    // Fields are decoded lossily: a mis-encoded byte (a Latin-1 export, say)
    // becomes U+FFFD instead of failing the whole file.
    let headers: Vec<String> = reader.byte_headers()?.iter().map(lossy).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }
    if !NAME_COLUMNS.iter().any(|c| headers.iter().any(|h| h == c)) {
        warn!(
            "player CSV has no {} column; every row will have an empty key",
            NAME_COLUMNS.join("/")
        );
    }

    let mut records = Vec::new();
    for (line, result) in reader.byte_records().enumerate() {
        let row: Vec<String> = result?.iter().map(lossy).collect();
        if row.iter().all(String::is_empty) {
            debug!("skipping blank row {}", line + 2);
            continue;
        }
        // Zip positionally; missing trailing columns become "", surplus
        // trailing columns are dropped.
        let columns: BTreeMap<String, String> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), row.get(i).cloned().unwrap_or_default()))
            .collect();
        records.push(PlayerRecord::from_columns(columns));
    }

    Ok(records)
}

fn lossy(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Normalize already-read CSV text into player records.
pub fn parse_players(text: &str) -> Result<Vec<PlayerRecord>, LoadError> {
    parse_players_from_reader(text.as_bytes())
}

/// Normalize raw file bytes, which need not be valid UTF-8.
pub fn parse_player_bytes(bytes: &[u8]) -> Result<Vec<PlayerRecord>, LoadError> {
    parse_players_from_reader(bytes)
}

/// Read and normalize a player CSV from disk.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records = parse_players_from_reader(file)?;
    info!("Loaded {} player rows from {}", records.len(), path.display());
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
