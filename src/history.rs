//! Match history log
//!
//! A bounded, chronological log of completed rounds, persisted as plain
//! text: one `YYYY-MM-DD HH:MM:SS <score>` line per record. The file is
//! rewritten in full on each save; the capacity is small enough that the
//! full rewrite stays cheap.

use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::HISTORY_CAPACITY;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub finished_at: NaiveDateTime,
    pub score: i64,
}

impl MatchRecord {
    pub fn to_line(&self) -> String {
        format!("{} {}", self.finished_at.format(TIMESTAMP_FORMAT), self.score)
    }

    /// Parse one history line. The timestamp itself contains a space, so the
    /// score is the final whitespace-separated token.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches('\r').trim();
        let (stamp, score) = line.rsplit_once(char::is_whitespace)?;
        Some(Self {
            finished_at: NaiveDateTime::parse_from_str(stamp.trim(), TIMESTAMP_FORMAT).ok()?,
            score: score.parse().ok()?,
        })
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to access history file: {0}")]
    Io(#[from] std::io::Error),
}

/// Bounded ordered log of match records, oldest first internally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchHistory {
    records: VecDeque<MatchRecord>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record, evicting the oldest when capacity is exceeded.
    pub fn push(&mut self, record: MatchRecord) {
        self.records.push_back(record);
        while self.records.len() > HISTORY_CAPACITY {
            self.records.pop_front();
        }
    }

    /// Records in chronological order (oldest first).
    pub fn records(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter()
    }

    /// Records in display order per the sort toggle.
    pub fn sorted(&self, newest_first: bool) -> Vec<&MatchRecord> {
        let mut out: Vec<&MatchRecord> = self.records.iter().collect();
        if newest_first {
            out.reverse();
        }
        out
    }

    /// Load history from a text file. A missing file is an empty history;
    /// malformed lines are skipped.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no match history at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut history = Self::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match MatchRecord::parse_line(line) {
                Some(record) => history.push(record),
                None => log::warn!("skipping malformed history line: {line:?}"),
            }
        }
        log::info!("loaded {} match records", history.len());
        Ok(history)
    }

    /// Rewrite the whole history file.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let mut text = String::new();
        for record in &self.records {
            text.push_str(&record.to_line());
            text.push('\n');
        }
        fs::write(path, text)?;
        log::info!("match history saved ({} records)", self.len());
        Ok(())
    }
}
