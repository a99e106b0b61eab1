// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::format::{write_series_csv, CsvError, SelectionRecord};

const LOG_FILENAME: &str = "log.txt";

/// Best-effort by default; `Durable` opts into fsync on data files and their
/// directory where the platform supports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    #[default]
    BestEffort,
    Durable,
}

/// The folder the server persists into: exported CSV files plus the
/// append-only request log.
#[derive(Debug, Clone)]
pub struct DataFolder {
    dir: PathBuf,
    durability: WriteDurability,
}

/// Name for an exported series file; `:` and `.` in the timestamp are
/// filesystem-hostile, so they become `-`.
pub fn csv_filename_for(timestamp: DateTime<Utc>) -> String {
    let stamp = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true).replace([':', '.'], "-");
    format!("candlestick_data_{stamp}.csv")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCsv {
    pub filename: String,
    pub path: PathBuf,
}

impl DataFolder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILENAME)
    }

    /// Writes the records as a timestamped CSV export and reports the name
    /// the caller echoes back to the client.
    pub fn save_series_csv(&self, records: &[SelectionRecord]) -> Result<SavedCsv, StoreError> {
        self.save_series_csv_at(records, Utc::now())
    }

    pub fn save_series_csv_at(
        &self,
        records: &[SelectionRecord],
        timestamp: DateTime<Utc>,
    ) -> Result<SavedCsv, StoreError> {
        let mut bytes = Vec::new();
        write_series_csv(&mut bytes, records).map_err(StoreError::Csv)?;

        let filename = csv_filename_for(timestamp);
        let path = self.dir.join(&filename);
        self.write_atomic(&path, &bytes)?;

        Ok(SavedCsv { filename, path })
    }

    /// Appends one line to the request log, creating the folder and file on
    /// first use.
    pub fn append_log_line(&self, line: &str) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let path = self.log_path();
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Append { path: path.clone(), source })?;
        writeln!(file, "{line}").map_err(|source| StoreError::Append { path, source })
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::CreateDir { path: self.dir.clone(), source })
    }

    /// Write-to-temp then rename, so a crash never leaves a half-written
    /// export behind.
    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        self.ensure_dir()?;

        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let tmp_name = format!(
            ".{}.tmp-{}-{nanos}",
            path.file_name().and_then(|name| name.to_str()).unwrap_or("export"),
            std::process::id(),
        );
        let tmp_path = self.dir.join(tmp_name);

        let write_result = (|| -> io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(bytes)?;
            if self.durability == WriteDurability::Durable {
                file.sync_all()?;
            }
            Ok(())
        })();
        if let Err(source) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Write { path: tmp_path, source });
        }

        if let Err(source) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Rename { from: tmp_path, to: path.to_path_buf(), source });
        }

        if self.durability == WriteDurability::Durable {
            // Directory sync is best-effort; not all platforms allow it.
            if let Ok(dir) = fs::File::open(&self.dir) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub enum StoreError {
    CreateDir { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Rename { from: PathBuf, to: PathBuf, source: io::Error },
    Append { path: PathBuf, source: io::Error },
    Csv(CsvError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => {
                write!(f, "failed to create data folder {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
            Self::Rename { from, to, source } => {
                write!(f, "failed to rename {} to {}: {source}", from.display(), to.display())
            }
            Self::Append { path, source } => {
                write!(f, "failed to append to {}: {source}", path.display())
            }
            Self::Csv(error) => write!(f, "failed to encode csv: {error}"),
        }
    }
}

impl std::error::Error for StoreError {}
