// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::io;

use crate::model::Series;

use super::records::{RawRecord, RecordError, SelectionRecord};

/// Writes a series as `date,open,high,low,close` rows.
pub fn write_series_csv<W: io::Write>(writer: W, records: &[SelectionRecord]) -> Result<(), CsvError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record).map_err(|source| CsvError::Write { source })?;
    }
    csv_writer.flush().map_err(|source| CsvError::Flush { source })?;
    Ok(())
}

/// Reads a `date,open,high,low,close` file back into a series. Numeric
/// strings coerce the same way the JSON feed does.
pub fn read_series_csv<R: io::Read>(reader: R) -> Result<Series, CsvError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut points = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let record = row.map_err(|source| CsvError::Read { source })?;
        let point = record.to_point().map_err(|reason| CsvError::Row { index, reason })?;
        points.push(point);
    }

    Ok(Series::new(points))
}

#[derive(Debug)]
pub enum CsvError {
    Write { source: csv::Error },
    Flush { source: io::Error },
    Read { source: csv::Error },
    Row { index: usize, reason: RecordError },
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write { source } => write!(f, "failed to write csv row: {source}"),
            Self::Flush { source } => write!(f, "failed to flush csv output: {source}"),
            Self::Read { source } => write!(f, "failed to read csv row: {source}"),
            Self::Row { index, reason } => write!(f, "csv row {index}: {reason}"),
        }
    }
}

impl std::error::Error for CsvError {}
