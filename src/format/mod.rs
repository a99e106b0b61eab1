// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! External record formats: the JSON data feed and the CSV files the
//! persistence server reads and writes.

mod csv;
mod records;

pub use csv::{read_series_csv, write_series_csv, CsvError};
pub use records::{
    series_from_value, FeedError, RawNumber, RawRecord, RecordError, SelectionRecord,
};
