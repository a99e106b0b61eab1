// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Point, Series};

/// One record as it crosses the wire: ISO date plus OHLC values that may be
/// numbers or numeric strings (the original feed ships both).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub open: RawNumber,
    pub high: RawNumber,
    pub low: RawNumber,
    pub close: RawNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn coerce(&self) -> Result<f64, RecordError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| RecordError::BadNumber { value: text.clone() }),
        }
    }
}

impl RawRecord {
    pub fn to_point(&self) -> Result<Point, RecordError> {
        let timestamp = parse_date(&self.date)?;
        Ok(Point::new(
            timestamp,
            self.open.coerce()?,
            self.high.coerce()?,
            self.low.coerce()?,
            self.close.coerce()?,
        ))
    }
}

/// Accepts `YYYY-MM-DD` (UTC midnight) or a full RFC 3339 timestamp.
fn parse_date(date: &str) -> Result<DateTime<Utc>, RecordError> {
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        if let Some(naive) = day.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(date)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| RecordError::BadDate { value: date.to_owned() })
}

/// Parses a feed payload into a `Series`. A payload that is not a sequence
/// is rejected; the caller logs and keeps its current series.
pub fn series_from_value(value: &serde_json::Value) -> Result<Series, FeedError> {
    let items = value.as_array().ok_or(FeedError::NotASequence)?;

    let mut points = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let record: RawRecord = serde_json::from_value(item.clone())
            .map_err(|_| FeedError::Record { index, reason: RecordError::BadShape })?;
        let point = record.to_point().map_err(|reason| FeedError::Record { index, reason })?;
        points.push(point);
    }

    Ok(Series::new(points))
}

/// The materialized selection as submitted to the persistence endpoint and
/// written to CSV: a day-resolution date plus plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl SelectionRecord {
    pub fn from_point(point: &Point) -> Self {
        Self {
            date: point.timestamp().format("%Y-%m-%d").to_string(),
            open: point.open(),
            high: point.high(),
            low: point.low(),
            close: point.close(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    BadShape,
    BadDate { value: String },
    BadNumber { value: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadShape => f.write_str("record is not an object with date/open/high/low/close"),
            Self::BadDate { value } => write!(f, "unparseable date '{value}'"),
            Self::BadNumber { value } => write!(f, "unparseable number '{value}'"),
        }
    }
}

impl std::error::Error for RecordError {}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    NotASequence,
    Record { index: usize, reason: RecordError },
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotASequence => f.write_str("data feed is not a sequence"),
            Self::Record { index, reason } => write!(f, "record {index}: {reason}"),
        }
    }
}

impl std::error::Error for FeedError {}
