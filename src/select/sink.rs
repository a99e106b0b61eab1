// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::format::SelectionRecord;

/// Persistence seam: accepts the finalized selection and reports the outcome
/// asynchronously. Submitting never blocks the caller; a failed save leaves
/// the selection untouched so the user can retry.
pub trait SelectionSink {
    fn submit(&self, records: Vec<SelectionRecord>);
}

/// Outcome of the most recent save, delivered out-of-band to whoever polls
/// the shared slot (the TUI turns it into a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { count: usize, message: String },
    Failed { reason: String },
}

pub type SharedSaveOutcome = Arc<Mutex<Option<SaveOutcome>>>;

/// Takes the pending outcome, if any, leaving the slot empty.
pub fn take_outcome(slot: &SharedSaveOutcome) -> Option<SaveOutcome> {
    slot.lock().ok().and_then(|mut outcome| outcome.take())
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
}

/// Default sink: posts the records as JSON to the local save endpoint on the
/// shared tokio runtime and drops the outcome into the shared slot.
#[derive(Debug, Clone)]
pub struct HttpSink {
    handle: tokio::runtime::Handle,
    client: reqwest::Client,
    endpoint: String,
    outcome: SharedSaveOutcome,
}

impl HttpSink {
    pub fn new(
        handle: tokio::runtime::Handle,
        client: reqwest::Client,
        endpoint: String,
        outcome: SharedSaveOutcome,
    ) -> Self {
        Self { handle, client, endpoint, outcome }
    }

    fn deliver(outcome: &SharedSaveOutcome, result: SaveOutcome) {
        if let Ok(mut slot) = outcome.lock() {
            *slot = Some(result);
        }
    }
}

impl SelectionSink for HttpSink {
    fn submit(&self, records: Vec<SelectionRecord>) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let outcome = self.outcome.clone();
        let count = records.len();

        self.handle.spawn(async move {
            let response = client.post(&endpoint).json(&records).send().await;
            let result = match response {
                Ok(response) if response.status().is_success() => {
                    let body = response.json::<SaveResponse>().await.unwrap_or(SaveResponse {
                        success: true,
                        message: String::new(),
                    });
                    if body.success {
                        SaveOutcome::Saved { count, message: body.message }
                    } else {
                        SaveOutcome::Failed { reason: body.message }
                    }
                }
                Ok(response) => {
                    SaveOutcome::Failed { reason: format!("server responded {}", response.status()) }
                }
                Err(err) => SaveOutcome::Failed { reason: err.to_string() },
            };
            Self::deliver(&outcome, result);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_outcome_drains_the_slot() {
        let slot: SharedSaveOutcome = Arc::new(Mutex::new(None));
        assert_eq!(take_outcome(&slot), None);

        HttpSink::deliver(&slot, SaveOutcome::Saved { count: 2, message: "ok".to_owned() });
        assert_eq!(
            take_outcome(&slot),
            Some(SaveOutcome::Saved { count: 2, message: "ok".to_owned() }),
        );
        assert_eq!(take_outcome(&slot), None);
    }
}
