// src/submit/result.rs
// Outcome records produced by the fan-out engine. One record per submission,
// one outcome per service, immutable once assembled. The JSON shape is the
// dashboard's wire format, so `status` is either the upstream HTTP status
// code or one of the literal labels.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one service within a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceOutcome {
    /// The service accepted the request.
    Ok {
        status: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
    /// Fire-and-forget fan-out; only the dispatch count is known.
    Broadcast { status: BroadcastTag, count: usize },
    /// The call failed; the message is kept for inspection.
    Error { status: ErrorTag, error: String },
    /// The service was not attempted.
    Skipped { status: SkippedTag, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroadcastTag {
    #[serde(rename = "aggressive_broadcast")]
    AggressiveBroadcast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorTag {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkippedTag {
    #[serde(rename = "skipped")]
    Skipped,
}

impl ServiceOutcome {
    pub fn ok(status: u16, data: Option<serde_json::Value>) -> Self {
        Self::Ok { status, data }
    }

    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::Error {
            status: ErrorTag::Error,
            error: err.to_string(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            status: SkippedTag::Skipped,
            reason: reason.into(),
        }
    }

    pub fn broadcast(count: usize) -> Self {
        Self::Broadcast {
            status: BroadcastTag::AggressiveBroadcast,
            count,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// The record of submitting one URL across all services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub services: BTreeMap<String, ServiceOutcome>,
}
