//! Donation request record and its status lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a donation request.
///
/// `Done` and `Cancelled` are terminal: once reached, only an idempotent
/// rewrite of the same status is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationStatus {
    Pending,
    InProgress,
    Done,
    Cancelled,
}

impl DonationStatus {
    /// Status assigned to newly created requests.
    pub const INITIAL: Self = Self::Pending;

    /// Whether this status accepts no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Legal edges: pending may move to any state (a request can be
    /// fulfilled or cancelled without an in-progress phase), in-progress
    /// may complete or cancel, and terminal states accept only themselves.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        match self {
            Self::Pending => true,
            Self::InProgress => matches!(next, Self::Done | Self::Cancelled),
            Self::Done | Self::Cancelled => false,
        }
    }

    /// Wire name of this status (kebab-case, as stored).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Error for status strings outside the recognised set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown donation status: {0:?}")]
pub struct UnknownStatus(pub String);

/// Typed view over a stored donation request document.
///
/// Only the fields the lifecycle logic interprets are named; everything
/// else (donor info, location, blood group, ...) rides along in `extra`
/// and round-trips verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRequest {
    /// Store-assigned identifier, immutable.
    pub id: Uuid,
    /// Owner of the request, immutable after creation.
    pub requester_email: String,
    pub donation_status: DonationStatus,
    /// Date the donation is needed; recency ordering key.
    #[serde(rename = "selectedDate")]
    pub selected_date: NaiveDate,
    /// Uninterpreted payload fields, stored and returned verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
