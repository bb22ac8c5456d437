//! Status enums and ledger classifications for the inventory system.
//!
//! All enums serialize the same way they are stored in SQL (`as_str()`), so
//! `serde` can be used to parse TEXT columns back into typed values.
//!
//! Device status is deliberately not a state machine: any status may move to
//! any other, and the ledger only records what happened.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DeviceStatus
// ---------------------------------------------------------------------------

/// Where a device currently sits in the stock lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    InStock,
    Sold,
    Returned,
    Quarantine,
    Repair,
    QcRequired,
    QcFailed,
}

impl DeviceStatus {
    pub const ALL: [Self; 7] = [
        Self::InStock,
        Self::Sold,
        Self::Returned,
        Self::Quarantine,
        Self::Repair,
        Self::QcRequired,
        Self::QcFailed,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::Sold => "sold",
            Self::Returned => "returned",
            Self::Quarantine => "quarantine",
            Self::Repair => "repair",
            Self::QcRequired => "qc_required",
            Self::QcFailed => "qc_failed",
        }
    }

    /// Whether the status belongs to the quality-control stage.
    #[must_use]
    pub const fn is_qc(self) -> bool {
        matches!(self, Self::QcRequired | Self::QcFailed)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QcResult
// ---------------------------------------------------------------------------

/// Verdict of a quality-control inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QcResult {
    Pass,
    Fail,
}

impl QcResult {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }

    /// Status a device moves to once this verdict is recorded.
    #[must_use]
    pub const fn resulting_status(self) -> DeviceStatus {
        match self {
            Self::Pass => DeviceStatus::InStock,
            Self::Fail => DeviceStatus::QcFailed,
        }
    }
}

impl fmt::Display for QcResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Cosmetic/functional condition rating of a used device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TransactionKind
// ---------------------------------------------------------------------------

/// Classification of a device ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Purchase,
    Sale,
    ReturnIn,
    Repair,
    Qc,
    Transfer,
}

impl TransactionKind {
    /// Classify a status change by the status the device moved to.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn for_status(status: DeviceStatus) -> Self {
        match status {
            DeviceStatus::Sold => Self::Sale,
            DeviceStatus::Returned => Self::ReturnIn,
            DeviceStatus::Repair => Self::Repair,
            DeviceStatus::QcRequired => Self::Qc,
            DeviceStatus::InStock | DeviceStatus::Quarantine | DeviceStatus::QcFailed => {
                Self::Transfer
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Sale => "sale",
            Self::ReturnIn => "return_in",
            Self::Repair => "repair",
            Self::Qc => "qc",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PartMovement
// ---------------------------------------------------------------------------

/// Classification of a part quantity ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PartMovement {
    Purchase,
    Usage,
    Adjustment,
    ReturnIn,
}

impl PartMovement {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Usage => "usage",
            Self::Adjustment => "adjustment",
            Self::ReturnIn => "return_in",
        }
    }
}

impl fmt::Display for PartMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Status of a purchase or sales order header.
///
/// ```text
/// open → completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    Completed,
}

impl OrderStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Open => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
