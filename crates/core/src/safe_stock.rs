//! Inline safe-stock editing as an explicit per-field state machine.
//!
//! Typing updates the displayed value immediately (optimistic); leaving the
//! field issues a persist request. A failed persist either keeps the
//! optimistic value or reverts to the last committed one, depending on the
//! configured [`FailurePolicy`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::location_code::parse_leading_int;
use crate::types::{Barcode, Quantity};

/// Notice shown when persisting a safe-stock value fails.
pub const SAFE_STOCK_UPDATE_FAILED: &str = "更新安全庫存失敗";

/// Read a safe-stock value from raw field input. Non-numeric input reads
/// as 0 and negative values clamp to 0.
pub fn parse_safe_stock_input(raw: &str) -> Quantity {
    parse_leading_int(raw).unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// What a failed persist does to the optimistic value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the optimistic value on display.
    #[default]
    Keep,
    /// Restore the last committed value.
    Revert,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Keep => f.write_str("keep"),
            FailurePolicy::Revert => f.write_str("revert"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(FailurePolicy::Keep),
            "revert" => Ok(FailurePolicy::Revert),
            other => Err(CoreError::Config(format!(
                "Invalid safe-stock failure policy '{other}'. Must be one of: keep, revert"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditState {
    /// Showing the committed value.
    Clean,
    /// Edited locally, not yet sent.
    Pending { value: Quantity },
    /// Persist request in flight.
    Committing { value: Quantity },
    /// Server acknowledged `value`.
    Committed { value: Quantity },
    /// Persist of `value` failed; `revert_to` was the committed value.
    Failed { value: Quantity, revert_to: Quantity },
}

/// Persist request produced when an edit is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeStockCommit {
    pub barcode: Barcode,
    pub value: Quantity,
}

/// Editable safe-stock value of one item.
#[derive(Debug, Clone)]
pub struct SafeStockField {
    barcode: Barcode,
    committed: Quantity,
    policy: FailurePolicy,
    state: EditState,
}

impl SafeStockField {
    pub fn new(barcode: impl Into<Barcode>, committed: Quantity, policy: FailurePolicy) -> Self {
        Self {
            barcode: barcode.into(),
            committed,
            policy,
            state: EditState::Clean,
        }
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Last value the server acknowledged (or the fetched value).
    pub fn committed(&self) -> Quantity {
        self.committed
    }

    /// Value currently on display.
    pub fn value(&self) -> Quantity {
        match self.state {
            EditState::Clean => self.committed,
            EditState::Pending { value }
            | EditState::Committing { value }
            | EditState::Committed { value } => value,
            EditState::Failed { value, revert_to } => match self.policy {
                FailurePolicy::Keep => value,
                FailurePolicy::Revert => revert_to,
            },
        }
    }

    /// Field changed. Returns the optimistic value to display.
    pub fn edit(&mut self, raw: &str) -> Quantity {
        let value = parse_safe_stock_input(raw);
        self.state = EditState::Pending { value };
        value
    }

    /// Field lost focus. Always produces a persist request for the
    /// field's current input, even when unchanged.
    pub fn begin_commit(&mut self, raw: &str) -> SafeStockCommit {
        let value = parse_safe_stock_input(raw);
        self.state = EditState::Committing { value };
        SafeStockCommit {
            barcode: self.barcode.clone(),
            value,
        }
    }

    /// The server acknowledged `value`.
    pub fn commit_succeeded(&mut self, value: Quantity) {
        self.committed = value;
        if self.state == (EditState::Committing { value }) {
            self.state = EditState::Committed { value };
        }
    }

    /// Persisting `value` failed. Returns the value to display afterwards,
    /// or `None` when a newer edit superseded the failed request.
    pub fn commit_failed(&mut self, value: Quantity) -> Option<Quantity> {
        if self.state != (EditState::Committing { value }) {
            return None;
        }
        self.state = EditState::Failed {
            value,
            revert_to: self.committed,
        };
        Some(self.value())
    }
}
