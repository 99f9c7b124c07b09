//! Password-gated item deletion dialog.
//!
//! The dialog only checks that a password was entered; authorization is
//! decided by the inventory API when the delete request arrives.

use serde::Serialize;

use crate::error::CoreError;
use crate::report::ItemSummary;
use crate::types::Barcode;

/// Notice shown after a successful delete.
pub const DELETE_SUCCEEDED: &str = "刪除成功！";

/// Prefix of the notice shown after a failed delete.
pub const DELETE_FAILED_PREFIX: &str = "刪除失敗: ";

/// Item a pending delete applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTarget {
    pub barcode: Barcode,
    pub name: String,
}

impl From<&ItemSummary> for DeleteTarget {
    fn from(item: &ItemSummary) -> Self {
        Self {
            barcode: item.barcode.clone(),
            name: item.name.clone(),
        }
    }
}

/// Validated delete request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub barcode: Barcode,
    pub password: String,
}

/// State of an open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDialog {
    pub target: DeleteTarget,
    pub password: String,
    pub show_password: bool,
    pub submitting: bool,
    /// Message from the last failed attempt, kept for retry.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteDialog {
    #[default]
    Closed,
    Open(OpenDialog),
}

impl DeleteDialog {
    /// Open the dialog for `target` with an empty, hidden password.
    pub fn open(&mut self, target: DeleteTarget) {
        *self = DeleteDialog::Open(OpenDialog {
            target,
            password: String::new(),
            show_password: false,
            submitting: false,
            error: None,
        });
    }

    pub fn cancel(&mut self) {
        *self = DeleteDialog::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DeleteDialog::Open(_))
    }

    pub fn target(&self) -> Option<&DeleteTarget> {
        match self {
            DeleteDialog::Open(dialog) => Some(&dialog.target),
            DeleteDialog::Closed => None,
        }
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        if let DeleteDialog::Open(dialog) = self {
            dialog.password = password.into();
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        if let DeleteDialog::Open(dialog) = self {
            dialog.show_password = !dialog.show_password;
        }
    }

    /// Validate the dialog and mark it as submitting.
    pub fn submit(&mut self) -> Result<DeleteRequest, CoreError> {
        let DeleteDialog::Open(dialog) = self else {
            return Err(CoreError::Validation("No item selected for deletion".into()));
        };
        if dialog.password.is_empty() {
            return Err(CoreError::Validation("Password is required".into()));
        }
        dialog.submitting = true;
        dialog.error = None;
        Ok(DeleteRequest {
            barcode: dialog.target.barcode.clone(),
            password: dialog.password.clone(),
        })
    }

    /// The delete went through; the dialog closes.
    pub fn succeeded(&mut self) -> &'static str {
        *self = DeleteDialog::Closed;
        DELETE_SUCCEEDED
    }

    /// The delete was refused; the dialog stays open for another try.
    /// Returns the notice to show.
    pub fn failed(&mut self, message: &str) -> String {
        if let DeleteDialog::Open(dialog) = self {
            dialog.submitting = false;
            dialog.error = Some(message.to_string());
        }
        format!("{DELETE_FAILED_PREFIX}{message}")
    }
}
