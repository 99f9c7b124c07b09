use stockmap_client::InventoryApiError;
use stockmap_core::error::CoreError;

/// Error type for dashboard controllers and the CLI.
///
/// Wraps [`CoreError`] for validation failures and [`InventoryApiError`]
/// for network failures, and adds export and configuration variants.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// A domain-level error from `stockmap_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The inventory API was unreachable or refused the request.
    #[error(transparent)]
    Api(#[from] InventoryApiError),

    /// Writing the spreadsheet failed.
    #[error("Export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// Rendering command output as JSON failed.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable held an unusable value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for controller return values.
pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    /// Message for a user-facing notice. API failures prefer the server's
    /// own message.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
