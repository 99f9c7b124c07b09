//! REST client for the inventory API.
//!
//! Wraps the inventory server's HTTP endpoints (locations, items, BOM,
//! inventory report, safe-stock update, item deletion) using [`reqwest`].

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;

use stockmap_core::inventory::{BomEntry, InventoryRow, Item, ItemDetails, Location};
use stockmap_core::types::Quantity;

/// HTTP client for one inventory API deployment.
#[derive(Debug, Clone)]
pub struct InventoryApi {
    client: reqwest::Client,
    base_url: Url,
}

/// Errors from the inventory REST layer.
#[derive(Debug, thiserror::Error)]
pub enum InventoryApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The inventory API returned a non-2xx status code.
    #[error("Inventory API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid inventory API URL: {0}")]
    InvalidUrl(String),
}

impl InventoryApiError {
    /// The `error` field of a JSON error body, if the server sent one.
    pub fn server_message(&self) -> Option<String> {
        let InventoryApiError::ApiError { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .filter(|msg| !msg.is_empty())
            .map(str::to_string)
    }

    /// Message suitable for a user-facing notice: the server's own message
    /// when present, otherwise this error's description.
    pub fn user_message(&self) -> String {
        self.server_message().unwrap_or_else(|| self.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            InventoryApiError::ApiError { status, .. } => Some(*status),
            InventoryApiError::Request(e) => e.status().map(|s| s.as_u16()),
            InventoryApiError::InvalidUrl(_) => None,
        }
    }
}

impl InventoryApi {
    /// Create a client for the API rooted at `base_url`, e.g.
    /// `http://host:3000/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InventoryApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, InventoryApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| InventoryApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(InventoryApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /locations`
    pub async fn get_locations(&self) -> Result<Vec<Location>, InventoryApiError> {
        self.get_json(&["locations"], None).await
    }

    /// `GET /items`
    pub async fn get_items(&self) -> Result<Vec<Item>, InventoryApiError> {
        self.get_json(&["items"], None).await
    }

    /// `GET /items/{barcode}`
    pub async fn get_item_details(&self, barcode: &str) -> Result<ItemDetails, InventoryApiError> {
        self.get_json(&["items", barcode], None).await
    }

    /// `GET /bom`, optionally filtered with `?barcode=`.
    pub async fn get_bom(&self, barcode: Option<&str>) -> Result<Vec<BomEntry>, InventoryApiError> {
        let query = barcode.map(|b| ("barcode", b));
        self.get_json(&["bom"], query).await
    }

    /// `GET /reports/inventory`
    pub async fn get_inventory_report(&self) -> Result<Vec<InventoryRow>, InventoryApiError> {
        self.get_json(&["reports", "inventory"], None).await
    }

    /// `PUT /items/{barcode}/safe-stock`
    pub async fn update_safe_stock(
        &self,
        barcode: &str,
        safe_stock: Quantity,
    ) -> Result<(), InventoryApiError> {
        let url = self.endpoint(&["items", barcode, "safe-stock"])?;
        tracing::debug!(%url, safe_stock, "PUT safe stock");

        let response = self
            .client
            .put(url)
            .json(&serde_json::json!({ "safe_stock": safe_stock }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `DELETE /items/{barcode}` with the confirmation password in the body
    /// and the session token as a bearer credential.
    pub async fn delete_item(
        &self,
        barcode: &str,
        password: &str,
        token: Option<&str>,
    ) -> Result<(), InventoryApiError> {
        let url = self.endpoint(&["items", barcode])?;
        tracing::debug!(%url, "DELETE item");

        let mut request = self
            .client
            .delete(url)
            .json(&serde_json::json!({ "password": password }));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, InventoryApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| InventoryApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: Option<(&str, &str)>,
    ) -> Result<T, InventoryApiError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");

        let mut request = self.client.get(url);
        if let Some(pair) = query {
            request = request.query(&[pair]);
        }

        let response = request.send().await?;
        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`InventoryApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, InventoryApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InventoryApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, InventoryApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), InventoryApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> InventoryApi {
        InventoryApi::with_client(reqwest::Client::new(), base).unwrap()
    }

    #[test]
    fn endpoint_appends_segments() {
        let url = api("http://localhost:3000/api").endpoint(&["items", "A1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/items/A1");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let url = api("http://localhost:3000/api/").endpoint(&["locations"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/locations");
    }

    #[test]
    fn endpoint_percent_encodes_barcodes() {
        let url = api("http://localhost:3000/api")
            .endpoint(&["items", "A 1/2"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/items/A%201%2F2");
    }

    #[test]
    fn rejects_unparseable_base() {
        let result = InventoryApi::with_client(reqwest::Client::new(), "not a url");
        assert!(matches!(result, Err(InventoryApiError::InvalidUrl(_))));
    }

    #[test]
    fn server_message_from_json_body() {
        let err = InventoryApiError::ApiError {
            status: 403,
            body: r#"{"error":"Invalid password"}"#.into(),
        };
        assert_eq!(err.server_message().as_deref(), Some("Invalid password"));
        assert_eq!(err.user_message(), "Invalid password");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn user_message_falls_back_to_description() {
        let err = InventoryApiError::ApiError {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message(), "Inventory API error (502): Bad Gateway");
    }
}
