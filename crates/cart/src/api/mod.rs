//! Cart service REST client.
//!
//! # Architecture
//!
//! - [`CartApi`] is the contract over the four remote operations; the store
//!   is generic over it so tests can drive it with an in-memory fake
//! - [`HttpCartClient`] is the production implementation over `reqwest`
//! - The remote service is the source of truth - responses carry the
//!   authoritative line records the store reconciles against
//!
//! Cart state is mutable on the server, so nothing here is cached. No
//! operation retries automatically; each is a single round trip.

pub mod wire;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use marula_core::{LineItemId, ProductId, Quantity};

use crate::config::CartApiConfig;
use crate::error::CartError;
use wire::{AddLineRequest, CartEnvelope, ErrorBody, RemoteLineItem, UpdateQuantityRequest};

/// Contract over the four remote cart operations.
///
/// Pure network boundary: implementations hold no cart state and apply no
/// business logic. Every method is a single round trip against the
/// authoritative cart; the returned records are the server's resolved view.
#[allow(async_fn_in_trait)] // consumed generically by the store, never as dyn
pub trait CartApi {
    /// Fetch every line item in the active cart.
    async fn fetch_cart(&self) -> Result<Vec<RemoteLineItem>, CartError>;

    /// Add a product to the cart.
    ///
    /// The server decides whether this creates a new line or increments an
    /// existing one for the same product, and returns the resulting record.
    async fn create_or_increment(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<RemoteLineItem, CartError>;

    /// Set the absolute quantity of an existing cart line.
    async fn update_quantity(
        &self,
        line_id: &LineItemId,
        quantity: Quantity,
    ) -> Result<RemoteLineItem, CartError>;

    /// Delete a cart line.
    ///
    /// Fails with [`CartError::NotFound`] if the line is already absent.
    async fn delete_line(&self, line_id: &LineItemId) -> Result<(), CartError>;
}

// =============================================================================
// HttpCartClient
// =============================================================================

/// REST client for the remote cart service.
///
/// Cheaply cloneable via `Arc`. Sends a bearer token when one is configured
/// and applies the configured per-request timeout.
#[derive(Clone)]
pub struct HttpCartClient {
    inner: Arc<HttpCartClientInner>,
}

struct HttpCartClientInner {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<SecretString>,
}

impl HttpCartClient {
    /// Create a new cart service client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &CartApiConfig) -> Result<Self, CartError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpCartClientInner {
                client,
                base_url: config.base_url.clone(),
                access_token: config.access_token.clone(),
            }),
        })
    }

    /// Build a request against the cart service.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{path}", self.inner.base_url);
        let mut request = self.inner.client.request(method, url);
        if let Some(token) = &self.inner.access_token {
            request = request.bearer_auth(token.expose_secret());
        }
        request
    }

    /// Check the response status and return the body text on success.
    ///
    /// Maps 404 to `NotFound`, 429 to `RateLimited`, and any other non-2xx
    /// status to `Rejected`, extracting a structured message from the error
    /// body when one is present.
    async fn read_success(response: reqwest::Response) -> Result<String, CartError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CartError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(CartError::NotFound {
                message: extract_message(&body),
            });
        }

        if !status.is_success() {
            let message = extract_message(&body);
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "cart service returned non-success status"
            );
            return Err(CartError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    /// Check the response status and parse the body as JSON.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CartError> {
        let body = Self::read_success(response).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse cart service response"
            );
            CartError::Parse(e)
        })
    }
}

/// Pull a structured message out of an error body, if there is one.
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
}

impl CartApi for HttpCartClient {
    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Vec<RemoteLineItem>, CartError> {
        let response = self.request(Method::GET, "cart").send().await?;
        let envelope: CartEnvelope = Self::read_json(response).await?;
        debug!(count = envelope.items.len(), "fetched cart");
        Ok(envelope.items)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn create_or_increment(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<RemoteLineItem, CartError> {
        let response = self
            .request(Method::POST, "cart")
            .json(&AddLineRequest {
                product_id,
                quantity,
            })
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self), fields(line_id = %line_id))]
    async fn update_quantity(
        &self,
        line_id: &LineItemId,
        quantity: Quantity,
    ) -> Result<RemoteLineItem, CartError> {
        let response = self
            .request(Method::PATCH, &format!("cart/item/{line_id}"))
            .json(&UpdateQuantityRequest { quantity })
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self), fields(line_id = %line_id))]
    async fn delete_line(&self, line_id: &LineItemId) -> Result<(), CartError> {
        let response = self
            .request(Method::DELETE, &format!("cart/item/{line_id}"))
            .send()
            .await?;
        Self::read_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Build a `reqwest::Response` without a network round trip.
    fn response(builder: http::response::Builder, body: &str) -> reqwest::Response {
        builder.body(body.to_string()).unwrap().into()
    }

    #[tokio::test]
    async fn test_success_status_returns_body() {
        let response = response(http::Response::builder().status(200), r#"{"items":[]}"#);
        let body = HttpCartClient::read_success(response).await.unwrap();
        assert_eq!(body, r#"{"items":[]}"#);
    }

    #[tokio::test]
    async fn test_not_found_carries_structured_message() {
        let response = response(
            http::Response::builder().status(404),
            r#"{"message":"Product not found"}"#,
        );
        let error = HttpCartClient::read_success(response).await.unwrap_err();
        match error {
            CartError::NotFound { message } => {
                assert_eq!(message.as_deref(), Some("Product not found"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_not_found_without_body_message() {
        let response = response(http::Response::builder().status(404), "<html>Not Found</html>");
        let error = HttpCartClient::read_success(response).await.unwrap_err();
        assert!(matches!(error, CartError::NotFound { message: None }));
    }

    #[tokio::test]
    async fn test_rate_limited_honors_retry_after() {
        let response = response(
            http::Response::builder()
                .status(429)
                .header("Retry-After", "7"),
            "",
        );
        let error = HttpCartClient::read_success(response).await.unwrap_err();
        assert!(matches!(error, CartError::RateLimited(7)));
    }

    #[tokio::test]
    async fn test_rate_limited_defaults_to_one_second() {
        let response = response(http::Response::builder().status(429), "");
        let error = HttpCartClient::read_success(response).await.unwrap_err();
        assert!(matches!(error, CartError::RateLimited(1)));
    }

    #[tokio::test]
    async fn test_other_non_success_maps_to_rejected() {
        let response = response(
            http::Response::builder().status(422),
            r#"{"error":"Quantity must be an integer"}"#,
        );
        let error = HttpCartClient::read_success(response).await.unwrap_err();
        match error {
            CartError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message.as_deref(), Some("Quantity must be an integer"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_json_parses_success_body() {
        let response = response(
            http::Response::builder().status(200),
            r#"{"items":[{"id":"c1","product_id":7,"product_name":"Jam","product_price":4.5,"quantity":1}]}"#,
        );
        let envelope: CartEnvelope = HttpCartClient::read_json(response).await.unwrap();
        assert_eq!(envelope.items.len(), 1);
    }

    #[tokio::test]
    async fn test_read_json_maps_malformed_body_to_parse_error() {
        let response = response(http::Response::builder().status(200), "not json");
        let error = HttpCartClient::read_json::<CartEnvelope>(response)
            .await
            .unwrap_err();
        assert!(matches!(error, CartError::Parse(_)));
    }

    #[test]
    fn test_extract_message_prefers_message_field() {
        let body = r#"{"message":"Quantity must be an integer","error":"ignored"}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("Quantity must be an integer")
        );
    }

    #[test]
    fn test_extract_message_from_non_json_body() {
        assert_eq!(extract_message("<html>Internal Server Error</html>"), None);
    }

    #[test]
    fn test_request_url_joins_path() {
        // The base URL is stored without a trailing slash, so joining with a
        // single slash cannot produce doubled separators.
        let config = crate::config::CartApiConfig::new("https://api.test/v1/")
            .expect("valid url");
        assert_eq!(format!("{}/{}", config.base_url, "cart"), "https://api.test/v1/cart");
    }
}
