//! Catalog service client.
//!
//! The storefront's catalog exposes products and per-product stock as
//! plain JSON endpoints (`/products/{id}`, `/stock/{id}`). Stock is always
//! fetched at the moment a mutation needs it - responses are never cached,
//! so the number reflects the catalog's view at validation time.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tucano_core::ProductId;
use url::Url;

use crate::config::CatalogConfig;
use crate::models::{Product, Stock};

/// Errors that can occur when interacting with the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Read access to the catalog's product and stock records.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch a product's descriptive record.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the lookup fails.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current available stock for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the lookup fails.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}

/// HTTP client for the catalog service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the token is
    /// not a valid header value.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.api_token {
            let value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&value)
                .map_err(|e| CatalogError::Parse(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = item_url(&self.base_url, resource, id);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get_json("products", id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.get_json("stock", id).await
    }
}

/// Build the URL of a single catalog item.
fn item_url(base_url: &Url, resource: &str, id: ProductId) -> String {
    format!(
        "{}/{resource}/{id}",
        base_url.as_str().trim_end_matches('/')
    )
}
