use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use botify_core::config::ShopifyConfig;

use crate::records::{Order, OrdersEnvelope, Product, ProductsEnvelope};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog responded with status {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("malformed catalog response: {0}")]
    MalformedResponse(String),
}

/// Read-only client for the Shopify Admin REST API. Lookups return `None`
/// for empty result sets; only transport and decode problems are errors.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    shop_domain: String,
    api_version: String,
    access_token: SecretString,
}

impl CatalogClient {
    pub fn new(config: &ShopifyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            shop_domain: config.shop_domain.clone(),
            api_version: config.api_version.clone(),
            access_token: config.access_token.clone(),
        }
    }

    /// First product whose title matches `name`, or `None`.
    pub async fn find_product_by_title(
        &self,
        name: &str,
    ) -> Result<Option<Product>, CatalogError> {
        let url = self.endpoint("products.json");
        let envelope: ProductsEnvelope = self.get(&url, &[("title", name)]).await?;

        debug!(
            event_name = "catalog.product_lookup",
            title = name,
            matches = envelope.products.len(),
            "product lookup completed"
        );

        Ok(envelope.products.into_iter().next())
    }

    /// First order matching the order name, or failing that the customer
    /// email. Returns `None` without a network call when neither identifier
    /// is supplied.
    pub async fn find_order(
        &self,
        order_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Order>, CatalogError> {
        let query = if let Some(order_id) = order_id {
            ("name", order_id)
        } else if let Some(email) = email {
            ("email", email)
        } else {
            return Ok(None);
        };

        let url = self.endpoint("orders.json");
        let envelope: OrdersEnvelope = self.get(&url, &[query]).await?;

        debug!(
            event_name = "catalog.order_lookup",
            lookup_key = query.0,
            matches = envelope.orders.len(),
            "order lookup completed"
        );

        Ok(envelope.orders.into_iter().next())
    }

    fn endpoint(&self, resource: &str) -> String {
        format!(
            "https://{shop}/admin/api/{version}/{resource}",
            shop = self.shop_domain,
            version = self.api_version,
        )
    }

    async fn get<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CatalogError::Upstream { status, body });
        }

        serde_json::from_str(&body)
            .map_err(|error| CatalogError::MalformedResponse(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use botify_core::config::ShopifyConfig;

    use super::CatalogClient;

    fn client() -> CatalogClient {
        CatalogClient::new(&ShopifyConfig {
            shop_domain: "teststore.myshopify.com".to_string(),
            access_token: "shpat-test".to_string().into(),
            api_version: "2024-04".to_string(),
        })
    }

    #[test]
    fn endpoint_includes_shop_domain_and_api_version() {
        let url = client().endpoint("products.json");
        assert_eq!(url, "https://teststore.myshopify.com/admin/api/2024-04/products.json");
    }

    #[tokio::test]
    async fn order_lookup_without_identifiers_short_circuits() {
        let found = client().find_order(None, None).await.expect("lookup");
        assert!(found.is_none());
    }
}
