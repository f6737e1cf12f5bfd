//! HTTP client for the product backend.

use async_trait::async_trait;
use common::{BackendError, Product, ProductId};
use composite::ProductBackend;

use crate::rest::RestClient;

/// Product backend over HTTP.
#[derive(Debug, Clone)]
pub struct ProductClient {
    rest: RestClient,
}

impl ProductClient {
    /// Creates a client for the product backend at `base_url`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            rest: RestClient::new(http, base_url, "product"),
        }
    }
}

#[async_trait]
impl ProductBackend for ProductClient {
    async fn get(&self, id: ProductId) -> Result<Product, BackendError> {
        self.rest.get(id.as_i32()).await
    }

    async fn create(&self, product: Product) -> Result<Product, BackendError> {
        self.rest.create(&product).await
    }

    async fn update(&self, id: ProductId, product: Product) -> Result<Product, BackendError> {
        self.rest.update(id.as_i32(), &product).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), BackendError> {
        self.rest.delete(id.as_i32()).await
    }
}
