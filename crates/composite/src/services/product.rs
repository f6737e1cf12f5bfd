//! Product backend trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{BackendError, Product, ProductId};

use super::CallLog;

/// Client-side view of the product backend.
///
/// One outbound request per invocation; no caching, no retry. The backend
/// assigns the authoritative identifier on create, replacing whatever the
/// request carried.
#[async_trait]
pub trait ProductBackend: Send + Sync {
    /// Fetches a product by ID.
    async fn get(&self, id: ProductId) -> Result<Product, BackendError>;

    /// Creates a product and returns it with its assigned ID.
    async fn create(&self, product: Product) -> Result<Product, BackendError>;

    /// Replaces a product record.
    async fn update(&self, id: ProductId, product: Product) -> Result<Product, BackendError>;

    /// Deletes a product. Deleting a missing product is a no-op.
    async fn delete(&self, id: ProductId) -> Result<(), BackendError>;
}

#[derive(Debug, Default)]
struct ProductState {
    products: HashMap<ProductId, Product>,
    next_id: i32,
    fail_on_create: bool,
}

/// In-memory product backend for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductBackend {
    state: Arc<RwLock<ProductState>>,
    log: CallLog,
}

impl InMemoryProductBackend {
    /// Creates an empty in-memory backend with its own call log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend recording its calls into a shared log.
    pub fn with_call_log(log: CallLog) -> Self {
        Self {
            state: Arc::default(),
            log,
        }
    }

    /// Seeds a product record directly, bypassing the create path.
    pub fn insert(&self, product: Product) {
        let mut state = self.state.write().unwrap();
        state.next_id = state.next_id.max(product.product_id.as_i32());
        state.products.insert(product.product_id, product);
    }

    /// Configures the backend to reject the next create call.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Returns the number of stored products.
    pub fn product_count(&self) -> usize {
        self.state.read().unwrap().products.len()
    }

    /// Returns true if a product exists with the given ID.
    pub fn contains(&self, id: ProductId) -> bool {
        self.state.read().unwrap().products.contains_key(&id)
    }

    /// Returns the call log this backend records into.
    pub fn call_log(&self) -> &CallLog {
        &self.log
    }
}

#[async_trait]
impl ProductBackend for InMemoryProductBackend {
    async fn get(&self, id: ProductId) -> Result<Product, BackendError> {
        self.log.record(format!("product.get {id}"));
        self.state
            .read()
            .unwrap()
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("No product found for productId: {id}")))
    }

    async fn create(&self, product: Product) -> Result<Product, BackendError> {
        self.log.record("product.create".to_string());
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(BackendError::InvalidInput(format!(
                "Invalid product: {}",
                product.name
            )));
        }

        state.next_id += 1;
        let created = Product::new(ProductId::new(state.next_id), product.name, product.weight);
        state.products.insert(created.product_id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: ProductId, product: Product) -> Result<Product, BackendError> {
        self.log.record(format!("product.update {id}"));
        let mut state = self.state.write().unwrap();
        if !state.products.contains_key(&id) {
            return Err(BackendError::NotFound(format!(
                "No product found for productId: {id}"
            )));
        }
        let updated = Product::new(id, product.name, product.weight);
        state.products.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> Result<(), BackendError> {
        self.log.record(format!("product.delete {id}"));
        self.state.write().unwrap().products.remove(&id);
        Ok(())
    }
}
