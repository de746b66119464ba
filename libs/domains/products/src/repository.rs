use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductRecord};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends; whatever the
/// backend, `save` must apply its version check atomically with respect
/// to concurrent saves of the same row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every stored record, in store-default (ascending id) order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Look up a record by id; `None` for a missing key, never an error
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Insert (`record.id` absent) or update (`record.id` present).
    ///
    /// Inserts assign the next unique id and version 0. Updates compare
    /// the supplied version against the stored one, rejecting a stale
    /// write with [`ProductError::Conflict`]; on success the stored
    /// version is incremented and returned.
    async fn save(&self, record: ProductRecord) -> ProductResult<Product>;

    /// Apply [`Self::save`] to every element, all-or-nothing: any
    /// conflict leaves the store completely unchanged.
    async fn save_all(&self, records: Vec<ProductRecord>) -> ProductResult<Vec<Product>>;

    /// Remove a record; `false` when the id was absent
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    /// Last assigned id; ids are never reused, even after deletion
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

impl Store {
    /// Verify a record could be applied without touching any row.
    /// Used by `save_all` to make the batch all-or-nothing.
    fn check(&self, record: &ProductRecord) -> ProductResult<()> {
        let Some(id) = record.id else {
            return Ok(());
        };

        let row = self.rows.get(&id).ok_or(ProductError::NotFound(id))?;
        let supplied = record.version.unwrap_or(row.version);
        if supplied != row.version {
            return Err(ProductError::Conflict {
                id,
                supplied,
                stored: row.version,
            });
        }
        Ok(())
    }

    fn apply(&mut self, record: ProductRecord) -> ProductResult<Product> {
        match record.id {
            None => {
                self.last_id += 1;
                let product = Product {
                    id: self.last_id,
                    name: record.name,
                    description: record.description,
                    price: record.price,
                    quantity: record.quantity,
                    version: 0,
                };
                self.rows.insert(product.id, product.clone());
                tracing::info!(product_id = product.id, "Created product");
                Ok(product)
            }
            Some(id) => {
                let row = self.rows.get_mut(&id).ok_or(ProductError::NotFound(id))?;

                let supplied = record.version.unwrap_or(row.version);
                if supplied != row.version {
                    return Err(ProductError::Conflict {
                        id,
                        supplied,
                        stored: row.version,
                    });
                }

                row.name = record.name;
                row.description = record.description;
                row.price = record.price;
                row.quantity = record.quantity;
                row.version += 1;

                tracing::info!(product_id = id, version = row.version, "Updated product");
                Ok(row.clone())
            }
        }
    }
}

/// In-memory implementation of ProductRepository.
///
/// The write lock is the serialization point for conflicting writes: a
/// save can never observe a stale version as current.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn save(&self, record: ProductRecord) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        store.apply(record)
    }

    async fn save_all(&self, records: Vec<ProductRecord>) -> ProductResult<Vec<Product>> {
        let mut store = self.store.write().await;

        // Preconditions first, so a conflict anywhere in the batch
        // leaves the store unchanged.
        for record in &records {
            store.check(record)?;
        }

        records
            .into_iter()
            .map(|record| store.apply(record))
            .collect()
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.rows.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
