//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput, ProductRecord};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer validates request bodies, applies the
/// update-merge policy and orchestrates repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every product
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product. The store assigns id and version; any
    /// client-supplied values for either are ignored.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        input.validate()?;

        self.repository.save(ProductRecord::for_insert(&input)).await
    }

    /// Update an existing product.
    ///
    /// Only `name`, `description`, `price` and `quantity` are copied
    /// from the body onto the stored record. The expected version is
    /// the one the client read (falling back to the stored version when
    /// the body omits it); the store rejects a stale write.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: ProductInput) -> ProductResult<Product> {
        input.validate()?;

        let stored = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        self.repository
            .save(ProductRecord::for_update(&stored, &input))
            .await
    }

    /// Save a batch of products in one call, all-or-nothing.
    ///
    /// Elements without an id are inserted; elements carrying an id
    /// address an existing row and are version-checked like any other
    /// update. Validation errors are keyed `products[i].field`.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn create_products(&self, inputs: Vec<ProductInput>) -> ProductResult<Vec<Product>> {
        let mut errors = axum_helpers::FieldErrors::new();
        for (index, input) in inputs.iter().enumerate() {
            if let Err(e) = input.validate() {
                for (field, message) in axum_helpers::field_errors(&e) {
                    errors.insert(format!("products[{}].{}", index, field), message);
                }
            }
        }
        if !errors.is_empty() {
            return Err(ProductError::Validation(errors));
        }

        let records = inputs.iter().map(ProductRecord::from_input).collect();
        self.repository.save_all(records).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.repository.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn widget_input() -> ProductInput {
        ProductInput {
            id: None,
            name: "Widget".to_string(),
            description: None,
            price: 9.99,
            quantity: 10,
            version: None,
        }
    }

    fn stored_widget() -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            description: None,
            price: 9.99,
            quantity: 10,
            version: 0,
        }
    }

    #[tokio::test]
    async fn test_get_product_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(42).await;
        assert_eq!(result, Err(ProductError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_repository() {
        let mut input = widget_input();
        input.price = -1.0;

        // No expectations: the repository must not be called.
        let service = ProductService::new(MockProductRepository::new());

        let result = service.create_product(input).await;
        let Err(ProductError::Validation(fields)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("price"));
    }

    #[tokio::test]
    async fn test_create_drops_client_supplied_id() {
        let mut input = widget_input();
        input.id = Some(99);
        input.version = Some(3);

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_save()
            .with(eq(ProductRecord::for_insert(&widget_input())))
            .returning(|_| Ok(stored_widget()));

        let service = ProductService::new(mock_repo);
        let product = service.create_product(input).await.unwrap();
        assert_eq!(product.id, 1);
    }

    #[tokio::test]
    async fn test_update_merges_body_onto_stored_record() {
        let mut input = widget_input();
        input.price = 12.50;
        input.quantity = 8;
        input.version = Some(0);

        let expected_record = ProductRecord {
            id: Some(1),
            name: "Widget".to_string(),
            description: None,
            price: 12.50,
            quantity: 8,
            version: Some(0),
        };

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_widget())));
        mock_repo
            .expect_save()
            .with(eq(expected_record))
            .returning(|_| {
                Ok(Product {
                    price: 12.50,
                    quantity: 8,
                    version: 1,
                    ..stored_widget()
                })
            });

        let service = ProductService::new(mock_repo);
        let updated = service.update_product(1, input).await.unwrap();
        assert_eq!(updated.version, 1);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.update_product(5, widget_input()).await;
        assert_eq!(result, Err(ProductError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(8))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(8).await;
        assert_eq!(result, Err(ProductError::NotFound(8)));
    }

    #[tokio::test]
    async fn test_batch_validation_errors_are_index_scoped() {
        let mut bad = widget_input();
        bad.name = String::new();
        bad.quantity = -2;

        let service = ProductService::new(MockProductRepository::new());

        let result = service.create_products(vec![widget_input(), bad]).await;
        let Err(ProductError::Validation(fields)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("products[1].name"));
        assert!(fields.contains_key("products[1].quantity"));
    }
}
