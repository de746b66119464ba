use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Custom validator rejecting empty and whitespace-only names
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Product entity - a stored inventory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the store on creation, immutable
    pub id: i64,
    /// Product name
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Unit price, strictly positive
    pub price: f64,
    /// Units on hand, never negative
    pub quantity: i32,
    /// Optimistic-concurrency counter: starts at 0, incremented by the
    /// store on every successful update
    pub version: i64,
}

/// Request body accepted by the create, update and batch endpoints.
///
/// `id` is honored only by the batch endpoint (an element addressing an
/// existing row); create assigns its own id and update takes the id
/// from the path. `version` is the version the client last read; it is
/// ignored on create.
///
/// Every field carries a serde default so a missing field fails
/// validation (with a field-scoped message) rather than rejecting the
/// whole body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "length must not exceed 100")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "length must not exceed 255"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub quantity: i32,
    #[serde(default)]
    pub version: Option<i64>,
}

/// Write model handed to the persistence gateway.
///
/// `id: None` means insert (the store assigns id and version).
/// `id: Some` means update: when `version` is supplied the store
/// compares it against the stored version and rejects the write on
/// mismatch; when absent the current stored version is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub version: Option<i64>,
}

impl ProductRecord {
    /// Record for a fresh insert. Any client-supplied id or version is
    /// dropped; the store assigns both.
    pub fn for_insert(input: &ProductInput) -> Self {
        Self {
            id: None,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            quantity: input.quantity,
            version: None,
        }
    }

    /// Record for an update of `stored`. Only the four mutable fields
    /// come from the body; identity comes from the stored row, so a
    /// client can never spoof `id`. The expected version is the one the
    /// client read, falling back to the stored version when the body
    /// omits it.
    pub fn for_update(stored: &Product, input: &ProductInput) -> Self {
        Self {
            id: Some(stored.id),
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            quantity: input.quantity,
            version: Some(input.version.unwrap_or(stored.version)),
        }
    }

    /// Record for a batch element: `id` and `version` pass through
    /// exactly as supplied, so an element may insert or update.
    pub fn from_input(input: &ProductInput) -> Self {
        Self {
            id: input.id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            quantity: input.quantity,
            version: input.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ProductInput {
        ProductInput {
            id: None,
            name: "Widget".to_string(),
            description: None,
            price: 9.99,
            quantity: 10,
            version: None,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut input = valid_input();
        input.name = "   ".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_name_over_100_chars_rejected() {
        let mut input = valid_input();
        input.name = "x".repeat(101);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_description_over_255_chars_rejected() {
        let mut input = valid_input();
        input.description = Some("x".repeat(256));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut input = valid_input();
        input.price = 0.0;
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut input = valid_input();
        input.quantity = -1;
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn test_zero_quantity_allowed() {
        let mut input = valid_input();
        input.quantity = 0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_record_takes_identity_from_stored_row() {
        let stored = Product {
            id: 4,
            name: "Widget".to_string(),
            description: None,
            price: 9.99,
            quantity: 10,
            version: 3,
        };
        let mut input = valid_input();
        input.id = Some(99); // spoof attempt, must be ignored
        input.price = 12.50;

        let record = ProductRecord::for_update(&stored, &input);
        assert_eq!(record.id, Some(4));
        assert_eq!(record.version, Some(3));
        assert_eq!(record.price, 12.50);
    }

    #[test]
    fn test_insert_record_drops_client_id_and_version() {
        let mut input = valid_input();
        input.id = Some(7);
        input.version = Some(5);

        let record = ProductRecord::for_insert(&input);
        assert_eq!(record.id, None);
        assert_eq!(record.version, None);
    }
}
