use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::money::AmountError;
use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::{CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, NAME_MAX_LEN, SKU_MAX_LEN};
use crate::forms::{AmountInput, optional_inline_text, optional_multiline_text, sanitize_inline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;
/// Maximum allowed length for a SKU.
const SKU_MAX_LEN_VALIDATOR: u64 = SKU_MAX_LEN as u64;
const CATEGORY_MAX_LEN_VALIDATOR: u64 = CATEGORY_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] AmountError),
}

/// Form payload for creating a product under a client.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional longer description.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    /// Optional SKU supplied by the user.
    #[validate(length(max = SKU_MAX_LEN_VALIDATOR))]
    pub sku: Option<String>,
    pub price: Option<AmountInput>,
    #[validate(length(max = CATEGORY_MAX_LEN_VALIDATOR))]
    pub category: Option<String>,
    pub client_id: i32,
}

impl AddProductForm {
    /// Sanitizes and then validates the payload into a domain `NewProduct`.
    pub fn into_new_product(mut self) -> ProductFormResult<NewProduct> {
        self.name = sanitize_inline_text(&self.name);
        self.description = optional_multiline_text(self.description.as_deref());
        self.sku = optional_sku(self.sku.as_deref());
        self.category = optional_inline_text(self.category.as_deref());
        if self.name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        self.validate()?;

        let mut new_product = NewProduct::new(self.client_id, self.name);

        if let Some(sku) = self.sku {
            new_product = new_product.with_sku(sku);
        }
        if let Some(description) = self.description {
            new_product = new_product.with_description(description);
        }
        if let Some(category) = self.category {
            new_product = new_product.with_category(category);
        }
        if let Some(price) = self.price.as_ref().map(AmountInput::to_cents).transpose()?.flatten() {
            new_product = new_product.with_price_cents(price);
        }

        Ok(new_product)
    }
}

/// Form payload emitted when editing an existing product.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditProductForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    #[validate(length(max = SKU_MAX_LEN_VALIDATOR))]
    pub sku: Option<String>,
    pub price: Option<AmountInput>,
    #[validate(length(max = CATEGORY_MAX_LEN_VALIDATOR))]
    pub category: Option<String>,
    /// Row version the caller last saw.
    pub version: Option<i32>,
}

impl EditProductForm {
    /// Sanitizes and then validates the payload; blank values are treated as absent.
    pub fn into_update_product(mut self) -> ProductFormResult<UpdateProduct> {
        self.name = optional_inline_text(self.name.as_deref());
        self.description = optional_multiline_text(self.description.as_deref());
        self.sku = optional_sku(self.sku.as_deref());
        self.category = optional_inline_text(self.category.as_deref());

        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(name) = self.name {
            updates = updates.name(name);
        }
        if let Some(description) = self.description {
            updates = updates.description(description);
        }
        if let Some(sku) = self.sku {
            updates = updates.sku(sku);
        }
        if let Some(price) = self.price.as_ref().map(AmountInput::to_cents).transpose()?.flatten() {
            updates = updates.price_cents(price);
        }
        if let Some(category) = self.category {
            updates = updates.category(category);
        }

        Ok(updates)
    }
}

fn optional_sku(input: Option<&str>) -> Option<String> {
    input.map(sanitize_sku).filter(|value| !value.is_empty())
}

fn sanitize_sku(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
}
