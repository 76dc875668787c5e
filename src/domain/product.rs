use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::money::format_cents;

/// Product owned by a client and promoted through campaigns.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning client identifier.
    pub client_id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional stock keeping unit, unique across all products.
    pub sku: Option<String>,
    /// Price in cents.
    pub price_cents: Option<i64>,
    pub category: Option<String>,
    /// Row version used for optimistic concurrency checks.
    pub version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Payload required to insert a new product for a client.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub client_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload stamped with the current time.
    pub fn new(client_id: i32, name: impl Into<String>) -> Self {
        Self {
            client_id,
            name: name.into(),
            description: None,
            sku: None,
            price_cents: None,
            category: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Attach an SKU identifier to the product payload.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Partial update of a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<String>,
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Update the product price.
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.sku.is_none()
            && self.price_cents.is_none()
            && self.category.is_none()
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict the results to products owned by this client.
    pub client_id: Option<i32>,
    /// Optional exact category filter.
    pub category: Option<String>,
}

impl ProductListQuery {
    /// Construct a query that targets every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by owning client.
    pub fn client(mut self, client_id: i32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Filter the results by an exact category match.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Read-only view of a product joined with its client and linked campaigns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductProjection {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    /// Price rendered as a decimal string.
    pub price: Option<String>,
    pub category: Option<String>,
    pub client_id: i32,
    pub client_name: String,
    /// Names of linked campaigns in the order they were linked.
    pub campaign_names: Vec<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductProjection {
    pub fn new(product: Product, client_name: String, campaign_names: Vec<String>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            sku: product.sku,
            price: product.price_cents.map(format_cents),
            category: product.category,
            client_id: product.client_id,
            client_name,
            campaign_names,
            version: product.version,
            created_at: product.created_at.and_utc(),
            updated_at: product.updated_at.map(|value| value.and_utc()),
        }
    }
}
