use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<String>,
    pub row_version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub sku: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub category: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub sku: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub category: Option<&'a str>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            name: value.name,
            description: value.description,
            sku: value.sku,
            price_cents: value.price_cents,
            category: value.category,
            version: value.row_version,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            client_id: value.client_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            sku: value.sku.as_deref(),
            price_cents: value.price_cents,
            category: value.category.as_deref(),
            created_at: value.created_at,
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn new(updates: &'a DomainUpdateProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            name: updates.name.as_deref(),
            description: updates.description.as_deref(),
            sku: updates.sku.as_deref(),
            price_cents: updates.price_cents,
            category: updates.category.as_deref(),
            updated_at: Some(updated_at),
        }
    }
}
