use chrono::Utc;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
    UpdateProduct as DomainUpdateProduct,
};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::constraints;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(client_id) = query.client_id {
            items = items.filter(products::client_id.eq(client_id));
        }

        if let Some(category) = query.category.as_ref() {
            items = items.filter(products::category.eq(category));
        }

        let products = items.order(products::id.asc()).load::<DbProduct>(&mut conn)?;

        Ok(products.into_iter().map(DomainProduct::from).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        constraints::check_new_product(new_product)?;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainProduct, RepositoryError, _>(|conn| {
            constraints::client_exists(conn, new_product.client_id)?;
            constraints::sku_available(conn, new_product.sku.as_deref(), None)?;

            let db_new = DbNewProduct::from(new_product);
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            Ok(created.into())
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        expected_version: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        constraints::check_product_update(updates)?;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainProduct, RepositoryError, _>(|conn| {
            constraints::sku_available(conn, updates.sku.as_deref(), Some(product_id))?;

            let db_updates = DbUpdateProduct::new(updates, Utc::now().naive_utc());
            let target = products::table
                .filter(products::id.eq(product_id))
                .filter(products::row_version.eq(expected_version));

            let updated = diesel::update(target)
                .set((
                    &db_updates,
                    products::row_version.eq(products::row_version + 1),
                ))
                .get_result::<DbProduct>(conn)
                .optional()?;

            updated
                .map(DomainProduct::from)
                .ok_or(RepositoryError::ConcurrencyConflict)
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::{campaign_products, products};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(
                campaign_products::table.filter(campaign_products::product_id.eq(product_id)),
            )
            .execute(conn)?;

            let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}
