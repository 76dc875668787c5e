use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::domain::campaign::Campaign as DomainCampaign;
use crate::domain::campaign_product::CampaignProduct as DomainCampaignProduct;
use crate::domain::product::Product as DomainProduct;
use crate::models::campaign::Campaign as DbCampaign;
use crate::models::campaign_product::CampaignProduct as DbCampaignProduct;
use crate::models::product::Product as DbProduct;
use crate::repository::constraints;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AssociationReader, AssociationWriter, DieselRepository};

impl AssociationReader for DieselRepository {
    fn list_products_of(&self, campaign_id: i32) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{campaign_products, campaigns, products};

        let mut conn = self.conn()?;

        let found = campaigns::table
            .filter(campaigns::id.eq(campaign_id))
            .count()
            .get_result::<i64>(&mut conn)?;
        if found == 0 {
            return Err(RepositoryError::NotFound);
        }

        let rows = campaign_products::table
            .inner_join(products::table)
            .filter(campaign_products::campaign_id.eq(campaign_id))
            .order(link_order())
            .select(DbProduct::as_select())
            .load::<DbProduct>(&mut conn)?;

        Ok(rows.into_iter().map(DomainProduct::from).collect())
    }

    fn list_campaigns_of(&self, product_id: i32) -> RepositoryResult<Vec<DomainCampaign>> {
        use crate::schema::{campaign_products, campaigns, products};

        let mut conn = self.conn()?;

        let found = products::table
            .filter(products::id.eq(product_id))
            .count()
            .get_result::<i64>(&mut conn)?;
        if found == 0 {
            return Err(RepositoryError::NotFound);
        }

        let rows = campaign_products::table
            .inner_join(campaigns::table)
            .filter(campaign_products::product_id.eq(product_id))
            .order(link_order())
            .select(DbCampaign::as_select())
            .load::<DbCampaign>(&mut conn)?;

        Ok(rows.into_iter().map(DomainCampaign::from).collect())
    }
}

impl AssociationWriter for DieselRepository {
    fn link_product(
        &self,
        campaign_id: i32,
        product_id: i32,
    ) -> RepositoryResult<DomainCampaignProduct> {
        use crate::schema::campaign_products;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCampaignProduct, RepositoryError, _>(|conn| {
            let client_id = constraints::campaign_owner(conn, campaign_id)?;
            validate_products_for_client(conn, client_id, &[product_id])?;
            insert_links(conn, campaign_id, &[product_id])?;

            let row = campaign_products::table
                .find((campaign_id, product_id))
                .first::<DbCampaignProduct>(conn)?;
            Ok(row.into())
        })
    }

    fn link_products(&self, campaign_id: i32, product_ids: &[i32]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.immediate_transaction::<usize, RepositoryError, _>(|conn| {
            let client_id = constraints::campaign_owner(conn, campaign_id)?;
            let product_ids = validate_products_for_client(conn, client_id, product_ids)?;
            insert_links(conn, campaign_id, &product_ids)
        })
    }

    fn unlink_product(&self, campaign_id: i32, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::campaign_products;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(campaign_products::table.find((campaign_id, product_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Sort key following the order links were inserted in.
///
/// `campaign_products` keeps its implicit rowid, which only grows for new rows,
/// so it is stable even when several links share one `added_at`.
pub(crate) fn link_order() -> SqlLiteral<BigInt> {
    sql::<BigInt>("campaign_products.rowid")
}

/// Check every product against the owning client before any row is written.
///
/// Returns the ids with duplicates removed, preserving the first occurrence.
pub(crate) fn validate_products_for_client(
    conn: &mut SqliteConnection,
    client_id: i32,
    product_ids: &[i32],
) -> RepositoryResult<Vec<i32>> {
    let mut unique = Vec::with_capacity(product_ids.len());
    for &product_id in product_ids {
        if !unique.contains(&product_id) {
            unique.push(product_id);
        }
    }

    for &product_id in &unique {
        let owner = constraints::product_owner(conn, product_id)?;
        if let Err(err) = constraints::same_owner(client_id, product_id, owner) {
            log::warn!("Rejected link of product {product_id} owned by client {owner} to client {client_id}");
            return Err(err);
        }
    }

    Ok(unique)
}

/// Insert association rows, ignoring pairs that already exist.
pub(crate) fn insert_links(
    conn: &mut SqliteConnection,
    campaign_id: i32,
    product_ids: &[i32],
) -> RepositoryResult<usize> {
    use crate::schema::campaign_products;

    let mut inserted = 0;
    for &product_id in product_ids {
        let row = DbCampaignProduct::from(&DomainCampaignProduct::new(campaign_id, product_id));
        inserted += diesel::insert_or_ignore_into(campaign_products::table)
            .values(&row)
            .execute(conn)?;
    }

    Ok(inserted)
}
