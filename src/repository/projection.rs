//! Read projections: stored rows joined with owner names and aggregate counts.
//!
//! Each projection is assembled inside a single read transaction so counts and
//! names come from one consistent snapshot.

use std::collections::HashMap;

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::campaign::{CampaignListQuery, CampaignProjection};
use crate::domain::client::ClientProjection;
use crate::domain::product::{ProductListQuery, ProductProjection};
use crate::models::campaign::Campaign as DbCampaign;
use crate::models::client::Client as DbClient;
use crate::models::product::Product as DbProduct;
use crate::repository::association::link_order;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProjectionReader};

impl ProjectionReader for DieselRepository {
    fn get_client_projection(&self, id: i32) -> RepositoryResult<Option<ClientProjection>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        conn.transaction::<Option<ClientProjection>, RepositoryError, _>(|conn| {
            let client = clients::table
                .filter(clients::id.eq(id))
                .first::<DbClient>(conn)
                .optional()?;

            let Some(client) = client else {
                return Ok(None);
            };

            Ok(build_client_projections(conn, vec![client])?.pop())
        })
    }

    fn list_client_projections(&self) -> RepositoryResult<Vec<ClientProjection>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        conn.transaction::<Vec<ClientProjection>, RepositoryError, _>(|conn| {
            let clients = clients::table
                .order(clients::id.asc())
                .load::<DbClient>(conn)?;
            build_client_projections(conn, clients)
        })
    }

    fn get_campaign_projection(&self, id: i32) -> RepositoryResult<Option<CampaignProjection>> {
        use crate::schema::{campaigns, clients};

        let mut conn = self.conn()?;

        conn.transaction::<Option<CampaignProjection>, RepositoryError, _>(|conn| {
            let row = campaigns::table
                .inner_join(clients::table)
                .filter(campaigns::id.eq(id))
                .select((DbCampaign::as_select(), clients::name))
                .first::<(DbCampaign, String)>(conn)
                .optional()?;

            let Some(row) = row else {
                return Ok(None);
            };

            Ok(build_campaign_projections(conn, vec![row])?.pop())
        })
    }

    fn list_campaign_projections(
        &self,
        query: CampaignListQuery,
    ) -> RepositoryResult<Vec<CampaignProjection>> {
        use crate::schema::{campaigns, clients};

        let mut conn = self.conn()?;

        conn.transaction::<Vec<CampaignProjection>, RepositoryError, _>(|conn| {
            let mut items = campaigns::table
                .inner_join(clients::table)
                .select((DbCampaign::as_select(), clients::name))
                .into_boxed::<Sqlite>();

            if let Some(client_id) = query.client_id {
                items = items.filter(campaigns::client_id.eq(client_id));
            }

            let rows = items
                .order(campaigns::id.asc())
                .load::<(DbCampaign, String)>(conn)?;
            build_campaign_projections(conn, rows)
        })
    }

    fn get_product_projection(&self, id: i32) -> RepositoryResult<Option<ProductProjection>> {
        use crate::schema::{clients, products};

        let mut conn = self.conn()?;

        conn.transaction::<Option<ProductProjection>, RepositoryError, _>(|conn| {
            let row = products::table
                .inner_join(clients::table)
                .filter(products::id.eq(id))
                .select((DbProduct::as_select(), clients::name))
                .first::<(DbProduct, String)>(conn)
                .optional()?;

            let Some(row) = row else {
                return Ok(None);
            };

            Ok(build_product_projections(conn, vec![row])?.pop())
        })
    }

    fn list_product_projections(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<Vec<ProductProjection>> {
        use crate::schema::{clients, products};

        let mut conn = self.conn()?;

        conn.transaction::<Vec<ProductProjection>, RepositoryError, _>(|conn| {
            let mut items = products::table
                .inner_join(clients::table)
                .select((DbProduct::as_select(), clients::name))
                .into_boxed::<Sqlite>();

            if let Some(client_id) = query.client_id {
                items = items.filter(products::client_id.eq(client_id));
            }

            if let Some(category) = query.category.as_ref() {
                items = items.filter(products::category.eq(category));
            }

            let rows = items
                .order(products::id.asc())
                .load::<(DbProduct, String)>(conn)?;
            build_product_projections(conn, rows)
        })
    }
}

fn build_client_projections(
    conn: &mut SqliteConnection,
    clients: Vec<DbClient>,
) -> RepositoryResult<Vec<ClientProjection>> {
    use crate::schema::{campaigns, products};

    if clients.is_empty() {
        return Ok(Vec::new());
    }

    let client_ids: Vec<i32> = clients.iter().map(|client| client.id).collect();

    let campaign_counts = to_count_map(
        campaigns::table
            .filter(campaigns::client_id.eq_any(&client_ids))
            .group_by(campaigns::client_id)
            .select((campaigns::client_id, count_star()))
            .load::<(i32, i64)>(conn)?,
    );
    let product_counts = to_count_map(
        products::table
            .filter(products::client_id.eq_any(&client_ids))
            .group_by(products::client_id)
            .select((products::client_id, count_star()))
            .load::<(i32, i64)>(conn)?,
    );

    Ok(clients
        .into_iter()
        .map(|client| {
            let campaign_count = campaign_counts.get(&client.id).copied().unwrap_or(0);
            let product_count = product_counts.get(&client.id).copied().unwrap_or(0);
            ClientProjection::new(client.into(), campaign_count, product_count)
        })
        .collect())
}

fn build_campaign_projections(
    conn: &mut SqliteConnection,
    rows: Vec<(DbCampaign, String)>,
) -> RepositoryResult<Vec<CampaignProjection>> {
    use crate::schema::campaign_products;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let campaign_ids: Vec<i32> = rows.iter().map(|(campaign, _)| campaign.id).collect();

    let product_counts = to_count_map(
        campaign_products::table
            .filter(campaign_products::campaign_id.eq_any(&campaign_ids))
            .group_by(campaign_products::campaign_id)
            .select((campaign_products::campaign_id, count_star()))
            .load::<(i32, i64)>(conn)?,
    );

    Ok(rows
        .into_iter()
        .map(|(campaign, client_name)| {
            let product_count = product_counts.get(&campaign.id).copied().unwrap_or(0);
            CampaignProjection::new(campaign.into(), client_name, product_count)
        })
        .collect())
}

fn build_product_projections(
    conn: &mut SqliteConnection,
    rows: Vec<(DbProduct, String)>,
) -> RepositoryResult<Vec<ProductProjection>> {
    use crate::schema::{campaign_products, campaigns};

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = rows.iter().map(|(product, _)| product.id).collect();

    let links = campaign_products::table
        .inner_join(campaigns::table)
        .filter(campaign_products::product_id.eq_any(&product_ids))
        .order(link_order())
        .select((campaign_products::product_id, campaigns::name))
        .load::<(i32, String)>(conn)?;

    let mut campaign_names: HashMap<i32, Vec<String>> = HashMap::new();
    for (product_id, name) in links {
        campaign_names.entry(product_id).or_default().push(name);
    }

    Ok(rows
        .into_iter()
        .map(|(product, client_name)| {
            let names = campaign_names.remove(&product.id).unwrap_or_default();
            ProductProjection::new(product.into(), client_name, names)
        })
        .collect())
}

fn to_count_map(rows: Vec<(i32, i64)>) -> HashMap<i32, usize> {
    rows.into_iter()
        .map(|(id, count)| (id, count as usize))
        .collect()
}
