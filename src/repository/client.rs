use chrono::Utc;
use diesel::dsl::{exists, select};
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::repository::constraints;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<DomainClient>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::id.eq(id))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(DomainClient::from))
    }

    fn list_clients(&self) -> RepositoryResult<Vec<DomainClient>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let clients = clients::table
            .order(clients::id.asc())
            .load::<DbClient>(&mut conn)?;

        Ok(clients.into_iter().map(DomainClient::from).collect())
    }

    fn count_clients(&self) -> RepositoryResult<usize> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let total = clients::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &DomainNewClient) -> RepositoryResult<DomainClient> {
        use crate::schema::clients;

        constraints::check_new_client(new_client)?;

        let mut conn = self.conn()?;
        let insertable = DbNewClient::from(new_client);
        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(created.into())
    }

    fn update_client(
        &self,
        client_id: i32,
        expected_version: i32,
        updates: &DomainUpdateClient,
    ) -> RepositoryResult<DomainClient> {
        use crate::schema::clients;

        constraints::check_client_update(updates)?;

        let mut conn = self.conn()?;
        let changeset = DbUpdateClient::new(updates, Utc::now().naive_utc());

        let target = clients::table
            .filter(clients::id.eq(client_id))
            .filter(clients::row_version.eq(expected_version));

        let updated = diesel::update(target)
            .set((&changeset, clients::row_version.eq(clients::row_version + 1)))
            .get_result::<DbClient>(&mut conn)
            .optional()?;

        // No row matched: either deleted or bumped by another writer.
        updated
            .map(DomainClient::from)
            .ok_or(RepositoryError::ConcurrencyConflict)
    }

    fn delete_client(&self, client_id: i32) -> RepositoryResult<()> {
        use crate::schema::{campaign_products, campaigns, clients, products};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            let found: bool =
                select(exists(clients::table.filter(clients::id.eq(client_id)))).get_result(conn)?;
            if !found {
                return Err(RepositoryError::NotFound);
            }

            let campaign_ids = campaigns::table
                .filter(campaigns::client_id.eq(client_id))
                .select(campaigns::id)
                .load::<i32>(conn)?;
            let product_ids = products::table
                .filter(products::client_id.eq(client_id))
                .select(products::id)
                .load::<i32>(conn)?;

            let links = diesel::delete(
                campaign_products::table.filter(
                    campaign_products::campaign_id
                        .eq_any(campaign_ids.as_slice())
                        .or(campaign_products::product_id.eq_any(product_ids.as_slice())),
                ),
            )
            .execute(conn)?;
            let campaigns_deleted =
                diesel::delete(campaigns::table.filter(campaigns::client_id.eq(client_id)))
                    .execute(conn)?;
            let products_deleted =
                diesel::delete(products::table.filter(products::client_id.eq(client_id)))
                    .execute(conn)?;

            let deleted =
                diesel::delete(clients::table.filter(clients::id.eq(client_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            log::debug!(
                "Deleted client {client_id} with {campaigns_deleted} campaign(s), {products_deleted} product(s) and {links} link(s)"
            );
            Ok(())
        })
    }
}
