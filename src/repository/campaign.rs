use chrono::Utc;
use diesel::prelude::*;

use crate::domain::campaign::{
    Campaign as DomainCampaign, CampaignListQuery, NewCampaign as DomainNewCampaign,
    UpdateCampaign as DomainUpdateCampaign,
};
use crate::models::campaign::{
    Campaign as DbCampaign, NewCampaign as DbNewCampaign, UpdateCampaign as DbUpdateCampaign,
};
use crate::repository::association::{insert_links, validate_products_for_client};
use crate::repository::constraints;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CampaignReader, CampaignWriter, DieselRepository};

impl CampaignReader for DieselRepository {
    fn get_campaign_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCampaign>> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let campaign = campaigns::table
            .filter(campaigns::id.eq(id))
            .first::<DbCampaign>(&mut conn)
            .optional()?;

        Ok(campaign.map(DomainCampaign::from))
    }

    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<DomainCampaign>> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let mut items = campaigns::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(client_id) = query.client_id {
            items = items.filter(campaigns::client_id.eq(client_id));
        }

        let campaigns = items
            .order(campaigns::id.asc())
            .load::<DbCampaign>(&mut conn)?;

        Ok(campaigns.into_iter().map(DomainCampaign::from).collect())
    }
}

impl CampaignWriter for DieselRepository {
    fn create_campaign(
        &self,
        new_campaign: &DomainNewCampaign,
    ) -> RepositoryResult<DomainCampaign> {
        use crate::schema::campaigns;

        constraints::check_new_campaign(new_campaign)?;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCampaign, RepositoryError, _>(|conn| {
            constraints::client_exists(conn, new_campaign.client_id)?;
            let product_ids =
                validate_products_for_client(conn, new_campaign.client_id, &new_campaign.product_ids)?;

            let insertable = DbNewCampaign::from(new_campaign);
            let created = diesel::insert_into(campaigns::table)
                .values(&insertable)
                .get_result::<DbCampaign>(conn)?;

            if !product_ids.is_empty() {
                insert_links(conn, created.id, &product_ids)?;
            }

            Ok(created.into())
        })
    }

    fn update_campaign(
        &self,
        campaign_id: i32,
        expected_version: i32,
        updates: &DomainUpdateCampaign,
    ) -> RepositoryResult<DomainCampaign> {
        use crate::schema::campaigns;

        constraints::check_campaign_update(updates)?;

        let mut conn = self.conn()?;
        let changeset = DbUpdateCampaign::new(updates, Utc::now().naive_utc());

        let target = campaigns::table
            .filter(campaigns::id.eq(campaign_id))
            .filter(campaigns::row_version.eq(expected_version));

        let updated = diesel::update(target)
            .set((
                &changeset,
                campaigns::row_version.eq(campaigns::row_version + 1),
            ))
            .get_result::<DbCampaign>(&mut conn)
            .optional()?;

        updated
            .map(DomainCampaign::from)
            .ok_or(RepositoryError::ConcurrencyConflict)
    }

    fn delete_campaign(&self, campaign_id: i32) -> RepositoryResult<()> {
        use crate::schema::{campaign_products, campaigns};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(
                campaign_products::table.filter(campaign_products::campaign_id.eq(campaign_id)),
            )
            .execute(conn)?;

            let deleted = diesel::delete(campaigns::table.filter(campaigns::id.eq(campaign_id)))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}
