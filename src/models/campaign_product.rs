use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::campaign_product::CampaignProduct as DomainCampaignProduct;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::campaign_products)]
#[diesel(primary_key(campaign_id, product_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CampaignProduct {
    pub campaign_id: i32,
    pub product_id: i32,
    pub added_at: NaiveDateTime,
}

impl From<CampaignProduct> for DomainCampaignProduct {
    fn from(value: CampaignProduct) -> Self {
        Self {
            campaign_id: value.campaign_id,
            product_id: value.product_id,
            added_at: value.added_at,
        }
    }
}

impl From<&DomainCampaignProduct> for CampaignProduct {
    fn from(value: &DomainCampaignProduct) -> Self {
        Self {
            campaign_id: value.campaign_id,
            product_id: value.product_id,
            added_at: value.added_at,
        }
    }
}
