use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Association row linking a campaign to a product promoted by it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CampaignProduct {
    pub campaign_id: i32,
    pub product_id: i32,
    /// Time the product was added to the campaign (UTC).
    pub added_at: NaiveDateTime,
}

impl CampaignProduct {
    /// Build an association row stamped with the current time.
    pub fn new(campaign_id: i32, product_id: i32) -> Self {
        Self {
            campaign_id,
            product_id,
            added_at: Utc::now().naive_utc(),
        }
    }
}
