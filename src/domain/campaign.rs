use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::money::format_cents;

/// Marketing campaign run for a client.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Campaign {
    /// Unique identifier of the campaign.
    pub id: i32,
    /// Owning client identifier.
    pub client_id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Start of the campaign (UTC).
    pub start_date: NaiveDateTime,
    /// End of the campaign (UTC).
    pub end_date: NaiveDateTime,
    pub target_audience: Option<String>,
    /// Budget in cents.
    pub budget_cents: Option<i64>,
    /// Row version used for optimistic concurrency checks.
    pub version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Payload required to insert a new campaign, optionally linking products.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub client_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub target_audience: Option<String>,
    pub budget_cents: Option<i64>,
    /// Products to associate with the campaign in the same unit of work.
    pub product_ids: Vec<i32>,
    pub created_at: NaiveDateTime,
}

impl NewCampaign {
    /// Build a new campaign payload stamped with the current time.
    pub fn new(
        client_id: i32,
        name: impl Into<String>,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Self {
        Self {
            client_id,
            name: name.into(),
            description: None,
            start_date,
            end_date,
            target_audience: None,
            budget_cents: None,
            product_ids: Vec::new(),
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_target_audience(mut self, target_audience: impl Into<String>) -> Self {
        self.target_audience = Some(target_audience.into());
        self
    }

    pub fn with_budget_cents(mut self, budget_cents: i64) -> Self {
        self.budget_cents = Some(budget_cents);
        self
    }

    /// Products to link once the campaign row exists.
    pub fn with_product_ids(mut self, product_ids: impl Into<Vec<i32>>) -> Self {
        self.product_ids = product_ids.into();
        self
    }
}

/// Partial update of a campaign. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub target_audience: Option<String>,
    pub budget_cents: Option<i64>,
}

impl UpdateCampaign {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn start_date(mut self, start_date: NaiveDateTime) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn end_date(mut self, end_date: NaiveDateTime) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn target_audience(mut self, target_audience: impl Into<String>) -> Self {
        self.target_audience = Some(target_audience.into());
        self
    }

    pub fn budget_cents(mut self, budget_cents: i64) -> Self {
        self.budget_cents = Some(budget_cents);
        self
    }

    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.target_audience.is_none()
            && self.budget_cents.is_none()
    }
}

/// Query definition used to list campaigns.
#[derive(Debug, Clone, Default)]
pub struct CampaignListQuery {
    /// Restrict the results to campaigns owned by this client.
    pub client_id: Option<i32>,
}

impl CampaignListQuery {
    /// Construct a query that targets every campaign.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by owning client.
    pub fn client(mut self, client_id: i32) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

/// Read-only view of a campaign joined with its client and product count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignProjection {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_audience: Option<String>,
    /// Budget rendered as a decimal string.
    pub budget: Option<String>,
    pub client_id: i32,
    pub client_name: String,
    /// Number of products associated with the campaign.
    pub product_count: usize,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CampaignProjection {
    pub fn new(campaign: Campaign, client_name: String, product_count: usize) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name,
            description: campaign.description,
            start_date: campaign.start_date.and_utc(),
            end_date: campaign.end_date.and_utc(),
            target_audience: campaign.target_audience,
            budget: campaign.budget_cents.map(format_cents),
            client_id: campaign.client_id,
            client_name,
            product_count,
            version: campaign.version,
            created_at: campaign.created_at.and_utc(),
            updated_at: campaign.updated_at.map(|value| value.and_utc()),
        }
    }
}
