use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::campaign::{NewCampaign, UpdateCampaign};
use crate::domain::money::AmountError;
use crate::domain::{DESCRIPTION_MAX_LEN, NAME_MAX_LEN, TARGET_AUDIENCE_MAX_LEN};
use crate::forms::{
    AmountInput, optional_inline_text, optional_multiline_text, parse_timestamp,
    sanitize_inline_text,
};

const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;
const TARGET_AUDIENCE_MAX_LEN_VALIDATOR: u64 = TARGET_AUDIENCE_MAX_LEN as u64;

/// Result type returned by the campaign form helpers.
pub type CampaignFormResult<T> = Result<T, CampaignFormError>;

/// Errors that can occur while processing campaign forms.
#[derive(Debug, Error)]
pub enum CampaignFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("campaign name cannot be empty")]
    EmptyName,
    #[error("`{field}` is not a valid date: `{value}`")]
    InvalidDate { field: &'static str, value: String },
    #[error("start date must not be after end date")]
    InvalidDateRange,
    #[error("invalid `{field}`: {source}")]
    InvalidAmount {
        field: &'static str,
        #[source]
        source: AmountError,
    },
}

/// Payload for creating a campaign, optionally linking existing products.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCampaignForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[validate(length(max = TARGET_AUDIENCE_MAX_LEN_VALIDATOR))]
    pub target_audience: Option<String>,
    pub budget: Option<AmountInput>,
    pub client_id: i32,
    /// Products owned by the same client to link on creation.
    #[serde(default)]
    pub product_ids: Vec<i32>,
}

impl AddCampaignForm {
    /// Sanitizes and then validates the payload into a domain `NewCampaign`.
    pub fn into_new_campaign(mut self) -> CampaignFormResult<NewCampaign> {
        self.name = sanitize_inline_text(&self.name);
        self.description = optional_multiline_text(self.description.as_deref());
        self.target_audience = optional_inline_text(self.target_audience.as_deref());
        if self.name.is_empty() {
            return Err(CampaignFormError::EmptyName);
        }

        self.validate()?;

        let start_date = parse_date("startDate", &self.start_date)?;
        let end_date = parse_date("endDate", &self.end_date)?;
        if start_date > end_date {
            return Err(CampaignFormError::InvalidDateRange);
        }

        let mut campaign = NewCampaign::new(self.client_id, self.name, start_date, end_date)
            .with_product_ids(self.product_ids);

        if let Some(description) = self.description {
            campaign = campaign.with_description(description);
        }
        if let Some(audience) = self.target_audience {
            campaign = campaign.with_target_audience(audience);
        }
        if let Some(budget) = parse_budget(self.budget.as_ref())? {
            campaign = campaign.with_budget_cents(budget);
        }

        Ok(campaign)
    }
}

/// Partial update payload for a campaign. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditCampaignForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[validate(length(max = TARGET_AUDIENCE_MAX_LEN_VALIDATOR))]
    pub target_audience: Option<String>,
    pub budget: Option<AmountInput>,
    /// Row version the caller last saw.
    pub version: Option<i32>,
}

impl EditCampaignForm {
    /// Sanitizes and then validates the payload; blank values are treated as absent.
    pub fn into_update_campaign(mut self) -> CampaignFormResult<UpdateCampaign> {
        self.name = optional_inline_text(self.name.as_deref());
        self.description = optional_multiline_text(self.description.as_deref());
        self.target_audience = optional_inline_text(self.target_audience.as_deref());

        self.validate()?;

        let mut updates = UpdateCampaign::new();

        if let Some(name) = self.name {
            updates = updates.name(name);
        }
        if let Some(description) = self.description {
            updates = updates.description(description);
        }
        if let Some(value) = self.start_date.as_deref().filter(|v| !v.trim().is_empty()) {
            updates = updates.start_date(parse_date("startDate", value)?);
        }
        if let Some(value) = self.end_date.as_deref().filter(|v| !v.trim().is_empty()) {
            updates = updates.end_date(parse_date("endDate", value)?);
        }
        if let Some(audience) = self.target_audience {
            updates = updates.target_audience(audience);
        }
        if let Some(budget) = parse_budget(self.budget.as_ref())? {
            updates = updates.budget_cents(budget);
        }

        Ok(updates)
    }
}

/// Payload for linking several products to an existing campaign.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkProductsForm {
    #[validate(length(min = 1))]
    pub product_ids: Vec<i32>,
}

fn parse_date(field: &'static str, value: &str) -> CampaignFormResult<chrono::NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| CampaignFormError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_budget(budget: Option<&AmountInput>) -> CampaignFormResult<Option<i64>> {
    match budget {
        Some(amount) => amount
            .to_cents()
            .map_err(|source| CampaignFormError::InvalidAmount {
                field: "budget",
                source,
            }),
        None => Ok(None),
    }
}
