use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::campaign::{
    Campaign as DomainCampaign, NewCampaign as DomainNewCampaign,
    UpdateCampaign as DomainUpdateCampaign,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::campaigns)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Campaign {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub target_audience: Option<String>,
    pub budget_cents: Option<i64>,
    pub row_version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct NewCampaign<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub target_audience: Option<&'a str>,
    pub budget_cents: Option<i64>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct UpdateCampaign<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub target_audience: Option<&'a str>,
    pub budget_cents: Option<i64>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<Campaign> for DomainCampaign {
    fn from(value: Campaign) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            name: value.name,
            description: value.description,
            start_date: value.start_date,
            end_date: value.end_date,
            target_audience: value.target_audience,
            budget_cents: value.budget_cents,
            version: value.row_version,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCampaign> for NewCampaign<'a> {
    fn from(value: &'a DomainNewCampaign) -> Self {
        Self {
            client_id: value.client_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            start_date: value.start_date,
            end_date: value.end_date,
            target_audience: value.target_audience.as_deref(),
            budget_cents: value.budget_cents,
            created_at: value.created_at,
        }
    }
}

impl<'a> UpdateCampaign<'a> {
    pub fn new(updates: &'a DomainUpdateCampaign, updated_at: NaiveDateTime) -> Self {
        Self {
            name: updates.name.as_deref(),
            description: updates.description.as_deref(),
            start_date: updates.start_date,
            end_date: updates.end_date,
            target_audience: updates.target_audience.as_deref(),
            budget_cents: updates.budget_cents,
            updated_at: Some(updated_at),
        }
    }
}
