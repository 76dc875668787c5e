use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub row_version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
pub struct NewClient<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

/// Changeset with `None` fields skipped, so only supplied values are written.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
pub struct UpdateClient<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<Client> for DomainClient {
    fn from(value: Client) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            version: value.row_version,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(value: &'a DomainNewClient) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            created_at: value.created_at,
        }
    }
}

impl<'a> UpdateClient<'a> {
    /// Build the changeset for `updates`, stamping `updated_at`.
    pub fn new(updates: &'a DomainUpdateClient, updated_at: NaiveDateTime) -> Self {
        Self {
            name: updates.name.as_deref(),
            description: updates.description.as_deref(),
            updated_at: Some(updated_at),
        }
    }
}
