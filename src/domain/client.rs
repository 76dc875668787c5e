use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sports brand that owns campaigns and products.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Client {
    /// Unique identifier of the client.
    pub id: i32,
    /// Display name of the brand.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Row version used for optimistic concurrency checks.
    pub version: i32,
    /// Timestamp for when the client record was created (UTC).
    pub created_at: NaiveDateTime,
    /// Timestamp of the last successful mutation (UTC).
    pub updated_at: Option<NaiveDateTime>,
}

/// Payload required to insert a new client.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub description: Option<String>,
    /// Creation time captured when the payload was built.
    pub created_at: NaiveDateTime,
}

impl NewClient {
    /// Build a new client payload stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Attach a description to the client payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update of a client. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateClient {
    /// Create a patch with no changes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the client name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the client description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Read-only view of a client with ownership aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientProjection {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Number of campaigns owned by the client.
    pub campaign_count: usize,
    /// Number of products owned by the client.
    pub product_count: usize,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ClientProjection {
    /// Combine a stored client with its aggregate counts.
    pub fn new(client: Client, campaign_count: usize, product_count: usize) -> Self {
        Self {
            id: client.id,
            name: client.name,
            description: client.description,
            campaign_count,
            product_count,
            version: client.version,
            created_at: client.created_at.and_utc(),
            updated_at: client.updated_at.map(|value| value.and_utc()),
        }
    }
}
