use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::{DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
use crate::forms::{optional_inline_text, optional_multiline_text, sanitize_inline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the client form helpers.
pub type ClientFormResult<T> = Result<T, ClientFormError>;

/// Errors that can occur while processing client forms.
#[derive(Debug, Error)]
pub enum ClientFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("client name cannot be empty")]
    EmptyName,
}

/// Payload for creating a client.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddClientForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
}

impl AddClientForm {
    /// Sanitizes and then validates the payload into a domain `NewClient`.
    pub fn into_new_client(mut self) -> ClientFormResult<NewClient> {
        self.name = sanitize_inline_text(&self.name);
        self.description = optional_multiline_text(self.description.as_deref());
        if self.name.is_empty() {
            return Err(ClientFormError::EmptyName);
        }

        self.validate()?;

        let mut new_client = NewClient::new(self.name);
        if let Some(description) = self.description {
            new_client = new_client.with_description(description);
        }

        Ok(new_client)
    }
}

/// Partial update payload for a client. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditClientForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    /// Row version the caller last saw.
    pub version: Option<i32>,
}

impl EditClientForm {
    /// Validates the payload; blank values are treated as absent.
    pub fn into_update_client(mut self) -> ClientFormResult<UpdateClient> {
        self.name = optional_inline_text(self.name.as_deref());
        self.description = optional_multiline_text(self.description.as_deref());

        self.validate()?;

        let mut updates = UpdateClient::new();
        if let Some(name) = self.name {
            updates = updates.name(name);
        }
        if let Some(description) = self.description {
            updates = updates.description(description);
        }

        Ok(updates)
    }
}
