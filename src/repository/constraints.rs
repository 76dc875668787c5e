//! Write-time integrity checks for the entity store.
//!
//! Every check is a standalone function; writers run the checks relevant to a
//! payload in sequence and abort on the first violation, before touching any row.

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::campaign::{NewCampaign, UpdateCampaign};
use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::{
    CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, NAME_MAX_LEN, SKU_MAX_LEN, TARGET_AUDIENCE_MAX_LEN,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Reject blank required text.
pub fn required(field: &'static str, value: &str) -> RepositoryResult<()> {
    if value.trim().is_empty() {
        return Err(RepositoryError::validation(field, "is required"));
    }
    Ok(())
}

/// Reject text longer than `max` characters.
pub fn max_len(field: &'static str, value: Option<&str>, max: usize) -> RepositoryResult<()> {
    match value {
        Some(text) if text.chars().count() > max => Err(RepositoryError::validation(
            field,
            format!("must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

/// Reject negative monetary amounts.
pub fn non_negative(field: &'static str, value: Option<i64>) -> RepositoryResult<()> {
    match value {
        Some(amount) if amount < 0 => {
            Err(RepositoryError::validation(field, "must not be negative"))
        }
        _ => Ok(()),
    }
}

pub fn check_new_client(client: &NewClient) -> RepositoryResult<()> {
    required("name", &client.name)?;
    max_len("name", Some(&client.name), NAME_MAX_LEN)?;
    max_len("description", client.description.as_deref(), DESCRIPTION_MAX_LEN)
}

pub fn check_client_update(updates: &UpdateClient) -> RepositoryResult<()> {
    if let Some(name) = updates.name.as_deref() {
        required("name", name)?;
    }
    max_len("name", updates.name.as_deref(), NAME_MAX_LEN)?;
    max_len("description", updates.description.as_deref(), DESCRIPTION_MAX_LEN)
}

pub fn check_new_campaign(campaign: &NewCampaign) -> RepositoryResult<()> {
    required("name", &campaign.name)?;
    max_len("name", Some(&campaign.name), NAME_MAX_LEN)?;
    max_len("description", campaign.description.as_deref(), DESCRIPTION_MAX_LEN)?;
    max_len(
        "target_audience",
        campaign.target_audience.as_deref(),
        TARGET_AUDIENCE_MAX_LEN,
    )?;
    non_negative("budget", campaign.budget_cents)
}

pub fn check_campaign_update(updates: &UpdateCampaign) -> RepositoryResult<()> {
    if let Some(name) = updates.name.as_deref() {
        required("name", name)?;
    }
    max_len("name", updates.name.as_deref(), NAME_MAX_LEN)?;
    max_len("description", updates.description.as_deref(), DESCRIPTION_MAX_LEN)?;
    max_len(
        "target_audience",
        updates.target_audience.as_deref(),
        TARGET_AUDIENCE_MAX_LEN,
    )?;
    non_negative("budget", updates.budget_cents)
}

pub fn check_new_product(product: &NewProduct) -> RepositoryResult<()> {
    required("name", &product.name)?;
    max_len("name", Some(&product.name), NAME_MAX_LEN)?;
    max_len("description", product.description.as_deref(), DESCRIPTION_MAX_LEN)?;
    max_len("sku", product.sku.as_deref(), SKU_MAX_LEN)?;
    max_len("category", product.category.as_deref(), CATEGORY_MAX_LEN)?;
    non_negative("price", product.price_cents)
}

pub fn check_product_update(updates: &UpdateProduct) -> RepositoryResult<()> {
    if let Some(name) = updates.name.as_deref() {
        required("name", name)?;
    }
    max_len("name", updates.name.as_deref(), NAME_MAX_LEN)?;
    max_len("description", updates.description.as_deref(), DESCRIPTION_MAX_LEN)?;
    max_len("sku", updates.sku.as_deref(), SKU_MAX_LEN)?;
    max_len("category", updates.category.as_deref(), CATEGORY_MAX_LEN)?;
    non_negative("price", updates.price_cents)
}

/// Fail with `ForeignKeyViolation` unless the client exists.
pub fn client_exists(conn: &mut SqliteConnection, client_id: i32) -> RepositoryResult<()> {
    use crate::schema::clients;

    let found: bool =
        select(exists(clients::table.filter(clients::id.eq(client_id)))).get_result(conn)?;
    if found {
        Ok(())
    } else {
        Err(RepositoryError::ForeignKeyViolation(format!(
            "client {client_id} does not exist"
        )))
    }
}

/// Fail with `ForeignKeyViolation` unless the campaign exists. Returns its owner.
pub fn campaign_owner(conn: &mut SqliteConnection, campaign_id: i32) -> RepositoryResult<i32> {
    use crate::schema::campaigns;

    campaigns::table
        .filter(campaigns::id.eq(campaign_id))
        .select(campaigns::client_id)
        .first::<i32>(conn)
        .optional()?
        .ok_or_else(|| {
            RepositoryError::ForeignKeyViolation(format!("campaign {campaign_id} does not exist"))
        })
}

/// Fail with `ForeignKeyViolation` unless the product exists. Returns its owner.
pub fn product_owner(conn: &mut SqliteConnection, product_id: i32) -> RepositoryResult<i32> {
    use crate::schema::products;

    products::table
        .filter(products::id.eq(product_id))
        .select(products::client_id)
        .first::<i32>(conn)
        .optional()?
        .ok_or_else(|| {
            RepositoryError::ForeignKeyViolation(format!("product {product_id} does not exist"))
        })
}

/// Fail with `CrossOwnerViolation` when the product is owned by another client.
pub fn same_owner(client_id: i32, product_id: i32, product_client_id: i32) -> RepositoryResult<()> {
    if client_id == product_client_id {
        Ok(())
    } else {
        Err(RepositoryError::CrossOwnerViolation {
            client_id,
            product_id,
        })
    }
}

/// Fail with `UniqueViolation` when another product already uses `sku`.
pub fn sku_available(
    conn: &mut SqliteConnection,
    sku: Option<&str>,
    exclude_product_id: Option<i32>,
) -> RepositoryResult<()> {
    use crate::schema::products;

    let Some(sku) = sku else {
        return Ok(());
    };

    let mut query = products::table
        .filter(products::sku.eq(sku))
        .into_boxed::<diesel::sqlite::Sqlite>();
    if let Some(product_id) = exclude_product_id {
        query = query.filter(products::id.ne(product_id));
    }

    let taken = query.count().get_result::<i64>(conn)? > 0;
    if taken {
        Err(RepositoryError::UniqueViolation(format!(
            "sku `{sku}` is already in use"
        )))
    } else {
        Ok(())
    }
}
