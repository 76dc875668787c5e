use crate::domain::campaign::{CampaignListQuery, CampaignProjection};
use crate::forms::campaigns::{AddCampaignForm, EditCampaignForm};
use crate::repository::errors::RepositoryError;
use crate::repository::{CampaignReader, CampaignWriter, ProjectionReader};
use crate::services::{ServiceError, ServiceResult, conflict_or_missing};

/// Lists campaigns, optionally narrowed to one client.
pub fn list_campaigns<R>(repo: &R, query: CampaignListQuery) -> ServiceResult<Vec<CampaignProjection>>
where
    R: ProjectionReader + ?Sized,
{
    repo.list_campaign_projections(query)
        .map_err(ServiceError::from)
}

pub fn get_campaign<R>(repo: &R, campaign_id: i32) -> ServiceResult<CampaignProjection>
where
    R: ProjectionReader + ?Sized,
{
    repo.get_campaign_projection(campaign_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a campaign and links the requested products in one step.
///
/// Nothing is written when the client is missing or any product belongs to
/// another client.
pub fn create_campaign<R>(repo: &R, form: AddCampaignForm) -> ServiceResult<CampaignProjection>
where
    R: CampaignWriter + ProjectionReader + ?Sized,
{
    let new_campaign = form
        .into_new_campaign()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let created = repo
        .create_campaign(&new_campaign)
        .map_err(ServiceError::from)?;
    log::info!(
        "Created campaign {} for client {} with {} product(s)",
        created.id,
        created.client_id,
        new_campaign.product_ids.len()
    );

    get_campaign(repo, created.id)
}

/// Applies the present fields of `form` to the campaign.
pub fn update_campaign<R>(repo: &R, campaign_id: i32, form: EditCampaignForm) -> ServiceResult<()>
where
    R: CampaignReader + CampaignWriter + ?Sized,
{
    let expected_version = form.version;
    let updates = form
        .into_update_campaign()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let current = repo
        .get_campaign_by_id(campaign_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if updates.is_empty() {
        return Ok(());
    }

    let version = expected_version.unwrap_or(current.version);
    match repo.update_campaign(campaign_id, version, &updates) {
        Ok(campaign) => {
            log::info!(
                "Updated campaign {} to version {}",
                campaign.id,
                campaign.version
            );
            Ok(())
        }
        Err(RepositoryError::ConcurrencyConflict) => {
            let still_exists = repo
                .get_campaign_by_id(campaign_id)
                .map_err(ServiceError::from)?
                .is_some();
            Err(conflict_or_missing("campaign", campaign_id, still_exists))
        }
        Err(err) => Err(ServiceError::from(err)),
    }
}

/// Deletes the campaign and its links. Linked products are kept.
pub fn delete_campaign<R>(repo: &R, campaign_id: i32) -> ServiceResult<()>
where
    R: CampaignWriter + ?Sized,
{
    repo.delete_campaign(campaign_id)
        .map_err(ServiceError::from)?;
    log::info!("Deleted campaign {campaign_id}");
    Ok(())
}
