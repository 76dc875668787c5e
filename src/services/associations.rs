use validator::Validate;

use crate::domain::campaign::CampaignProjection;
use crate::domain::campaign_product::CampaignProduct;
use crate::domain::product::ProductProjection;
use crate::forms::campaigns::LinkProductsForm;
use crate::repository::{AssociationReader, AssociationWriter, ProjectionReader};
use crate::services::{ServiceError, ServiceResult};

/// Links one product to a campaign of the same client. Repeating it is a no-op.
pub fn link_product<R>(repo: &R, campaign_id: i32, product_id: i32) -> ServiceResult<CampaignProduct>
where
    R: AssociationWriter + ?Sized,
{
    let link = repo
        .link_product(campaign_id, product_id)
        .map_err(ServiceError::from)?;
    log::info!("Linked product {product_id} to campaign {campaign_id}");
    Ok(link)
}

/// Links several products at once. Either every product is linked or none is.
///
/// Returns the number of newly created links.
pub fn link_products<R>(repo: &R, campaign_id: i32, form: LinkProductsForm) -> ServiceResult<usize>
where
    R: AssociationWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let inserted = repo
        .link_products(campaign_id, &form.product_ids)
        .map_err(ServiceError::from)?;
    log::info!("Linked {inserted} new product(s) to campaign {campaign_id}");
    Ok(inserted)
}

pub fn unlink_product<R>(repo: &R, campaign_id: i32, product_id: i32) -> ServiceResult<()>
where
    R: AssociationWriter + ?Sized,
{
    repo.unlink_product(campaign_id, product_id)
        .map_err(ServiceError::from)?;
    log::info!("Unlinked product {product_id} from campaign {campaign_id}");
    Ok(())
}

/// Products promoted by the campaign, in the order they were linked.
pub fn list_campaign_products<R>(repo: &R, campaign_id: i32) -> ServiceResult<Vec<ProductProjection>>
where
    R: AssociationReader + ProjectionReader + ?Sized,
{
    let products = repo
        .list_products_of(campaign_id)
        .map_err(ServiceError::from)?;

    let mut projections = Vec::with_capacity(products.len());
    for product in products {
        if let Some(projection) = repo
            .get_product_projection(product.id)
            .map_err(ServiceError::from)?
        {
            projections.push(projection);
        }
    }
    Ok(projections)
}

/// Campaigns promoting the product, in the order it was linked to them.
pub fn list_product_campaigns<R>(repo: &R, product_id: i32) -> ServiceResult<Vec<CampaignProjection>>
where
    R: AssociationReader + ProjectionReader + ?Sized,
{
    let campaigns = repo
        .list_campaigns_of(product_id)
        .map_err(ServiceError::from)?;

    let mut projections = Vec::with_capacity(campaigns.len());
    for campaign in campaigns {
        if let Some(projection) = repo
            .get_campaign_projection(campaign.id)
            .map_err(ServiceError::from)?
        {
            projections.push(projection);
        }
    }
    Ok(projections)
}
