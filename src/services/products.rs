use crate::domain::product::{ProductListQuery, ProductProjection};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::errors::RepositoryError;
use crate::repository::{ProductReader, ProductWriter, ProjectionReader};
use crate::services::{ServiceError, ServiceResult, conflict_or_missing};

/// Lists products, optionally narrowed by client and category.
pub fn list_products<R>(repo: &R, query: ProductListQuery) -> ServiceResult<Vec<ProductProjection>>
where
    R: ProjectionReader + ?Sized,
{
    repo.list_product_projections(query)
        .map_err(ServiceError::from)
}

pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<ProductProjection>
where
    R: ProjectionReader + ?Sized,
{
    repo.get_product_projection(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product for its client and returns the projection.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<ProductProjection>
where
    R: ProductWriter + ProjectionReader + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;
    log::info!(
        "Created product {} for client {}",
        created.id,
        created.client_id
    );

    get_product(repo, created.id)
}

/// Applies the present fields of `form` to the product.
pub fn update_product<R>(repo: &R, product_id: i32, form: EditProductForm) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let expected_version = form.version;
    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let current = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if updates.is_empty() {
        return Ok(());
    }

    let version = expected_version.unwrap_or(current.version);
    match repo.update_product(product_id, version, &updates) {
        Ok(product) => {
            log::info!(
                "Updated product {} to version {}",
                product.id,
                product.version
            );
            Ok(())
        }
        Err(RepositoryError::ConcurrencyConflict) => {
            let still_exists = repo
                .get_product_by_id(product_id)
                .map_err(ServiceError::from)?
                .is_some();
            Err(conflict_or_missing("product", product_id, still_exists))
        }
        Err(err) => Err(ServiceError::from(err)),
    }
}

/// Deletes the product and its campaign links.
pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id).map_err(ServiceError::from)?;
    log::info!("Deleted product {product_id}");
    Ok(())
}
