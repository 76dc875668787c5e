use crate::db::{DbConnection, DbPool};
use crate::domain::{
    campaign::{Campaign, CampaignListQuery, CampaignProjection, NewCampaign, UpdateCampaign},
    campaign_product::CampaignProduct,
    client::{Client, ClientProjection, NewClient, UpdateClient},
    product::{NewProduct, Product, ProductListQuery, ProductProjection, UpdateProduct},
};
use crate::repository::errors::RepositoryResult;

pub mod association;
pub mod campaign;
pub mod client;
pub mod constraints;
pub mod errors;
pub mod product;
pub mod projection;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over client records.
pub trait ClientReader {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    fn count_clients(&self) -> RepositoryResult<usize>;
}

/// Write operations over client records.
pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    /// Apply `updates` only if the stored row still has `expected_version`.
    fn update_client(
        &self,
        client_id: i32,
        expected_version: i32,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client>;
    /// Delete the client together with its campaigns, products and their links.
    fn delete_client(&self, client_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over campaign records.
pub trait CampaignReader {
    fn get_campaign_by_id(&self, id: i32) -> RepositoryResult<Option<Campaign>>;
    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<Campaign>>;
}

/// Write operations over campaign records.
pub trait CampaignWriter {
    /// Insert the campaign and link `new_campaign.product_ids` atomically.
    fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign>;
    fn update_campaign(
        &self,
        campaign_id: i32,
        expected_version: i32,
        updates: &UpdateCampaign,
    ) -> RepositoryResult<Campaign>;
    fn delete_campaign(&self, campaign_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        expected_version: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Navigation across the campaign/product association.
pub trait AssociationReader {
    /// Products linked to the campaign, in link order. `NotFound` for an unknown campaign.
    fn list_products_of(&self, campaign_id: i32) -> RepositoryResult<Vec<Product>>;
    /// Campaigns linked to the product, in link order. `NotFound` for an unknown product.
    fn list_campaigns_of(&self, product_id: i32) -> RepositoryResult<Vec<Campaign>>;
}

/// Maintenance of the campaign/product association.
pub trait AssociationWriter {
    /// Link a product to a campaign owned by the same client. Linking twice is a no-op.
    fn link_product(&self, campaign_id: i32, product_id: i32) -> RepositoryResult<CampaignProduct>;
    /// Link several products at once; nothing is written unless every id is valid.
    fn link_products(&self, campaign_id: i32, product_ids: &[i32]) -> RepositoryResult<usize>;
    fn unlink_product(&self, campaign_id: i32, product_id: i32) -> RepositoryResult<()>;
}

/// Derived read views combining stored fields with counts and joined names.
pub trait ProjectionReader {
    fn get_client_projection(&self, id: i32) -> RepositoryResult<Option<ClientProjection>>;
    fn list_client_projections(&self) -> RepositoryResult<Vec<ClientProjection>>;
    fn get_campaign_projection(&self, id: i32) -> RepositoryResult<Option<CampaignProjection>>;
    fn list_campaign_projections(
        &self,
        query: CampaignListQuery,
    ) -> RepositoryResult<Vec<CampaignProjection>>;
    fn get_product_projection(&self, id: i32) -> RepositoryResult<Option<ProductProjection>>;
    fn list_product_projections(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<Vec<ProductProjection>>;
}
