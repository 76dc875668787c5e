use mockall::mock;

use super::{
    AssociationReader, AssociationWriter, CampaignReader, CampaignWriter, ClientReader,
    ClientWriter, ProductReader, ProductWriter, ProjectionReader,
};
use crate::domain::{
    campaign::{Campaign, CampaignListQuery, CampaignProjection, NewCampaign, UpdateCampaign},
    campaign_product::CampaignProduct,
    client::{Client, ClientProjection, NewClient, UpdateClient},
    product::{NewProduct, Product, ProductListQuery, ProductProjection, UpdateProduct},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ClientReader {}

    impl ClientReader for ClientReader {
        fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn count_clients(&self) -> RepositoryResult<usize>;
    }
}

mock! {
    pub ClientWriter {}

    impl ClientWriter for ClientWriter {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, client_id: i32, expected_version: i32, updates: &UpdateClient) -> RepositoryResult<Client>;
        fn delete_client(&self, client_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CampaignReader {}

    impl CampaignReader for CampaignReader {
        fn get_campaign_by_id(&self, id: i32) -> RepositoryResult<Option<Campaign>>;
        fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<Campaign>>;
    }
}

mock! {
    pub CampaignWriter {}

    impl CampaignWriter for CampaignWriter {
        fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign>;
        fn update_campaign(&self, campaign_id: i32, expected_version: i32, updates: &UpdateCampaign) -> RepositoryResult<Campaign>;
        fn delete_campaign(&self, campaign_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, expected_version: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub AssociationReader {}

    impl AssociationReader for AssociationReader {
        fn list_products_of(&self, campaign_id: i32) -> RepositoryResult<Vec<Product>>;
        fn list_campaigns_of(&self, product_id: i32) -> RepositoryResult<Vec<Campaign>>;
    }
}

mock! {
    pub AssociationWriter {}

    impl AssociationWriter for AssociationWriter {
        fn link_product(&self, campaign_id: i32, product_id: i32) -> RepositoryResult<CampaignProduct>;
        fn link_products(&self, campaign_id: i32, product_ids: &[i32]) -> RepositoryResult<usize>;
        fn unlink_product(&self, campaign_id: i32, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProjectionReader {}

    impl ProjectionReader for ProjectionReader {
        fn get_client_projection(&self, id: i32) -> RepositoryResult<Option<ClientProjection>>;
        fn list_client_projections(&self) -> RepositoryResult<Vec<ClientProjection>>;
        fn get_campaign_projection(&self, id: i32) -> RepositoryResult<Option<CampaignProjection>>;
        fn list_campaign_projections(&self, query: CampaignListQuery) -> RepositoryResult<Vec<CampaignProjection>>;
        fn get_product_projection(&self, id: i32) -> RepositoryResult<Option<ProductProjection>>;
        fn list_product_projections(&self, query: ProductListQuery) -> RepositoryResult<Vec<ProductProjection>>;
    }
}
