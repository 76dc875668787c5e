pub mod campaign;
pub mod campaign_product;
pub mod client;
pub mod product;
