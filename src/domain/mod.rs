pub mod campaign;
pub mod campaign_product;
pub mod client;
pub mod money;
pub mod product;

/// Maximum length, in characters, of a client, campaign or product name.
pub const NAME_MAX_LEN: usize = 200;
/// Maximum length of a free-form description.
pub const DESCRIPTION_MAX_LEN: usize = 1000;
/// Maximum length of a campaign target audience.
pub const TARGET_AUDIENCE_MAX_LEN: usize = 500;
/// Maximum length of a product SKU.
pub const SKU_MAX_LEN: usize = 100;
/// Maximum length of a product category.
pub const CATEGORY_MAX_LEN: usize = 100;
