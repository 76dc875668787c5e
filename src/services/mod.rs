pub use errors::{ServiceError, ServiceResult};

pub mod associations;
pub mod bootstrap;
pub mod campaigns;
pub mod clients;
pub mod errors;
pub mod products;

/// Classify a failed compare-and-swap write once the row has been re-read.
fn conflict_or_missing(entity: &str, id: i32, still_exists: bool) -> ServiceError {
    if still_exists {
        log::warn!("Concurrent modification of {entity} {id}");
        ServiceError::ConcurrencyConflict
    } else {
        ServiceError::NotFound
    }
}
