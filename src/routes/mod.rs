use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod campaigns;
pub mod clients;
pub mod products;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Map a service failure onto its HTTP status with a JSON error body.
pub fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new(err.to_string())),
        ServiceError::Validation(_)
        | ServiceError::UniqueConstraint(_)
        | ServiceError::ForeignKey(_)
        | ServiceError::CrossOwner(_) => {
            HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()))
        }
        ServiceError::ConcurrencyConflict => {
            HttpResponse::Conflict().json(ErrorBody::new(err.to_string()))
        }
        ServiceError::Internal(_) => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("internal server error"))
        }
    }
}

/// Register every API handler together with the JSON and query error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .service(clients::list_clients)
    .service(clients::create_client)
    .service(clients::show_client)
    .service(clients::update_client)
    .service(clients::delete_client)
    .service(campaigns::list_campaigns)
    .service(campaigns::create_campaign)
    .service(campaigns::show_campaign)
    .service(campaigns::update_campaign)
    .service(campaigns::delete_campaign)
    .service(campaigns::list_campaign_products)
    .service(campaigns::link_campaign_products)
    .service(campaigns::link_campaign_product)
    .service(campaigns::unlink_campaign_product)
    .service(products::list_products)
    .service(products::create_product)
    .service(products::show_product)
    .service(products::update_product)
    .service(products::delete_product)
    .service(products::list_product_campaigns);
}
