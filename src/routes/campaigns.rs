use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::campaign::CampaignListQuery;
use crate::forms::campaigns::{AddCampaignForm, EditCampaignForm, LinkProductsForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{associations, campaigns as campaign_service};

/// Query parameters accepted by the campaign listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignsQuery {
    pub client_id: Option<i32>,
}

impl From<CampaignsQuery> for CampaignListQuery {
    fn from(params: CampaignsQuery) -> Self {
        let query = CampaignListQuery::new();
        match params.client_id {
            Some(client_id) => query.client(client_id),
            None => query,
        }
    }
}

#[get("/api/campaigns")]
pub async fn list_campaigns(
    params: web::Query<CampaignsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match campaign_service::list_campaigns(repo.get_ref(), params.into_inner().into()) {
        Ok(campaigns) => HttpResponse::Ok().json(campaigns),
        Err(err) => error_response(err, "list campaigns"),
    }
}

#[get("/api/campaigns/{campaign_id}")]
pub async fn show_campaign(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match campaign_service::get_campaign(repo.get_ref(), path.into_inner()) {
        Ok(campaign) => HttpResponse::Ok().json(campaign),
        Err(err) => error_response(err, "load campaign"),
    }
}

#[post("/api/campaigns")]
pub async fn create_campaign(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCampaignForm>,
) -> impl Responder {
    match campaign_service::create_campaign(repo.get_ref(), form.into_inner()) {
        Ok(campaign) => HttpResponse::Created().json(campaign),
        Err(err) => error_response(err, "create campaign"),
    }
}

#[put("/api/campaigns/{campaign_id}")]
pub async fn update_campaign(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditCampaignForm>,
) -> impl Responder {
    match campaign_service::update_campaign(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "update campaign"),
    }
}

#[delete("/api/campaigns/{campaign_id}")]
pub async fn delete_campaign(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match campaign_service::delete_campaign(repo.get_ref(), path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete campaign"),
    }
}

#[get("/api/campaigns/{campaign_id}/products")]
pub async fn list_campaign_products(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match associations::list_campaign_products(repo.get_ref(), path.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err, "list campaign products"),
    }
}

#[post("/api/campaigns/{campaign_id}/products")]
/// Link several products at once; nothing is linked if any of them is rejected.
pub async fn link_campaign_products(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<LinkProductsForm>,
) -> impl Responder {
    match associations::link_products(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "link products"),
    }
}

#[put("/api/campaigns/{campaign_id}/products/{product_id}")]
pub async fn link_campaign_product(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (campaign_id, product_id) = path.into_inner();

    match associations::link_product(repo.get_ref(), campaign_id, product_id) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "link product"),
    }
}

#[delete("/api/campaigns/{campaign_id}/products/{product_id}")]
pub async fn unlink_campaign_product(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (campaign_id, product_id) = path.into_inner();

    match associations::unlink_product(repo.get_ref(), campaign_id, product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "unlink product"),
    }
}
