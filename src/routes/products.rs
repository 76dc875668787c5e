use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::product::ProductListQuery;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{associations, products as product_service};

/// Query parameters accepted by the product listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    pub client_id: Option<i32>,
    pub category: Option<String>,
}

impl From<ProductsQuery> for ProductListQuery {
    fn from(params: ProductsQuery) -> Self {
        let mut query = ProductListQuery::new();
        if let Some(client_id) = params.client_id {
            query = query.client(client_id);
        }
        if let Some(category) = params.category.filter(|value| !value.trim().is_empty()) {
            query = query.category(category.trim());
        }
        query
    }
}

#[get("/api/products")]
pub async fn list_products(
    params: web::Query<ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::list_products(repo.get_ref(), params.into_inner().into()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err, "list products"),
    }
}

#[get("/api/products/{product_id}")]
pub async fn show_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::get_product(repo.get_ref(), path.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "load product"),
    }
}

#[post("/api/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match product_service::create_product(repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err, "create product"),
    }
}

#[put("/api/products/{product_id}")]
pub async fn update_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    match product_service::update_product(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "update product"),
    }
}

#[delete("/api/products/{product_id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::delete_product(repo.get_ref(), path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete product"),
    }
}

#[get("/api/products/{product_id}/campaigns")]
pub async fn list_product_campaigns(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match associations::list_product_campaigns(repo.get_ref(), path.into_inner()) {
        Ok(campaigns) => HttpResponse::Ok().json(campaigns),
        Err(err) => error_response(err, "list product campaigns"),
    }
}
