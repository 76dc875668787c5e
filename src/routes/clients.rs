use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::clients::{AddClientForm, EditClientForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::clients as client_service;

#[get("/api/clients")]
pub async fn list_clients(repo: web::Data<DieselRepository>) -> impl Responder {
    match client_service::list_clients(repo.get_ref()) {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(err) => error_response(err, "list clients"),
    }
}

#[get("/api/clients/{client_id}")]
pub async fn show_client(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match client_service::get_client(repo.get_ref(), path.into_inner()) {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => error_response(err, "load client"),
    }
}

#[post("/api/clients")]
pub async fn create_client(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddClientForm>,
) -> impl Responder {
    match client_service::create_client(repo.get_ref(), form.into_inner()) {
        Ok(client) => HttpResponse::Created().json(client),
        Err(err) => error_response(err, "create client"),
    }
}

#[put("/api/clients/{client_id}")]
pub async fn update_client(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditClientForm>,
) -> impl Responder {
    match client_service::update_client(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "update client"),
    }
}

#[delete("/api/clients/{client_id}")]
pub async fn delete_client(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match client_service::delete_client(repo.get_ref(), path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete client"),
    }
}
