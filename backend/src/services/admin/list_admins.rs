use actix_web::{web, HttpResponse, Responder};

use crate::admins::load_admins;
use crate::state::AppState;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    match load_admins(&state.config.admins_file()) {
        Ok(admins) => HttpResponse::Ok().json(admins),
        Err(e) => e.to_response(),
    }
}
