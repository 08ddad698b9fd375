use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let roster = state.roster.read().await;
    HttpResponse::Ok().json(roster.tasks_by_appliance())
}
