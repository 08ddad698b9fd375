use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;

pub(crate) async fn process(
    state: web::Data<AppState>,
    appliance: web::Path<String>,
) -> impl Responder {
    let roster = state.roster.read().await;
    let names: Vec<&str> = roster
        .equipment_for_appliance(&appliance)
        .iter()
        .map(|item| item.equipment_name.as_str())
        .collect();
    HttpResponse::Ok().json(names)
}
