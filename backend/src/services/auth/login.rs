use actix_web::{web, HttpResponse, Responder};
use common::requests::{LoginRequest, LoginResponse};
use log::info;

use crate::credentials;
use crate::error::Result;
use crate::state::AppState;

/// HTTP handler wrapper that converts the internal result to an `HttpResponse`.
pub async fn process(state: web::Data<AppState>, payload: web::Json<LoginRequest>) -> impl Responder {
    match login(&state, &payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_response(),
    }
}

async fn login(state: &AppState, request: &LoginRequest) -> Result<LoginResponse> {
    let roster = state.roster.read().await;
    let member = credentials::authenticate(&roster, &request.username, &request.password)?;
    info!("login ok for {}", member.username);
    Ok(LoginResponse {
        name: member.name.clone(),
        username: member.username.clone(),
    })
}
