use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use common::requests::PostJobChecklistRequest;

use crate::checklist::validator;
use crate::error::Result;
use crate::state::AppState;

/// HTTP handler wrapper that converts the internal result to an `HttpResponse`.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<PostJobChecklistRequest>,
) -> impl Responder {
    match submit(&state, &payload).await {
        Ok(()) => HttpResponse::Ok().body("Checklist saved"),
        Err(e) => e.to_response(),
    }
}

async fn submit(state: &AppState, request: &PostJobChecklistRequest) -> Result<()> {
    // Validation and the roster read happen under one lock so the appliance
    // check is against the roster as of this request, not a stale one.
    let validated = {
        let roster = state.roster.read().await;
        validator::validate(
            &roster,
            &request.appliance,
            &request.equipment,
            request.notes.as_deref(),
        )?
    };

    state
        .submissions
        .append(&validated, &request.submitted_by, Local::now())?;
    Ok(())
}
