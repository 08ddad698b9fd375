use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use common::requests::MaintenanceChecklistRequest;

use crate::checklist::validator;
use crate::error::Result;
use crate::state::AppState;

/// HTTP handler wrapper that converts the internal result to an `HttpResponse`.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<MaintenanceChecklistRequest>,
) -> impl Responder {
    match submit(&state, &payload).await {
        Ok(()) => HttpResponse::Ok().body("Maintenance checklist saved"),
        Err(e) => e.to_response(),
    }
}

async fn submit(state: &AppState, request: &MaintenanceChecklistRequest) -> Result<()> {
    let validated = {
        let roster = state.roster.read().await;
        validator::validate_maintenance(
            &roster,
            &request.appliance,
            &request.tasks,
            request.notes.as_deref(),
        )?
    };

    state
        .submissions
        .append_maintenance(&validated, &request.submitted_by, Local::now())?;
    Ok(())
}
