use actix_web::{web, HttpResponse, Responder};
use common::requests::SaveAdminsRequest;

use crate::admins::save_admins;
use crate::state::AppState;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveAdminsRequest>,
) -> impl Responder {
    match save_admins(&state.config.admins_file(), &payload.admins) {
        Ok(_) => HttpResponse::Ok().body("Admin user list updated"),
        Err(e) => e.to_response(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use tempfile::TempDir;

    use crate::roster::store::tests::test_config;
    use crate::state::AppState;

    use super::*;

    #[actix_web::test]
    async fn admin_list_round_trips_over_http() {
        let dir = TempDir::new().unwrap();
        let state = AppState::new(test_config(&dir));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(crate::services::admin::configure_routes()),
        )
        .await;

        let save = test::TestRequest::post()
            .uri("/api/admin/admins")
            .set_json(SaveAdminsRequest {
                admins: vec!["Jane Doe".to_string(), "ALEXSCOTT".to_string()],
            })
            .to_request();
        let res = test::call_service(&app, save).await;
        assert!(res.status().is_success());

        let list = test::TestRequest::get().uri("/api/admin/admins").to_request();
        let admins: Vec<String> = test::call_and_read_body_json(&app, list).await;
        assert_eq!(admins, vec!["alexscott".to_string(), "jane doe".to_string()]);
    }
}
