use crate::models::RefreshStatus;
use crate::AppState;
use rocket::serde::json::Json;
use rocket::{get, State};

#[get("/")]
pub async fn refresh_status(state: &State<AppState>) -> Json<RefreshStatus> {
    Json(state.controller.refresh_status().await)
}
