use crate::models::{
    AddLinksRequest, AddLinksResponse, ErrorResponse, RefreshResponse, VideoEntry,
};
use crate::AppState;
use log::info;
use rocket::http::Status;
use rocket::response::status::{Accepted, Created};
use rocket::serde::json::Json;
use rocket::{delete, get, post, State};

#[get("/")]
pub async fn list_videos(state: &State<AppState>) -> Json<Vec<VideoEntry>> {
    Json(state.controller.entries().await)
}

#[get("/<id>")]
pub async fn get_video(
    id: u64,
    state: &State<AppState>,
) -> Result<Json<VideoEntry>, ErrorResponse> {
    state
        .controller
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| ErrorResponse::not_found(format!("No video with id {id}")))
}

#[post("/", data = "<request>")]
pub async fn add_videos(
    request: Json<AddLinksRequest>,
    state: &State<AppState>,
) -> Created<Json<AddLinksResponse>> {
    let (added, ignored) = state.controller.add_links(&request.input).await;
    info!("Add request: {} added, {} ignored", added.len(), ignored);

    Created::new("/api/videos").body(Json(AddLinksResponse { added, ignored }))
}

#[delete("/<id>")]
pub async fn remove_video(id: u64, state: &State<AppState>) -> Result<Status, ErrorResponse> {
    if state.controller.remove(id).await {
        Ok(Status::NoContent)
    } else {
        Err(ErrorResponse::not_found(format!("No video with id {id}")))
    }
}

#[post("/refresh")]
pub async fn refresh_videos(state: &State<AppState>) -> Accepted<Json<RefreshResponse>> {
    let submitted = state.controller.refresh_all().await;
    Accepted(Json(RefreshResponse { submitted }))
}
