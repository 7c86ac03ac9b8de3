#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;

use crate::config::{create_app_state, create_cors, init_logger, load_environment, Settings};
use crate::services::controller::TrackerController;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub struct AppState {
    pub controller: Arc<TrackerController>,
}

#[get("/health")]
fn health() -> &'static str {
    "ok"
}

pub fn build_rocket(state: AppState, cors: rocket_cors::Cors) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .attach(cors)
        .mount("/", routes![health])
        .mount(
            "/api/videos",
            routes![
                api::list_videos,
                api::get_video,
                api::add_videos,
                api::remove_video,
                api::refresh_videos
            ],
        )
        .mount("/api/refresh", routes![api::refresh_status])
}

#[launch]
async fn rocket() -> _ {
    load_environment();
    init_logger();

    let settings = Settings::from_env();
    let cors = match create_cors(&settings) {
        Ok(cors) => cors,
        Err(e) => {
            log::error!("Aborting launch: {e:#}");
            panic!("CORS setup failed: {e}");
        }
    };
    let state = create_app_state(&settings);

    build_rocket(state, cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddLinksResponse, RefreshPhase, RefreshStatus, VideoEntry};
    use crate::services::controller::testing::{controller_with, test_settings, wait_idle};
    use crate::services::stats_fetcher::testing::{info, FakeExtractor};
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use serde_json::json;

    const A: &str = "https://www.youtube.com/watch?v=a";

    async fn client_with(extractor: Arc<FakeExtractor>) -> (Client, Arc<TrackerController>) {
        let controller = Arc::new(controller_with(extractor));
        let state = AppState {
            controller: controller.clone(),
        };
        let cors = create_cors(&test_settings()).unwrap();
        let client = Client::tracked(build_rocket(state, cors)).await.unwrap();
        (client, controller)
    }

    #[rocket::async_test]
    async fn health_check() {
        let (client, _) = client_with(Arc::new(FakeExtractor::new())).await;
        let response = client.get("/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().await.unwrap(), "ok");
    }

    #[rocket::async_test]
    async fn add_then_list_videos() {
        let extractor = Arc::new(FakeExtractor::new());
        extractor.set(A, info("Video A", 42, 7));
        let (client, controller) = client_with(extractor).await;

        let response = client
            .post("/api/videos")
            .header(ContentType::JSON)
            .body(json!({ "input": format!("{A}, not-a-link") }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        let body: AddLinksResponse = response.into_json().await.unwrap();
        assert_eq!(body.added.len(), 1);
        assert_eq!(body.ignored, 1);
        assert_eq!(body.added[0].title, "YouTube");

        wait_idle(&controller).await;

        let response = client.get("/api/videos").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let entries: Vec<VideoEntry> = response.into_json().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Video A");
        assert_eq!((entries[0].views, entries[0].likes), (42, 7));

        let response = client
            .get(format!("/api/videos/{}", entries[0].id))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
    }

    #[rocket::async_test]
    async fn remove_video_and_unknown_id() {
        let extractor = Arc::new(FakeExtractor::new());
        extractor.set(A, info("Video A", 1, 1));
        let (client, controller) = client_with(extractor).await;
        let (added, _) = controller.add_links(A).await;
        let id = added[0].id;

        let response = client.delete(format!("/api/videos/{id}")).dispatch().await;
        assert_eq!(response.status(), Status::NoContent);

        let response = client.delete(format!("/api/videos/{id}")).dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["error"], "not_found");

        let response = client.get(format!("/api/videos/{id}")).dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn manual_refresh_and_status() {
        let extractor = Arc::new(FakeExtractor::new());
        extractor.set(A, info("Video A", 1, 1));
        let (client, controller) = client_with(extractor.clone()).await;
        controller.add_links(A).await;
        wait_idle(&controller).await;

        let response = client.post("/api/videos/refresh").dispatch().await;
        assert_eq!(response.status(), Status::Accepted);
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["submitted"], 1);
        wait_idle(&controller).await;
        assert_eq!(extractor.started(), 2);

        let response = client.get("/api/refresh").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let status: RefreshStatus = response.into_json().await.unwrap();
        assert_eq!(status.phase, RefreshPhase::Idle);
        assert_eq!(status.max_ticks, 4);
        assert_eq!(status.color, [0, 120, 215]);
    }
}
