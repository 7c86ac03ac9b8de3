use crate::env_variable_utils::BACKEND_URL;
use crate::models::{
    AddLinksRequest, AddLinksResponse, ErrorResponse, RefreshResponse, RefreshStatus, VideoEntry,
};
use gloo_net::http::{Request, Response};

pub async fn load_videos() -> Result<Vec<VideoEntry>, String> {
    let url = format!("{}/api/videos", &*BACKEND_URL);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    parse_json(response).await
}

pub async fn add_links(input: &str) -> Result<AddLinksResponse, String> {
    let url = format!("{}/api/videos", &*BACKEND_URL);

    let request_body = AddLinksRequest {
        input: input.to_string(),
    };

    let response = Request::post(&url)
        .json(&request_body)
        .map_err(|e| format!("Request error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    parse_json(response).await
}

pub async fn remove_video(id: u64) -> Result<(), String> {
    let url = format!("{}/api/videos/{}", &*BACKEND_URL, id);

    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        Ok(())
    } else {
        Err(error_text(response).await)
    }
}

pub async fn trigger_refresh() -> Result<RefreshResponse, String> {
    let url = format!("{}/api/videos/refresh", &*BACKEND_URL);

    let response = Request::post(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    parse_json(response).await
}

pub async fn load_refresh_status() -> Result<RefreshStatus, String> {
    let url = format!("{}/api/refresh", &*BACKEND_URL);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    parse_json(response).await
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| format!("JSON parse error: {}", e))
    } else {
        Err(error_text(response).await)
    }
}

async fn error_text(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        // Try to parse as structured error response first
        Ok(text) => match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(error_response) => error_response.message,
            Err(_) => format!("HTTP error {}: {}", status, text),
        },
        Err(_) => format!("HTTP error: {}", status),
    }
}
