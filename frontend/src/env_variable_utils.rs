use lazy_static::lazy_static;
use wasm_bindgen::JsValue;
use web_sys::window;

lazy_static! {
    pub static ref BACKEND_URL: String = get_backend_url();
    pub static ref POLL_INTERVAL_MS: u32 = get_poll_interval_ms();
}

pub fn get_env_var(key: &str) -> Option<String> {
    let window = window()?;

    let env_config = js_sys::Reflect::get(&window, &JsValue::from_str("ENV_CONFIG")).ok()?;

    if env_config.is_undefined() {
        log::warn!("ENV_CONFIG is undefined - environment variables not loaded");
        return None;
    }

    let value = js_sys::Reflect::get(&env_config, &JsValue::from_str(key)).ok()?;

    if !value.is_undefined() {
        value.as_string()
    } else {
        log::warn!("Environment variable '{}' is undefined", key);
        None
    }
}

pub fn get_backend_url() -> String {
    get_env_var("BACKEND_URL").unwrap_or_else(|| "http://localhost:8000".to_string())
}

pub fn get_app_name() -> String {
    get_env_var("APP_NAME").unwrap_or_else(|| "Social Media Stats".to_string())
}

pub fn get_poll_interval_ms() -> u32 {
    get_env_var("POLL_INTERVAL_MS")
        .and_then(|value| value.parse().ok())
        .unwrap_or(1000)
}
