use pose_core::PoseRecord;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Envelope every pose endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct ApiOutcome {
    pub ok: bool,
    #[serde(default)]
    pub result: serde_json::Value,
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

async fn fetch_json(method: &str, url: &str, body: Option<String>) -> anyhow::Result<String> {
    let init = web::RequestInit::new();
    init.set_method(method);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(&body));
    }
    let request = web::Request::new_with_str_and_init(url, &init).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let response: web::Response = response.dyn_into().map_err(js_err)?;
    if !response.ok() {
        return Err(anyhow::anyhow!("{url}: HTTP {}", response.status()));
    }
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("{url}: non-text response"))
}

fn unwrap_outcome(raw: &str) -> anyhow::Result<serde_json::Value> {
    let outcome: ApiOutcome = serde_json::from_str(raw)?;
    if !outcome.ok {
        return Err(anyhow::anyhow!("server refused: {}", outcome.result));
    }
    Ok(outcome.result)
}

/// POST the record to the backend; returns the server's result message.
pub async fn save_pose(record: &PoseRecord) -> anyhow::Result<String> {
    let body = serde_json::to_string(record)?;
    let raw = fetch_json("POST", "/pose/save", Some(body)).await?;
    let result = unwrap_outcome(&raw)?;
    log::info!("[api] saved pose {:?}", record.name);
    Ok(result.as_str().unwrap_or_default().to_string())
}

pub async fn delete_pose(name: &str) -> anyhow::Result<String> {
    let body = serde_json::to_string(&serde_json::json!({ "name": name }))?;
    let raw = fetch_json("POST", "/pose/delete", Some(body)).await?;
    let result = unwrap_outcome(&raw)?;
    log::info!("[api] deleted pose {name:?}");
    Ok(result.as_str().unwrap_or_default().to_string())
}

/// Fetch every stored pose, for gallery-style hosts.
pub async fn list_poses() -> anyhow::Result<Vec<PoseRecord>> {
    let raw = fetch_json("GET", "/pose/all", None).await?;
    let result = unwrap_outcome(&raw)?;
    Ok(serde_json::from_value(result)?)
}

/// Fetch a single stored pose by name.
pub async fn load_pose(name: &str) -> anyhow::Result<PoseRecord> {
    let body = serde_json::to_string(&serde_json::json!({ "name": name }))?;
    let raw = fetch_json("POST", "/pose/load", Some(body)).await?;
    let result = unwrap_outcome(&raw)?;
    Ok(serde_json::from_value(result)?)
}
