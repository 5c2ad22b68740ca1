//! Editing API used by the builder while previewing.
//!
//! Every mutation is a load-modify-save of page.toml; the file watcher
//! then pushes a reload to open preview tabs.

use super::page_toml_path;
use super::preview::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
};
use page_kit_core::{Page, PlacedBlock, parse_page_toml, save_page_toml};
use page_kit_generator::PaletteEntry;
use serde::Deserialize;
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/palette", get(palette))
        .route("/blocks", get(list_blocks).post(place_block))
        .route("/blocks/{id}", put(update_block).delete(remove_block))
        .route("/blocks/{id}/move", post(move_block))
        .route("/render", post(render_block))
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<page_kit_core::Error> for ApiError {
    fn from(err: page_kit_core::Error) -> Self {
        let status = match err {
            page_kit_core::Error::BlockNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("page edit failed: {}", err);
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

fn empty_object() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize)]
struct PlaceRequest {
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default = "empty_object")]
    config: Value,
}

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    config: Value,
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    index: usize,
}

#[derive(Debug, Deserialize)]
struct RenderRequest {
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default = "empty_object")]
    config: Value,
}

fn require_object(config: &Value) -> ApiResult<()> {
    if config.is_object() {
        Ok(())
    } else {
        Err(ApiError::bad_request("config must be a JSON object"))
    }
}

/// Load page.toml, apply `edit`, and save it back under the edit lock
async fn edit_page<T>(
    state: &AppState,
    edit: impl FnOnce(&mut Page) -> ApiResult<T>,
) -> ApiResult<T> {
    let _guard = state.edit_lock.lock().await;
    let path = page_toml_path(&state.page_dir);
    let mut page = parse_page_toml(&path)?;
    let out = edit(&mut page)?;
    save_page_toml(&path, &page)?;
    Ok(out)
}

async fn palette(State(state): State<AppState>) -> Json<Vec<PaletteEntry>> {
    Json(state.registry.palette())
}

async fn list_blocks(State(state): State<AppState>) -> ApiResult<Json<Vec<PlacedBlock>>> {
    let page = parse_page_toml(page_toml_path(&state.page_dir))?;
    Ok(Json(page.blocks))
}

async fn place_block(
    State(state): State<AppState>,
    Json(req): Json<PlaceRequest>,
) -> ApiResult<(StatusCode, Json<PlacedBlock>)> {
    if !state.registry.contains(&req.type_tag) {
        return Err(ApiError::bad_request(format!(
            "Unknown block type '{}'",
            req.type_tag
        )));
    }
    require_object(&req.config)?;

    let block = edit_page(&state, |page| {
        let id = page.place(req.type_tag, req.config);
        page.block(&id)
            .cloned()
            .ok_or_else(|| page_kit_core::Error::BlockNotFound(id).into())
    })
    .await?;

    tracing::info!(id = %block.id, type_tag = %block.type_tag, "block placed");
    Ok((StatusCode::CREATED, Json(block)))
}

async fn update_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<Json<PlacedBlock>> {
    require_object(&req.config)?;
    let block = edit_page(&state, |page| Ok(page.update(&id, req.config)?.clone())).await?;
    Ok(Json(block))
}

async fn remove_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    edit_page(&state, |page| Ok(page.remove(&id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn move_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> ApiResult<Json<Vec<PlacedBlock>>> {
    let blocks = edit_page(&state, |page| {
        page.move_block(&id, req.index)?;
        Ok(page.blocks.clone())
    })
    .await?;
    Ok(Json(blocks))
}

/// Render one block as an HTML fragment; 204 when it renders nothing
async fn render_block(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Response {
    match state.registry.render_html(&req.type_tag, req.config) {
        Some(html) => Html(html).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
