//! Axum front end: the page, the current chart, and the selection event channel.

mod surface;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{error, info};

use crate::api::ChartComposer;
use crate::config::ServerConfig;
use crate::error::{ExplorerError, ExplorerResult};
use crate::interaction::{Axis, ReactiveBinder, SelectionChange, SurfaceFrame};
use crate::layout::{CHART_ENDPOINT, LayoutConfig, PageLayout, SELECTION_ENDPOINT};
use crate::render::{error_document, render_page};

pub use surface::WatchSurface;

pub const RENDER_GENERATION_HEADER: &str = "x-render-generation";

/// Shared handler state. Cloned per request; the binder and frame channel are shared.
#[derive(Clone)]
pub struct AppState {
    binder: Arc<ReactiveBinder<WatchSurface>>,
    frames: watch::Receiver<Option<SurfaceFrame>>,
    layout: Arc<LayoutConfig>,
}

impl AppState {
    /// Builds the binder and renders the default selection before any request.
    pub fn new(composer: ChartComposer, layout: LayoutConfig) -> ExplorerResult<Self> {
        layout.validate()?;
        let (surface, frames) = WatchSurface::channel();
        let binder = ReactiveBinder::new(composer, surface)?;
        Ok(Self {
            binder: Arc::new(binder),
            frames,
            layout: Arc::new(layout),
        })
    }

    #[must_use]
    pub fn binder(&self) -> &ReactiveBinder<WatchSurface> {
        &self.binder
    }

    #[must_use]
    pub fn current_frame(&self) -> Option<SurfaceFrame> {
        self.frames.borrow().clone()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionRequest {
    pub axis: Axis,
    pub key: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route(CHART_ENDPOINT, get(chart_handler))
        .route(SELECTION_ENDPOINT, post(selection_handler))
        .with_state(state)
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(config: &ServerConfig, state: AppState) -> ExplorerResult<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ExplorerError::Server(format!("failed to bind {addr}: {e}")))?;
    info!(%addr, "serving penguin explorer");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| ExplorerError::Server(format!("server stopped: {e}")))
}

pub async fn page_handler(State(state): State<AppState>) -> Html<String> {
    let layout = PageLayout::build(&state.layout, &state.binder.selection());
    Html(render_page(&layout))
}

pub async fn chart_handler(State(state): State<AppState>) -> Response {
    match state.current_frame() {
        Some(frame) => frame_response(&frame),
        None => unavailable("chart has not been rendered yet"),
    }
}

/// Applies one dropdown change and answers with the frame that reflects it.
pub async fn selection_handler(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Response {
    let change = SelectionChange::new(request.axis, request.key);
    let generation = match state.binder.dispatch(change) {
        Ok(generation) => generation,
        Err(err) => {
            error!(error = %err, "selection dispatch failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(error_document(&err.to_string())),
            )
                .into_response();
        }
    };

    let mut frames = state.frames.clone();
    let frame = match frames
        .wait_for(|frame| {
            frame
                .as_ref()
                .is_some_and(|frame| frame.generation >= generation)
        })
        .await
    {
        Ok(frame) => (*frame).clone(),
        Err(_) => None,
    };

    match frame {
        Some(frame) => frame_response(&frame),
        None => unavailable("chart surface closed"),
    }
}

fn frame_response(frame: &SurfaceFrame) -> Response {
    let status = if frame.is_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    let mut response = (status, Html(frame.html().into_owned())).into_response();
    let headers = response.headers_mut();
    headers.insert(
        RENDER_GENERATION_HEADER,
        HeaderValue::from(frame.generation),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn unavailable(message: &str) -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, Html(error_document(message))).into_response()
}
