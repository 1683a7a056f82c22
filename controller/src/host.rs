use std::{collections::HashMap, io::ErrorKind, net::SocketAddr, path::Path, time::Duration};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use ringlight_common::{parse_power, ControllerConfig};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    device::{DeviceLink, HttpDevice},
    dispatcher::CommandDispatcher,
    panel::{Panel, SharedPanel},
    poller::StatePoller,
};

#[derive(Clone)]
struct AppState<D> {
    panel: SharedPanel,
    dispatcher: CommandDispatcher<D>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = match std::env::var("RINGLIGHT_CONFIG") {
        Ok(path) => load_config(Path::new(&path)).await.unwrap_or_else(|err| {
            warn!("failed to load controller config from {path}: {err:#}");
            ControllerConfig::default()
        }),
        Err(_) => ControllerConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());
    config.sanitize();

    let device = HttpDevice::new(
        &config.device_url,
        config.request_timeout_ms.map(Duration::from_millis),
    )
    .context("failed to build device http client")?;
    info!("controlling ring light at {}", device.base_url());

    let panel = Panel::shared();
    let poller = StatePoller::new(
        device.clone(),
        panel.clone(),
        Duration::from_millis(config.poll_interval_ms),
    )
    .spawn();

    let app = router(AppState {
        dispatcher: CommandDispatcher::new(device, panel.clone()),
        panel,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind controller server at {addr}"))?;

    info!("control surface listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.stop().await;
    Ok(())
}

async fn load_config(path: &Path) -> anyhow::Result<ControllerConfig> {
    match tokio::fs::read(path).await {
        Ok(raw) => Ok(serde_json::from_slice::<ControllerConfig>(&raw)?),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(ControllerConfig::default()),
        Err(err) => Err(err.into()),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

fn router<D: DeviceLink>(state: AppState<D>) -> Router {
    Router::new()
        .route("/api/panel", get(handle_get_panel::<D>))
        .route("/api/power", post(handle_set_power::<D>))
        .route("/api/brightness", post(handle_set_brightness::<D>))
        .route("/api/temperature", post(handle_set_temperature::<D>))
        .route("/api/direction", post(handle_set_direction::<D>))
        .with_state(state)
}

async fn handle_get_panel<D: DeviceLink>(State(state): State<AppState<D>>) -> impl IntoResponse {
    let panel = state.panel.lock().await.clone();
    Json(panel)
}

async fn handle_set_power<D: DeviceLink>(
    State(state): State<AppState<D>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(value) = params.get("value") else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'value' parameter");
    };

    match parse_power(value) {
        Ok(on) => {
            state.dispatcher.set_power(on).await;
        }
        Err(err) => info!("ignoring power request: {err}"),
    }

    handle_get_panel(State(state)).await.into_response()
}

async fn handle_set_brightness<D: DeviceLink>(
    State(state): State<AppState<D>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(value) = params.get("value") else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'value' parameter");
    };

    if let Ok(value) = value.trim().parse::<i64>() {
        state.dispatcher.set_brightness(value).await;
    }

    handle_get_panel(State(state)).await.into_response()
}

async fn handle_set_temperature<D: DeviceLink>(
    State(state): State<AppState<D>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(value) = params.get("value") else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'value' parameter");
    };

    if let Ok(value) = value.trim().parse::<i64>() {
        state.dispatcher.set_temperature(value).await;
    }

    handle_get_panel(State(state)).await.into_response()
}

async fn handle_set_direction<D: DeviceLink>(
    State(state): State<AppState<D>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(value) = params.get("value") else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'value' parameter");
    };

    if let Ok(value) = value.trim().parse::<i64>() {
        state.dispatcher.set_direction(value).await;
    }

    handle_get_panel(State(state)).await.into_response()
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}
