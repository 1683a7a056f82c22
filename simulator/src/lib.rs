//! Simulated ring-light device speaking the same HTTP/JSON contract as the
//! firmware.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use ringlight_common::{
    DeviceAck, DeviceStatusResponse, LightState, SimulatorConfig, PATH_BRIGHTNESS,
    PATH_DIRECTION, PATH_GET_STATE, PATH_POWER, PATH_TEMPERATURE,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{info, warn};

pub const INITIAL_BRIGHTNESS: u8 = 255;
pub const INITIAL_TEMPERATURE: u16 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceModel {
    on: bool,
    brightness: u8,
    temperature: u16,
    direction: u8,
    number_of_lights: u16,
}

pub type SharedDevice = Arc<Mutex<DeviceModel>>;

impl DeviceModel {
    pub fn new(number_of_lights: u16) -> Self {
        Self {
            on: false,
            brightness: INITIAL_BRIGHTNESS,
            temperature: INITIAL_TEMPERATURE,
            direction: 0,
            number_of_lights,
        }
    }

    pub fn shared(number_of_lights: u16) -> SharedDevice {
        Arc::new(Mutex::new(Self::new(number_of_lights)))
    }

    pub fn light(&self) -> LightState {
        LightState {
            on: u8::from(self.on),
            brightness: self.brightness,
            temperature: self.temperature,
            direction: self.direction,
        }
    }

    pub fn status(&self) -> DeviceStatusResponse {
        DeviceStatusResponse {
            lights: vec![self.light()],
            number_of_lights: Some(self.number_of_lights),
        }
    }

    /// Anything other than `power: 1` switches the light off.
    pub fn apply_power(&mut self, doc: &Value) {
        let on = doc.get("power").and_then(Value::as_u64) == Some(1);
        if on != self.on {
            info!("light switched {}", if on { "on" } else { "off" });
            self.on = on;
        }
    }

    pub fn apply_brightness(&mut self, doc: &Value) {
        let brightness: u8 = narrow(doc, "brightness");
        if brightness != self.brightness {
            info!("brightness set to {brightness}");
            self.brightness = brightness;
        }
    }

    pub fn apply_temperature(&mut self, doc: &Value) {
        let temperature: u16 = narrow(doc, "temperature");
        if temperature != self.temperature {
            info!("temperature set to {temperature}");
            self.temperature = temperature;
        }
    }

    pub fn apply_direction(&mut self, doc: &Value) {
        let direction: u8 = narrow(doc, "direction");
        if direction != self.direction {
            info!("direction set to {direction}");
            self.direction = direction;
        }
    }
}

// Fractions truncate toward zero. Missing fields, negatives and values that do
// not fit the target width read as zero.
fn narrow<T>(doc: &Value, field: &str) -> T
where
    T: TryFrom<u64> + Default,
{
    doc.get(field)
        .and_then(|value| {
            value.as_u64().or_else(|| {
                value
                    .as_f64()
                    .filter(|float| *float >= 0.0 && *float < u64::MAX as f64)
                    .map(|float| float.trunc() as u64)
            })
        })
        .and_then(|value| T::try_from(value).ok())
        .unwrap_or_default()
}

pub fn router(device: SharedDevice) -> Router {
    Router::new()
        .route(PATH_GET_STATE, get(handle_get_state))
        .route(PATH_POWER, post(handle_power))
        .route(PATH_BRIGHTNESS, post(handle_brightness))
        .route(PATH_TEMPERATURE, post(handle_temperature))
        .route(PATH_DIRECTION, post(handle_direction))
        .fallback(handle_not_found)
        .with_state(device)
}

pub async fn serve(listener: TcpListener, device: SharedDevice) -> std::io::Result<()> {
    axum::serve(listener, router(device)).await
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = SimulatorConfig::default();
    config.apply_env(|key| std::env::var(key).ok());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind simulator at {addr}"))?;

    info!(
        "simulated ring light with {} lights listening on http://{addr}",
        config.number_of_lights
    );
    serve(listener, DeviceModel::shared(config.number_of_lights)).await?;
    Ok(())
}

async fn handle_get_state(State(device): State<SharedDevice>) -> impl IntoResponse {
    Json(device.lock().await.status())
}

async fn handle_power(State(device): State<SharedDevice>, body: Bytes) -> impl IntoResponse {
    apply(&device, &body, DeviceModel::apply_power).await
}

async fn handle_brightness(State(device): State<SharedDevice>, body: Bytes) -> impl IntoResponse {
    apply(&device, &body, DeviceModel::apply_brightness).await
}

async fn handle_temperature(State(device): State<SharedDevice>, body: Bytes) -> impl IntoResponse {
    apply(&device, &body, DeviceModel::apply_temperature).await
}

async fn handle_direction(State(device): State<SharedDevice>, body: Bytes) -> impl IntoResponse {
    apply(&device, &body, DeviceModel::apply_direction).await
}

async fn apply(
    device: &SharedDevice,
    body: &[u8],
    update: fn(&mut DeviceModel, &Value),
) -> axum::response::Response {
    let doc = match serde_json::from_slice::<Value>(body) {
        Ok(doc) => doc,
        Err(err) => {
            warn!("rejecting malformed command body: {err}");
            return (StatusCode::BAD_REQUEST, Json(DeviceAck::failed())).into_response();
        }
    };

    update(&mut *device.lock().await, &doc);
    Json(DeviceAck::success()).into_response()
}

async fn handle_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
