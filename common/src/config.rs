use serde::{Deserialize, Serialize};

pub const MIN_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub device_url: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: Option<u64>,
    pub http_port: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_url: "http://192.168.4.1".to_string(),
            poll_interval_ms: 2_000,
            request_timeout_ms: None,
            http_port: 8080,
        }
    }
}

impl ControllerConfig {
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RINGLIGHT_DEVICE_URL") {
            self.device_url = url;
        }
        if let Some(interval) = lookup("RINGLIGHT_POLL_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.poll_interval_ms = interval;
        }
        if let Some(timeout) = lookup("RINGLIGHT_REQUEST_TIMEOUT_MS").and_then(|v| v.parse().ok())
        {
            self.request_timeout_ms = Some(timeout);
        }
        if let Some(port) = lookup("CONTROLLER_HTTP_PORT").and_then(|v| v.parse().ok()) {
            self.http_port = port;
        }
    }

    pub fn sanitize(&mut self) {
        self.device_url = self.device_url.trim().trim_end_matches('/').to_string();
        if !self.device_url.contains("://") {
            self.device_url = format!("http://{}", self.device_url);
        }

        self.poll_interval_ms = self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        if self.request_timeout_ms == Some(0) {
            self.request_timeout_ms = None;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub number_of_lights: u16,
    pub http_port: u16,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            number_of_lights: 26,
            http_port: 8081,
        }
    }
}

impl SimulatorConfig {
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(lights) = lookup("SIMULATOR_LIGHTS").and_then(|v| v.parse().ok()) {
            self.number_of_lights = lights;
        }
        if let Some(port) = lookup("SIMULATOR_HTTP_PORT").and_then(|v| v.parse().ok()) {
            self.http_port = port;
        }
    }
}
