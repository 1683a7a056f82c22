use std::{future::Future, sync::Arc, time::Duration};

use ringlight_common::{DeviceCommand, DeviceStatusResponse, PATH_GET_STATE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("device responded with status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Request/response link to the ring-light device.
pub trait DeviceLink: Clone + Send + Sync + 'static {
    fn fetch_state(
        &self,
    ) -> impl Future<Output = Result<DeviceStatusResponse, DeviceError>> + Send;

    /// Returns the raw acknowledgement body; its shape is only ever logged.
    fn send_command(
        &self,
        command: DeviceCommand,
    ) -> impl Future<Output = Result<serde_json::Value, DeviceError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpDevice {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl HttpDevice {
    /// Without a timeout, requests rely on the transport's own behaviour.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, DeviceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn json_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, DeviceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(DeviceError::Status(status.as_u16()));
    }

    let data = response.bytes().await?;
    Ok(serde_json::from_slice(&data)?)
}

impl DeviceLink for HttpDevice {
    async fn fetch_state(&self) -> Result<DeviceStatusResponse, DeviceError> {
        let response = self
            .client
            .get(self.endpoint(PATH_GET_STATE))
            .send()
            .await?;
        json_body(response).await
    }

    async fn send_command(&self, command: DeviceCommand) -> Result<serde_json::Value, DeviceError> {
        let response = self
            .client
            .post(self.endpoint(command.path()))
            .json(&command)
            .send()
            .await?;
        json_body(response).await
    }
}
