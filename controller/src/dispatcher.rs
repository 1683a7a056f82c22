use ringlight_common::{
    surface::reflect_command, validate_brightness, validate_direction, validate_temperature,
    DeviceCommand,
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{device::DeviceLink, panel::SharedPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Acknowledged,
    Failed,
}

/// Background send of one command. Its outcome is informational only.
pub type CommandTask = JoinHandle<CommandOutcome>;

/// Applies user changes optimistically and pushes them to the device.
#[derive(Clone)]
pub struct CommandDispatcher<D> {
    device: D,
    panel: SharedPanel,
}

impl<D: DeviceLink> CommandDispatcher<D> {
    pub fn new(device: D, panel: SharedPanel) -> Self {
        Self { device, panel }
    }

    pub async fn set_power(&self, on: bool) -> CommandTask {
        self.dispatch(DeviceCommand::Power(on)).await
    }

    pub async fn set_brightness(&self, value: i64) -> Option<CommandTask> {
        self.dispatch_valid(validate_brightness(value)).await
    }

    pub async fn set_temperature(&self, value: i64) -> Option<CommandTask> {
        self.dispatch_valid(validate_temperature(value)).await
    }

    pub async fn set_direction(&self, value: i64) -> Option<CommandTask> {
        self.dispatch_valid(validate_direction(value)).await
    }

    async fn dispatch_valid(&self, command: Option<DeviceCommand>) -> Option<CommandTask> {
        match command {
            Some(command) => Some(self.dispatch(command).await),
            None => None,
        }
    }

    async fn dispatch(&self, command: DeviceCommand) -> CommandTask {
        {
            let mut panel = self.panel.lock().await;
            panel.state.apply(command);
            reflect_command(&mut panel.view, command);
        }

        let device = self.device.clone();
        tokio::spawn(async move {
            match device.send_command(command).await {
                Ok(ack) => {
                    info!("{} command acknowledged: {ack}", command.field());
                    CommandOutcome::Acknowledged
                }
                Err(err) => {
                    warn!("{} command failed: {err}", command.field());
                    CommandOutcome::Failed
                }
            }
        })
    }
}
