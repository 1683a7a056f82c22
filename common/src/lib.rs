pub mod config;
pub mod control;
pub mod endpoints;
pub mod surface;
pub mod types;

pub use config::{ControllerConfig, SimulatorConfig};
pub use control::{
    parse_power, validate_brightness, validate_direction, validate_temperature, LocalControlState,
};
pub use endpoints::*;
pub use surface::{ControlSurface, PanelView};
pub use types::{DeviceAck, DeviceCommand, DeviceStatusResponse, LightState};
