use std::ops::Range;

use serde::Serialize;
use thiserror::Error;

use crate::types::{DeviceCommand, LightState};

pub const BRIGHTNESS_RANGE: Range<i64> = 0..256;
pub const TEMPERATURE_RANGE: Range<i64> = 700..40_000;
// Fixed upper bound, not tied to the polled `numberOfLights`.
pub const DIRECTION_RANGE: Range<i64> = 0..27;

pub const DEFAULT_TEMPERATURE: u16 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalControlState {
    pub power: bool,
    pub brightness: u8,
    pub temperature: u16,
    pub direction: u8,
}

impl Default for LocalControlState {
    fn default() -> Self {
        Self {
            power: false,
            brightness: 0,
            temperature: DEFAULT_TEMPERATURE,
            direction: 0,
        }
    }
}

impl LocalControlState {
    pub fn apply(&mut self, command: DeviceCommand) {
        match command {
            DeviceCommand::Power(on) => self.power = on,
            DeviceCommand::Brightness(value) => self.brightness = value,
            DeviceCommand::Temperature(value) => self.temperature = value,
            DeviceCommand::Direction(value) => self.direction = value,
        }
    }

    pub fn reconcile(&mut self, light: &LightState) {
        self.power = light.is_on();
        self.brightness = light.brightness;
        self.temperature = light.temperature;
        self.direction = light.direction;
    }
}

pub fn validate_brightness(value: i64) -> Option<DeviceCommand> {
    checked(value, BRIGHTNESS_RANGE)
        .and_then(|value| u8::try_from(value).ok())
        .map(DeviceCommand::Brightness)
}

pub fn validate_temperature(value: i64) -> Option<DeviceCommand> {
    checked(value, TEMPERATURE_RANGE)
        .and_then(|value| u16::try_from(value).ok())
        .map(DeviceCommand::Temperature)
}

pub fn validate_direction(value: i64) -> Option<DeviceCommand> {
    checked(value, DIRECTION_RANGE)
        .and_then(|value| u8::try_from(value).ok())
        .map(DeviceCommand::Direction)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid power value '{0}', expected on/off")]
pub struct ParsePowerError(pub String);

pub fn parse_power(value: &str) -> Result<bool, ParsePowerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "1" | "true" => Ok(true),
        "off" | "0" | "false" => Ok(false),
        _ => Err(ParsePowerError(value.to_string())),
    }
}

fn checked(value: i64, range: Range<i64>) -> Option<i64> {
    range.contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_accepts_only_byte_range() {
        assert_eq!(validate_brightness(0), Some(DeviceCommand::Brightness(0)));
        assert_eq!(
            validate_brightness(255),
            Some(DeviceCommand::Brightness(255))
        );
        assert_eq!(validate_brightness(256), None);
        assert_eq!(validate_brightness(-1), None);
    }

    #[test]
    fn temperature_bounds_are_half_open() {
        assert_eq!(validate_temperature(699), None);
        assert_eq!(
            validate_temperature(700),
            Some(DeviceCommand::Temperature(700))
        );
        assert_eq!(
            validate_temperature(39_999),
            Some(DeviceCommand::Temperature(39_999))
        );
        assert_eq!(validate_temperature(40_000), None);
    }

    #[test]
    fn direction_uses_fixed_bound() {
        assert_eq!(validate_direction(26), Some(DeviceCommand::Direction(26)));
        assert_eq!(validate_direction(27), None);
        assert_eq!(validate_direction(30), None);
        assert_eq!(validate_direction(-3), None);
    }

    #[test]
    fn parses_power_switch_words() {
        assert_eq!(parse_power("ON"), Ok(true));
        assert_eq!(parse_power(" off "), Ok(false));
        assert_eq!(parse_power("1"), Ok(true));
        assert!(parse_power("dim").is_err());
    }

    #[test]
    fn reconcile_overwrites_optimistic_values() {
        let mut state = LocalControlState::default();
        state.apply(DeviceCommand::Brightness(10));
        assert_eq!(state.brightness, 10);

        state.reconcile(&LightState {
            on: 1,
            brightness: 50,
            temperature: 3_200,
            direction: 4,
        });

        assert!(state.power);
        assert_eq!(state.brightness, 50);
        assert_eq!(state.temperature, 3_200);
        assert_eq!(state.direction, 4);
    }

    #[test]
    fn defaults_before_first_poll() {
        let state = LocalControlState::default();
        assert!(!state.power);
        assert_eq!(state.brightness, 0);
        assert_eq!(state.temperature, 5_000);
        assert_eq!(state.direction, 0);
    }
}
