use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

use crate::endpoints::{PATH_BRIGHTNESS, PATH_DIRECTION, PATH_POWER, PATH_TEMPERATURE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    pub on: u8,
    pub brightness: u8,
    pub temperature: u16,
    pub direction: u8,
}

impl LightState {
    pub fn is_on(&self) -> bool {
        self.on == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatusResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lights: Vec<LightState>,
    #[serde(
        rename = "numberOfLights",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_lights: Option<u16>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl DeviceStatusResponse {
    pub fn primary(&self) -> Option<&LightState> {
        self.lights.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    Power(bool),
    Brightness(u8),
    Temperature(u16),
    Direction(u8),
}

impl DeviceCommand {
    pub fn path(self) -> &'static str {
        match self {
            Self::Power(_) => PATH_POWER,
            Self::Brightness(_) => PATH_BRIGHTNESS,
            Self::Temperature(_) => PATH_TEMPERATURE,
            Self::Direction(_) => PATH_DIRECTION,
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Self::Power(_) => "power",
            Self::Brightness(_) => "brightness",
            Self::Temperature(_) => "temperature",
            Self::Direction(_) => "direction",
        }
    }

    pub fn value(self) -> u16 {
        match self {
            Self::Power(on) => u16::from(on),
            Self::Brightness(value) | Self::Direction(value) => u16::from(value),
            Self::Temperature(value) => value,
        }
    }
}

impl Serialize for DeviceCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field(), &self.value())?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAck {
    pub message: String,
}

impl DeviceAck {
    pub fn success() -> Self {
        Self {
            message: "success".to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            message: "failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn command_bodies_match_device_contract() {
        let body = serde_json::to_string(&DeviceCommand::Power(true)).unwrap();
        assert_eq!(body, r#"{"power":1}"#);

        let body = serde_json::to_string(&DeviceCommand::Power(false)).unwrap();
        assert_eq!(body, r#"{"power":0}"#);

        let body = serde_json::to_string(&DeviceCommand::Temperature(6500)).unwrap();
        assert_eq!(body, r#"{"temperature":6500}"#);
        assert_eq!(DeviceCommand::Temperature(6500).path(), "/temperature");
    }

    #[test]
    fn parses_state_with_camel_case_light_count() {
        let raw = r#"{"numberOfLights":26,"lights":[{"on":1,"brightness":120,"temperature":6500,"direction":3}]}"#;
        let status: DeviceStatusResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(status.number_of_lights, Some(26));
        let light = status.primary().unwrap();
        assert!(light.is_on());
        assert_eq!(
            *light,
            LightState {
                on: 1,
                brightness: 120,
                temperature: 6500,
                direction: 3,
            }
        );
    }

    #[test]
    fn missing_lights_is_treated_as_empty() {
        let status: DeviceStatusResponse =
            serde_json::from_str(r#"{"numberOfLights":12}"#).unwrap();
        assert!(status.primary().is_none());
        assert_eq!(status.number_of_lights, Some(12));
    }

    #[test]
    fn null_lights_is_treated_as_empty() {
        let status: DeviceStatusResponse =
            serde_json::from_str(r#"{"lights":null,"numberOfLights":26}"#).unwrap();
        assert!(status.primary().is_none());
    }

    #[test]
    fn light_count_is_optional() {
        let raw = r#"{"lights":[{"on":1,"brightness":120,"temperature":6500,"direction":3}]}"#;
        let status: DeviceStatusResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(status.number_of_lights, None);
        assert_eq!(status.primary().map(|light| light.brightness), Some(120));
    }

    #[test]
    fn out_of_range_brightness_fails_to_decode() {
        let raw = r#"{"numberOfLights":1,"lights":[{"on":0,"brightness":300,"temperature":5000,"direction":0}]}"#;
        assert!(serde_json::from_str::<DeviceStatusResponse>(raw).is_err());
    }
}
