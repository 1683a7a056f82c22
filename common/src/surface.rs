use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{DeviceCommand, LightState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InputId {
    Brightness,
    Temperature,
    Direction,
}

impl InputId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Temperature => "temperature",
            Self::Direction => "direction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LabelId {
    Brightness,
    Temperature,
    Direction,
    Power,
}

impl LabelId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brightness => "BrightnessLabel",
            Self::Temperature => "TemperatureLabel",
            Self::Direction => "DirectionLabel",
            Self::Power => "PowerLabel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ButtonId {
    On,
    Off,
}

impl ButtonId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "onbutton",
            Self::Off => "offbutton",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Highlighted,
    Muted,
}

impl ButtonStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Highlighted => "background-color:green",
            Self::Muted => "background-color:grey",
        }
    }
}

pub trait ControlSurface {
    fn set_input_value(&mut self, input: InputId, value: u16);
    fn set_input_max(&mut self, input: InputId, max: u16);
    fn set_label(&mut self, label: LabelId, text: String);
    fn set_button_style(&mut self, button: ButtonId, style: ButtonStyle);
}

pub fn reflect_power<S: ControlSurface + ?Sized>(surface: &mut S, on: bool) {
    let (label, on_style, off_style) = if on {
        ("On", ButtonStyle::Highlighted, ButtonStyle::Muted)
    } else {
        ("Off", ButtonStyle::Muted, ButtonStyle::Highlighted)
    };
    surface.set_label(LabelId::Power, label.to_string());
    surface.set_button_style(ButtonId::On, on_style);
    surface.set_button_style(ButtonId::Off, off_style);
}

pub fn reflect_command<S: ControlSurface + ?Sized>(surface: &mut S, command: DeviceCommand) {
    match command {
        DeviceCommand::Power(on) => reflect_power(surface, on),
        DeviceCommand::Brightness(value) => {
            surface.set_label(LabelId::Brightness, value.to_string());
        }
        DeviceCommand::Temperature(value) => {
            surface.set_label(LabelId::Temperature, value.to_string());
        }
        DeviceCommand::Direction(value) => {
            surface.set_label(LabelId::Direction, value.to_string());
        }
    }
}

pub fn reflect_light<S: ControlSurface + ?Sized>(
    surface: &mut S,
    light: &LightState,
    number_of_lights: Option<u16>,
) {
    let fields = [
        (InputId::Brightness, LabelId::Brightness, u16::from(light.brightness)),
        (InputId::Temperature, LabelId::Temperature, light.temperature),
        (InputId::Direction, LabelId::Direction, u16::from(light.direction)),
    ];
    for (input, label, value) in fields {
        surface.set_input_value(input, value);
        surface.set_label(label, value.to_string());
    }

    if let Some(max) = number_of_lights {
        surface.set_input_max(InputId::Direction, max);
    }
    reflect_power(surface, light.is_on());
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub value: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelView {
    inputs: BTreeMap<&'static str, InputView>,
    labels: BTreeMap<&'static str, String>,
    buttons: BTreeMap<&'static str, &'static str>,
}

impl PanelView {
    pub fn input(&self, input: InputId) -> InputView {
        self.inputs
            .get(input.as_str())
            .copied()
            .unwrap_or_default()
    }

    pub fn label(&self, label: LabelId) -> Option<&str> {
        self.labels.get(label.as_str()).map(String::as_str)
    }

    pub fn button_style(&self, button: ButtonId) -> Option<&'static str> {
        self.buttons.get(button.as_str()).copied()
    }
}

impl ControlSurface for PanelView {
    fn set_input_value(&mut self, input: InputId, value: u16) {
        self.inputs.entry(input.as_str()).or_default().value = Some(value);
    }

    fn set_input_max(&mut self, input: InputId, max: u16) {
        self.inputs.entry(input.as_str()).or_default().max = Some(max);
    }

    fn set_label(&mut self, label: LabelId, text: String) {
        self.labels.insert(label.as_str(), text);
    }

    fn set_button_style(&mut self, button: ButtonId, style: ButtonStyle) {
        self.buttons.insert(button.as_str(), style.as_css());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn polled_light_fills_every_control() {
        let mut view = PanelView::default();
        let light = LightState {
            on: 1,
            brightness: 120,
            temperature: 6500,
            direction: 3,
        };

        reflect_light(&mut view, &light, Some(12));

        assert_eq!(view.label(LabelId::Power), Some("On"));
        assert_eq!(
            view.button_style(ButtonId::On),
            Some("background-color:green")
        );
        assert_eq!(
            view.button_style(ButtonId::Off),
            Some("background-color:grey")
        );
        assert_eq!(view.input(InputId::Brightness).value, Some(120));
        assert_eq!(view.label(LabelId::Brightness), Some("120"));
        assert_eq!(view.input(InputId::Temperature).value, Some(6500));
        assert_eq!(view.label(LabelId::Temperature), Some("6500"));
        assert_eq!(
            view.input(InputId::Direction),
            InputView {
                value: Some(3),
                max: Some(12),
            }
        );
        assert_eq!(view.label(LabelId::Direction), Some("3"));
    }

    #[test]
    fn unknown_light_count_keeps_direction_max() {
        let mut view = PanelView::default();
        let light = LightState {
            on: 0,
            brightness: 10,
            temperature: 3_000,
            direction: 7,
        };

        reflect_light(&mut view, &light, Some(12));
        reflect_light(&mut view, &light, None);

        assert_eq!(
            view.input(InputId::Direction),
            InputView {
                value: Some(7),
                max: Some(12),
            }
        );
    }

    #[test]
    fn power_off_highlights_off_button() {
        let mut view = PanelView::default();
        reflect_power(&mut view, false);

        assert_eq!(view.label(LabelId::Power), Some("Off"));
        assert_eq!(
            view.button_style(ButtonId::On),
            Some("background-color:grey")
        );
        assert_eq!(
            view.button_style(ButtonId::Off),
            Some("background-color:green")
        );
    }

    #[test]
    fn command_reflection_only_touches_its_label() {
        let mut view = PanelView::default();
        reflect_command(&mut view, DeviceCommand::Brightness(42));

        assert_eq!(view.label(LabelId::Brightness), Some("42"));
        assert_eq!(view.input(InputId::Brightness).value, None);
        assert_eq!(view.label(LabelId::Power), None);
    }

    #[test]
    fn serializes_by_element_id() {
        let mut view = PanelView::default();
        reflect_light(
            &mut view,
            &LightState {
                on: 0,
                brightness: 1,
                temperature: 700,
                direction: 0,
            },
            Some(5),
        );

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["inputs"]["direction"]["max"], 5);
        assert_eq!(json["labels"]["PowerLabel"], "Off");
        assert_eq!(json["buttons"]["offbutton"], "background-color:green");
        assert!(json["inputs"]["brightness"].get("max").is_none());
    }
}
