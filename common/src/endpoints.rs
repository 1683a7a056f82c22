pub const PATH_GET_STATE: &str = "/getstate";

pub const PATH_POWER: &str = "/power";
pub const PATH_BRIGHTNESS: &str = "/brightness";
pub const PATH_TEMPERATURE: &str = "/temperature";
pub const PATH_DIRECTION: &str = "/direction";
