use std::sync::Arc;

use ringlight_common::{LocalControlState, PanelView};
use serde::Serialize;
use tokio::sync::Mutex;

/// Local control state together with the surface it is reflected into. Both
/// the dispatcher and the poller write through the same lock.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Panel {
    pub state: LocalControlState,
    pub view: PanelView,
}

pub type SharedPanel = Arc<Mutex<Panel>>;

impl Panel {
    pub fn shared() -> SharedPanel {
        Arc::new(Mutex::new(Self::default()))
    }
}
