use std::time::Duration;

use ringlight_common::surface::reflect_light;
use tokio::{sync::oneshot, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{device::DeviceLink, panel::SharedPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Reconciled,
    Empty,
    Failed,
}

/// Periodically pulls device truth into the panel.
#[derive(Clone)]
pub struct StatePoller<D> {
    device: D,
    panel: SharedPanel,
    interval: Duration,
}

impl<D: DeviceLink> StatePoller<D> {
    pub fn new(device: D, panel: SharedPanel, interval: Duration) -> Self {
        Self {
            device,
            panel,
            interval,
        }
    }

    /// One poll cycle. Failures leave the panel untouched; the next tick is
    /// the retry.
    pub async fn poll_once(&self) -> PollOutcome {
        let status = match self.device.fetch_state().await {
            Ok(status) => status,
            Err(err) => {
                warn!("failed to fetch light state: {err}");
                return PollOutcome::Failed;
            }
        };

        let Some(light) = status.primary() else {
            debug!("device reported no lights, nothing to reconcile");
            return PollOutcome::Empty;
        };

        let mut panel = self.panel.lock().await;
        panel.state.reconcile(light);
        reflect_light(&mut panel.view, light, status.number_of_lights);
        debug!("reconciled light state: {light:?}");
        PollOutcome::Reconciled
    }

    /// Polls immediately, then once per interval until stopped. Each tick
    /// runs its fetch as a separate task, so a slow response may overlap the
    /// next cycle; whichever completes last wins.
    pub fn spawn(self) -> PollerHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!("state poller started, interval {:?}", self.interval);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let poller = self.clone();
                        tokio::spawn(async move {
                            poller.poll_once().await;
                        });
                    }
                    _ = &mut stop_rx => break,
                }
            }

            info!("state poller stopped");
        });

        PollerHandle {
            stop: stop_tx,
            task,
        }
    }
}

pub struct PollerHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stops scheduling new cycles. Fetches already in flight still complete.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        if let Err(err) = self.task.await {
            warn!("state poller task ended abnormally: {err}");
        }
    }
}
