use crate::state::messages::UiEvent;
use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Live-score polling for the squares game. Emits `UiEvent::PollTick`
/// immediately on `start` and then once per interval until stopped.
/// Dropping the poller stops it, so no timer outlives its owner.
pub struct ScorePoller {
    ui_events: mpsc::Sender<UiEvent>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl ScorePoller {
    pub fn new(ui_events: mpsc::Sender<UiEvent>, period: Duration) -> Self {
        Self { ui_events, period, task: None }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// No-op if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        debug!("score polling started, every {}s", self.period.as_secs());
        let ui_events = self.ui_events.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if ui_events.send(UiEvent::PollTick).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Returns whether a running poller was stopped.
    pub fn stop(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                debug!("score polling stopped");
                true
            }
            None => false,
        }
    }
}

impl Drop for ScorePoller {
    fn drop(&mut self) {
        self.stop();
    }
}
