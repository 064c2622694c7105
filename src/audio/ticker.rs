use std::time::Duration;

use flume::Sender;
use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::audio::traits::{Generation, ResourceEvent, ResourceSignal};

/// Periodic position sampling for the live resource.
///
/// At most one task runs at a time. Starting again replaces the previous
/// task and stopping aborts it.
pub struct PositionTicker {
    period: Duration,
    task: Option<(Generation, JoinHandle<()>)>,
}

impl PositionTicker {
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn start(&mut self, generation: Generation, signals: Sender<ResourceSignal>) {
        self.stop();

        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if signals
                    .send_async(ResourceSignal::new(generation, ResourceEvent::Tick))
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });

        self.task = Some((generation, handle));
    }

    pub fn stop(&mut self) {
        if let Some((_, handle)) = self.task.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn running_for(&self) -> Option<Generation> {
        self.task.as_ref().map(|(generation, _)| *generation)
    }
}

impl Drop for PositionTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
