use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

pub struct Poller {
    stop: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl Poller {
    pub async fn cancel(mut self) {
        let _ = self.stop.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
    }
}

// Runs never overlap; ticks missed during a slow run are delayed.
pub fn spawn_poller<F, Fut>(name: &'static str, period: Duration, mut job: F) -> Poller
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (stop, mut stopped) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = stopped.changed() => break,
                _ = ticker.tick() => {
                    debug!("poller {name} tick");
                    job().await;
                }
            }
        }
        debug!("poller {name} stopped");
    });

    Poller {
        stop,
        task: Some(task),
    }
}
