use {
    super::Service,
    crate::server::{
        EXIT_CHECK_INTERVAL,
        SHOULD_EXIT,
    },
    std::{
        sync::atomic::Ordering,
        time::Duration,
    },
    tokio::time::MissedTickBehavior,
};

const TIMER_TICK_INTERVAL: Duration = Duration::from_secs(1);

impl Service {
    /// Drives the round timer until the application shuts down.
    pub async fn run_timer_loop(&self) -> anyhow::Result<()> {
        tracing::info!("Starting round timer...");
        let mut tick_interval = tokio::time::interval(TIMER_TICK_INTERVAL);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval completes immediately.
        tick_interval.tick().await;
        let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);

        while !SHOULD_EXIT.load(Ordering::Acquire) {
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.tick_timer().await;
                }
                _ = exit_check_interval.tick() => {}
            }
        }
        tracing::info!("Shutting down round timer...");
        Ok(())
    }
}
