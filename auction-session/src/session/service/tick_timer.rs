use super::Service;

impl Service {
    /// Advances the round clock by one second and broadcasts the new state.
    ///
    /// Nothing is published while the timer is not running.
    pub async fn tick_timer(&self) {
        let mut session = self.session.lock().await;
        if !session.tick() {
            return;
        }
        if session.timer.remaining_seconds() == 0 {
            tracing::info!(session_id = %session.id, "Round timer expired");
        }
        self.publish(&session);
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            api::console::UpdateEvent,
            kernel::tabular::MockTabularStore,
            session::service::{
                add_participant::AddParticipantInput,
                finalize_setup::FinalizeSetupInput,
                tests::{
                    bid,
                    config,
                    config_input,
                    participant,
                    service_with,
                    steps,
                },
                Config,
            },
        },
        auction_session_api_types::session::TimerState,
    };

    #[tokio::test]
    async fn test_tick_expires_round_without_blocking_bids() {
        let (service, mut receiver) = service_with(
            Config {
                round_duration_secs: 2,
                ..config()
            },
            MockTabularStore::new(),
        );
        for id in ["1", "2"] {
            service
                .add_participant(AddParticipantInput {
                    participant: participant(id),
                })
                .await
                .unwrap();
        }
        service
            .finalize_setup(FinalizeSetupInput {
                config: config_input(),
            })
            .await
            .unwrap();

        service.tick_timer().await;
        service.start_timer().await.unwrap();
        while receiver.try_recv().is_ok() {}

        service.tick_timer().await;
        service.tick_timer().await;
        service.tick_timer().await;
        let snapshot = service.get_snapshot().await;
        assert_eq!(snapshot.remaining_seconds, 0);
        assert_eq!(snapshot.timer_state, TimerState::Expired);

        let mut published = 0;
        while let Ok(event) = receiver.try_recv() {
            if let UpdateEvent::PublicDisplay(display) = event {
                assert!(display.remaining_seconds < 2);
                published += 1;
            }
        }
        assert_eq!(published, 2);

        let snapshot = bid(&service, "1", steps(1)).await.unwrap();
        assert_eq!(snapshot.remaining_seconds, 2);
        assert_eq!(snapshot.timer_state, TimerState::Idle);
    }
}
