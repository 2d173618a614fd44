use {
    super::Service,
    crate::api::SessionError,
    auction_session_api_types::session::Snapshot,
};

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn pause_timer(&self) -> Result<Snapshot, SessionError> {
        let mut session = self.session.lock().await;
        session.pause_timer()?;
        tracing::debug!(
            remaining_seconds = session.timer.remaining_seconds(),
            "Round timer paused"
        );
        Ok(self.publish(&session))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            session::service::tests::bidding_service,
            timer::TimerState,
        },
        auction_session_api_types::session as api,
    };

    #[tokio::test]
    async fn test_pause_and_resume() {
        let (service, _receiver) = bidding_service().await;
        assert_eq!(
            service.pause_timer().await,
            Err(SessionError::InvalidTimerTransition {
                from:   TimerState::Idle,
                action: "pause",
            })
        );

        service.start_timer().await.unwrap();
        service.tick_timer().await;
        let snapshot = service.pause_timer().await.unwrap();
        assert_eq!(snapshot.timer_state, api::TimerState::Paused);
        assert_eq!(snapshot.remaining_seconds, 59);

        service.tick_timer().await;
        assert_eq!(service.get_snapshot().await.remaining_seconds, 59);

        service.start_timer().await.unwrap();
        service.tick_timer().await;
        assert_eq!(service.get_snapshot().await.remaining_seconds, 58);
    }
}
