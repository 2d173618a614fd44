use {
    super::Service,
    crate::api::SessionError,
    auction_session_api_types::session::Snapshot,
};

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn start_timer(&self) -> Result<Snapshot, SessionError> {
        let mut session = self.session.lock().await;
        session.start_timer()?;
        tracing::debug!(
            remaining_seconds = session.timer.remaining_seconds(),
            "Round timer started"
        );
        Ok(self.publish(&session))
    }
}
