use {
    super::Service,
    crate::api::SessionError,
    auction_session_api_types::session::Snapshot,
};

impl Service {
    /// Drops the latest bid. The round timer is left as it is.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn undo_last_bid(&self) -> Result<Snapshot, SessionError> {
        let mut session = self.session.lock().await;
        let removed = session.undo_last()?;
        tracing::info!(
            sequence_number = removed.sequence_number,
            participant_id = %removed.participant_id,
            "Bid withdrawn"
        );
        Ok(self.publish(&session))
    }
}
