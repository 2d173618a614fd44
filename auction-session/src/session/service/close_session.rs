use {
    super::Service,
    crate::api::{
        console::UpdateEvent,
        SessionError,
    },
    auction_session_api_types::session::AuctionResult,
};

impl Service {
    /// Freezes the ledger and announces the winner.
    #[tracing::instrument(skip_all, fields(session_id = %self.session_id), err(level = tracing::Level::TRACE))]
    pub async fn close_session(&self) -> Result<AuctionResult, SessionError> {
        let mut session = self.session.lock().await;
        let result = session.close()?.into_api(session.id);
        tracing::info!(
            winner_id = ?result.winner_id,
            winning_price = ?result.winning_price,
            total_bids = result.total_bids,
            "Auction session closed"
        );
        self.publish(&session);
        self.send_event(UpdateEvent::AuctionResult(result.clone()));
        Ok(result)
    }
}
