use {
    super::Service,
    crate::{
        api::SessionError,
        ledger::entities::BidMode,
        participant::entities::ParticipantId,
    },
    auction_session_api_types::session::Snapshot,
    time::OffsetDateTime,
};

#[derive(Debug, Clone)]
pub struct SubmitBidInput {
    pub participant_id: ParticipantId,
    pub mode:           BidMode,
}

impl Service {
    #[tracing::instrument(
        skip_all,
        fields(participant_id = %input.participant_id, mode = ?input.mode, sequence_number),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn submit_bid(&self, input: SubmitBidInput) -> Result<Snapshot, SessionError> {
        let mut session = self.session.lock().await;
        let record = session.submit_bid(
            input.participant_id.trim(),
            input.mode,
            OffsetDateTime::now_utc(),
        )?;
        tracing::Span::current().record("sequence_number", record.sequence_number);
        tracing::info!(amount = %record.amount, "Bid accepted");
        Ok(self.publish(&session))
    }
}
