use {
    super::Service,
    crate::{
        api::SessionError,
        participant::entities::ParticipantId,
    },
    auction_session_api_types::session::Snapshot,
};

#[derive(Debug, Clone)]
pub struct RemoveParticipantInput {
    pub participant_id: ParticipantId,
}

impl Service {
    #[tracing::instrument(
        skip_all,
        fields(participant_id = %input.participant_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn remove_participant(
        &self,
        input: RemoveParticipantInput,
    ) -> Result<Snapshot, SessionError> {
        let mut session = self.session.lock().await;
        let removed = session.remove_participant(input.participant_id.trim())?;
        tracing::info!(name = %removed.name, "Participant removed");
        Ok(self.publish(&session))
    }
}
