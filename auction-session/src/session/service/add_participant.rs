use {
    super::Service,
    crate::{
        api::SessionError,
        participant::entities::Participant,
    },
    auction_session_api_types::{
        participant::ParticipantCreate,
        session::Snapshot,
    },
};

#[derive(Debug, Clone)]
pub struct AddParticipantInput {
    pub participant: ParticipantCreate,
}

impl Service {
    #[tracing::instrument(
        skip_all,
        fields(participant_id = %input.participant.id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn add_participant(&self, input: AddParticipantInput) -> Result<Snapshot, SessionError> {
        let participant = Participant::try_from(input.participant)?;
        let mut session = self.session.lock().await;
        session.add_participant(participant)?;
        tracing::info!(participants = session.registry.len(), "Participant registered");
        Ok(self.publish(&session))
    }
}
