use {
    super::entities::{
        ImportSummary,
        Participant,
        ParticipantId,
    },
    crate::api::SessionError,
    auction_session_api_types::participant::ParticipantCreate,
};

/// Roster of the bidders admitted to the session, in registration order.
///
/// The registry itself does not know about the session lifecycle, the session
/// only hands out mutable access while it is in setup.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    participants: Vec<Participant>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn add(&mut self, participant: Participant) -> Result<(), SessionError> {
        if self.contains(&participant.id) {
            return Err(SessionError::DuplicateId(participant.id));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Adds every valid row whose id is not registered yet.
    ///
    /// Duplicates, including repeats inside `rows`, and rows without id or name
    /// are skipped and counted instead of failing the whole import.
    pub fn bulk_import(&mut self, rows: Vec<ParticipantCreate>) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for row in rows {
            let participant = match Participant::try_from(row) {
                Ok(participant) => participant,
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping invalid import row");
                    summary.skipped_invalid += 1;
                    continue;
                }
            };
            match self.add(participant) {
                Ok(()) => summary.added += 1,
                Err(_) => summary.skipped_duplicates += 1,
            }
        }
        summary
    }

    pub fn remove(&mut self, id: &str) -> Result<Participant, SessionError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        Ok(self.participants.remove(index))
    }

    pub fn name_of(&self, id: &ParticipantId) -> Option<&str> {
        self.get(id).map(|p| p.name.as_str())
    }
}
