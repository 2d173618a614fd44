use {
    crate::api::SessionError,
    auction_session_api_types::participant as api,
};

pub type ParticipantId = String;

/// Identity documents collected for the bidder, all optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kyc {
    pub identity_number: Option<String>,
    pub issued_by:       Option<String>,
    pub address:         Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id:   ParticipantId,
    pub name: String,
    pub kyc:  Kyc,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Participant {
    /// Trims the input and checks that both id and name are present.
    pub fn try_new(
        id: &str,
        name: &str,
        kyc: Kyc,
    ) -> Result<Self, SessionError> {
        let id = id.trim();
        let name = name.trim();
        if id.is_empty() {
            return Err(SessionError::InvalidParticipant(
                "id must not be empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(SessionError::InvalidParticipant(format!(
                "name of participant {} must not be empty",
                id
            )));
        }
        Ok(Self {
            id:   id.to_string(),
            name: name.to_string(),
            kyc:  Kyc {
                identity_number: non_blank(kyc.identity_number),
                issued_by:       non_blank(kyc.issued_by),
                address:         non_blank(kyc.address),
            },
        })
    }
}

impl TryFrom<api::ParticipantCreate> for Participant {
    type Error = SessionError;

    fn try_from(create: api::ParticipantCreate) -> Result<Self, Self::Error> {
        Participant::try_new(
            &create.id,
            &create.name,
            Kyc {
                identity_number: create.identity_number,
                issued_by:       create.issued_by,
                address:         create.address,
            },
        )
    }
}

impl From<Participant> for api::Participant {
    fn from(participant: Participant) -> Self {
        api::Participant {
            id:              participant.id,
            name:            participant.name,
            identity_number: participant.kyc.identity_number,
            issued_by:       participant.kyc.issued_by,
            address:         participant.kyc.address,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added:              usize,
    pub skipped_duplicates: usize,
    pub skipped_invalid:    usize,
}

impl From<ImportSummary> for api::ImportSummary {
    fn from(summary: ImportSummary) -> Self {
        api::ImportSummary {
            added:              summary.added,
            skipped_duplicates: summary.skipped_duplicates,
            skipped_invalid:    summary.skipped_invalid,
        }
    }
}
