use {
    crate::ParticipantId,
    serde::{
        Deserialize,
        Serialize,
    },
};

/// A bidder as entered by the operator or read from an import file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ParticipantCreate {
    /// Caller supplied bidder number, unique within the session.
    pub id:              ParticipantId,
    /// Display name.
    pub name:            String,
    /// Citizen id or business registration number.
    #[serde(default)]
    pub identity_number: Option<String>,
    /// Issuing authority of the identity document.
    #[serde(default)]
    pub issued_by:       Option<String>,
    #[serde(default)]
    pub address:         Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Participant {
    pub id:              ParticipantId,
    pub name:            String,
    pub identity_number: Option<String>,
    pub issued_by:       Option<String>,
    pub address:         Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ImportSummary {
    pub added:              usize,
    pub skipped_duplicates: usize,
    pub skipped_invalid:    usize,
}
