use {
    crate::{
        bid::BidCreate,
        participant::{
            ImportSummary,
            ParticipantCreate,
        },
        session::{
            AuctionConfigInput,
            AuctionResult,
            PublicDisplay,
            Snapshot,
        },
        ParticipantId,
    },
    serde::{
        Deserialize,
        Serialize,
    },
};

#[derive(Deserialize, Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "method", content = "params")]
pub enum ClientMessage {
    #[serde(rename = "add_participant")]
    AddParticipant { participant: ParticipantCreate },

    #[serde(rename = "remove_participant")]
    RemoveParticipant { participant_id: ParticipantId },

    #[serde(rename = "bulk_import_participants")]
    BulkImportParticipants { rows: Vec<ParticipantCreate> },

    #[serde(rename = "import_participants")]
    ImportParticipants { path: String },

    #[serde(rename = "finalize_setup")]
    FinalizeSetup { config: AuctionConfigInput },

    #[serde(rename = "submit_bid")]
    SubmitBid { bid: BidCreate },

    #[serde(rename = "undo_last_bid")]
    UndoLastBid,

    #[serde(rename = "start_timer")]
    StartTimer,

    #[serde(rename = "pause_timer")]
    PauseTimer,

    #[serde(rename = "close_session")]
    CloseSession,

    #[serde(rename = "export_history")]
    ExportHistory { path: String },

    #[serde(rename = "get_snapshot")]
    GetSnapshot,

    #[serde(rename = "get_public_display")]
    GetPublicDisplay,
}

#[derive(Deserialize, Clone, Debug, Serialize, PartialEq)]
pub struct ClientRequest {
    pub id:  String,
    #[serde(flatten)]
    pub msg: ClientMessage,
}

/// Pushed to the console for every state change.
#[derive(Serialize, Clone, Deserialize, Debug, PartialEq)]
#[serde(tag = "type")]
#[allow(clippy::large_enum_variant)]
pub enum ServerUpdateResponse {
    #[serde(rename = "snapshot")]
    Snapshot { snapshot: Snapshot },
    #[serde(rename = "public_display")]
    PublicDisplay { display: PublicDisplay },
    #[serde(rename = "auction_result")]
    AuctionResult { result: AuctionResult },
}

#[derive(Serialize, Clone, Deserialize, Debug, PartialEq)]
#[serde(untagged)]
#[allow(clippy::large_enum_variant)]
pub enum APIResponse {
    Snapshot(Snapshot),
    PublicDisplay(PublicDisplay),
    ImportSummary(ImportSummary),
    AuctionResult(AuctionResult),
}

#[derive(Serialize, Clone, Deserialize, Debug, PartialEq)]
#[serde(tag = "status", content = "result")]
pub enum ServerResultMessage {
    #[serde(rename = "success")]
    Success(Option<APIResponse>),
    #[serde(rename = "error")]
    Err(String),
}

/// Result for a specific client request with the same id.
/// Id is only None when the client message is invalid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerResultResponse {
    pub id:     Option<String>,
    #[serde(flatten)]
    pub result: ServerResultMessage,
}
