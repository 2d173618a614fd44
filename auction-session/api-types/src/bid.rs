use {
    crate::{
        Amount,
        ParticipantId,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    time::OffsetDateTime,
};

/// How the operator expressed the bid amount.
///
/// Values are the raw text typed by the operator, they are parsed by the session
/// before reaching the ledger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "mode", content = "value")]
pub enum BidModeInput {
    /// Bid exactly the starting price. Only valid for the first bid.
    #[serde(rename = "starting_price")]
    StartingPrice,
    /// Bid a number of price steps over the current price.
    #[serde(rename = "stepped")]
    Stepped(String),
    /// Bid a free amount. Only valid for the first bid.
    #[serde(rename = "arbitrary")]
    Arbitrary(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BidCreate {
    pub participant_id: ParticipantId,
    #[serde(flatten)]
    pub mode:           BidModeInput,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HistoryRow {
    pub sequence_number: u32,
    pub participant_id:  ParticipantId,
    pub name:            String,
    pub amount:          Amount,
    /// Amount rendered for display, e.g. `1.500.000 đồng`.
    pub amount_display:  String,
    #[serde(with = "time::serde::rfc3339")]
    pub placed_at:       OffsetDateTime,
}
