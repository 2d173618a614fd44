use {
    crate::{
        bid::HistoryRow,
        participant::Participant,
        Amount,
        ParticipantId,
        SessionId,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::{
        AsRefStr,
        Display,
    },
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    Setup,
    Bidding,
    Closed,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Lot settings entered by the operator when closing setup.
///
/// Prices are free text. Fields left out fall back to the lot preset of the
/// session config, if one exists.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct AuctionConfigInput {
    #[serde(default)]
    pub starting_price:  Option<String>,
    #[serde(default)]
    pub price_increment: Option<String>,
    #[serde(default)]
    pub lot_description: Option<String>,
    pub auctioneer_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuctionConfig {
    pub starting_price:  Amount,
    pub price_increment: Amount,
    pub lot_description: String,
    pub auctioneer_name: String,
}

/// Full operator view of the session, emitted after every state change.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub session_id:            SessionId,
    pub status:                SessionStatus,
    pub config:                Option<AuctionConfig>,
    /// Round currently open, i.e. the number the next accepted bid will get.
    pub round:                 u32,
    pub leader_id:             Option<ParticipantId>,
    pub leader_name:           Option<String>,
    pub current_price:         Amount,
    pub current_price_display: String,
    /// Participant barred from placing the next bid.
    pub previous_bidder:       Option<ParticipantId>,
    pub remaining_seconds:     u32,
    pub timer_state:           TimerState,
    pub timer_running:         bool,
    pub participant_count:     usize,
    /// Roster in registration order.
    pub participants:          Vec<Participant>,
    pub history:               Vec<HistoryRow>,
}

/// Reduced view for the audience screen.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PublicDisplay {
    /// Sequence number of the latest accepted bid, 0 before the first bid.
    pub round:                 u32,
    pub leader_name:           Option<String>,
    pub current_price:         Amount,
    pub current_price_display: String,
    pub remaining_seconds:     u32,
    /// The two bids preceding the leader's bid, newest first. Empty until the
    /// fourth bid.
    pub recent:                Vec<HistoryRow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuctionResult {
    pub session_id:            SessionId,
    pub winner_id:             Option<ParticipantId>,
    pub winner_name:           Option<String>,
    pub winning_price:         Option<Amount>,
    pub winning_price_display: Option<String>,
    pub total_bids:            u32,
}
