use {
    crate::{
        kernel::entities::Money,
        participant::entities::ParticipantId,
    },
    std::num::NonZeroU64,
    time::OffsetDateTime,
};

pub type SequenceNumber = u32;

/// One accepted bid. Never modified after it is appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidRecord {
    /// 1-based position in the ledger.
    pub sequence_number: SequenceNumber,
    pub participant_id:  ParticipantId,
    pub amount:          Money,
    pub placed_at:       OffsetDateTime,
}

/// How the amount of a new bid is derived.
///
/// `StartingPrice` and `Arbitrary` are only accepted for the opening bid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BidMode {
    StartingPrice,
    Stepped(NonZeroU64),
    Arbitrary(Money),
}

/// Read-only view of the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerState {
    pub price:           Money,
    pub leader_id:       Option<ParticipantId>,
    pub previous_bidder: Option<ParticipantId>,
    pub history:         Vec<BidRecord>,
}
