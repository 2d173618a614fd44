use {
    super::entities::{
        BidMode,
        BidRecord,
        LedgerState,
        SequenceNumber,
    },
    crate::{
        api::SessionError,
        kernel::entities::Money,
        participant::{
            entities::ParticipantId,
            registry::Registry,
        },
    },
    time::OffsetDateTime,
};

/// Ordered record of accepted bids for the lot and the rules deciding the next one.
///
/// Invariants held after every mutation:
/// - amounts are strictly increasing
/// - two adjacent records never share a participant
/// - `sequence_number` equals the 1-based position of the record
/// - `previous_bidder` is the participant of the last record
#[derive(Clone, Debug)]
pub struct BidLedger {
    starting_price:  Money,
    price_increment: Money,
    history:         Vec<BidRecord>,
    previous_bidder: Option<ParticipantId>,
}

impl BidLedger {
    pub fn new(starting_price: Money, price_increment: Money) -> Self {
        Self {
            starting_price,
            price_increment,
            history: Vec::new(),
            previous_bidder: None,
        }
    }

    pub fn history(&self) -> &[BidRecord] {
        &self.history
    }

    pub fn last(&self) -> Option<&BidRecord> {
        self.history.last()
    }

    /// Amount of the last accepted bid, or the starting price before the first bid.
    pub fn current_price(&self) -> Money {
        self.last()
            .map(|record| record.amount)
            .unwrap_or(self.starting_price)
    }

    pub fn current_leader(&self) -> Option<&ParticipantId> {
        self.last().map(|record| &record.participant_id)
    }

    /// Participant who may not place the next bid.
    pub fn previous_bidder(&self) -> Option<&ParticipantId> {
        self.previous_bidder.as_ref()
    }

    pub fn current_state(&self) -> LedgerState {
        LedgerState {
            price:           self.current_price(),
            leader_id:       self.current_leader().cloned(),
            previous_bidder: self.previous_bidder().cloned(),
            history:         self.history.clone(),
        }
    }

    fn next_sequence_number(&self) -> SequenceNumber {
        (self.history.len() + 1) as SequenceNumber
    }

    fn steps_over(&self, base: Money, steps: u64) -> Result<Money, SessionError> {
        self.price_increment
            .checked_mul(steps)
            .and_then(|raise| base.checked_add(raise))
            .ok_or(SessionError::AmountOverflow)
    }

    /// Turns the bid mode into an amount and checks it against the price ladder.
    pub fn resolve_amount(&self, mode: BidMode) -> Result<Money, SessionError> {
        match self.last() {
            None => {
                let amount = match mode {
                    BidMode::StartingPrice => self.starting_price,
                    BidMode::Stepped(steps) => self.steps_over(self.starting_price, steps.get())?,
                    BidMode::Arbitrary(amount) => amount,
                };
                if amount < self.starting_price {
                    return Err(SessionError::BelowStartingPrice {
                        amount,
                        starting_price: self.starting_price,
                    });
                }
                Ok(amount)
            }
            Some(last) => {
                let amount = match mode {
                    BidMode::Stepped(steps) => self.steps_over(last.amount, steps.get())?,
                    BidMode::StartingPrice | BidMode::Arbitrary(_) => {
                        return Err(SessionError::IncrementOnly)
                    }
                };
                if amount <= last.amount {
                    return Err(SessionError::NonIncreasingBid {
                        amount,
                        current_price: last.amount,
                    });
                }
                Ok(amount)
            }
        }
    }

    /// Validates and appends a bid. Nothing changes when an error is returned.
    pub fn submit_bid(
        &mut self,
        registry: &Registry,
        participant_id: &str,
        mode: BidMode,
        placed_at: OffsetDateTime,
    ) -> Result<BidRecord, SessionError> {
        if !registry.contains(participant_id) {
            return Err(SessionError::UnknownBidder(participant_id.to_string()));
        }
        if self.previous_bidder().map(String::as_str) == Some(participant_id) {
            return Err(SessionError::ConsecutiveBidder(participant_id.to_string()));
        }
        let amount = self.resolve_amount(mode)?;

        let record = BidRecord {
            sequence_number: self.next_sequence_number(),
            participant_id: participant_id.to_string(),
            amount,
            placed_at,
        };
        self.history.push(record.clone());
        self.refresh_previous_bidder();
        Ok(record)
    }

    /// Drops the last bid and restores the eligibility that held before it.
    pub fn undo_last(&mut self) -> Result<BidRecord, SessionError> {
        let removed = self.history.pop().ok_or(SessionError::EmptyLedger)?;
        self.refresh_previous_bidder();
        Ok(removed)
    }

    // The lock is always derived from the ledger so repeated undos can not drift.
    fn refresh_previous_bidder(&mut self) {
        self.previous_bidder = self
            .history
            .last()
            .map(|record| record.participant_id.clone());
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::participant::entities::{
            Kyc,
            Participant,
        },
        std::num::NonZeroU64,
    };

    fn registry(ids: &[&str]) -> Registry {
        let mut registry = Registry::default();
        for id in ids {
            registry
                .add(Participant::try_new(id, &format!("Bidder {}", id), Kyc::default()).unwrap())
                .unwrap();
        }
        registry
    }

    fn steps(k: u64) -> BidMode {
        BidMode::Stepped(NonZeroU64::new(k).unwrap())
    }

    fn ledger() -> BidLedger {
        BidLedger::new(Money::new(1_000_000), Money::new(500_000))
    }

    fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    #[test]
    fn test_empty_ledger_state() {
        let ledger = ledger();
        let state = ledger.current_state();
        assert_eq!(state.price, Money::new(1_000_000));
        assert_eq!(state.leader_id, None);
        assert_eq!(state.previous_bidder, None);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_stepped_bids_resolve_against_ladder() {
        let registry = registry(&["1", "2"]);
        let mut ledger = ledger();

        let first = ledger.submit_bid(&registry, "1", steps(2), now()).unwrap();
        assert_eq!(first.amount, Money::new(2_000_000));
        assert_eq!(first.sequence_number, 1);

        let second = ledger.submit_bid(&registry, "2", steps(1), now()).unwrap();
        assert_eq!(second.amount, Money::new(2_500_000));
        assert_eq!(second.sequence_number, 2);

        assert_eq!(ledger.current_price(), Money::new(2_500_000));
        assert_eq!(ledger.current_leader(), Some(&"2".to_string()));
    }

    #[test]
    fn test_first_bid_modes() {
        let registry = registry(&["1"]);

        let mut at_start = ledger();
        let record = at_start
            .submit_bid(&registry, "1", BidMode::StartingPrice, now())
            .unwrap();
        assert_eq!(record.amount, Money::new(1_000_000));

        let mut free = ledger();
        let record = free
            .submit_bid(
                &registry,
                "1",
                BidMode::Arbitrary(Money::new(1_234_000)),
                now(),
            )
            .unwrap();
        assert_eq!(record.amount, Money::new(1_234_000));

        let mut low = ledger();
        assert_eq!(
            low.submit_bid(&registry, "1", BidMode::Arbitrary(Money::new(999_999)), now()),
            Err(SessionError::BelowStartingPrice {
                amount:         Money::new(999_999),
                starting_price: Money::new(1_000_000),
            })
        );
        assert!(low.history().is_empty());
    }

    #[test]
    fn test_subsequent_bids_are_increment_only() {
        let registry = registry(&["1", "2"]);
        let mut ledger = ledger();
        ledger
            .submit_bid(&registry, "1", BidMode::StartingPrice, now())
            .unwrap();

        assert_eq!(
            ledger.submit_bid(&registry, "2", BidMode::StartingPrice, now()),
            Err(SessionError::IncrementOnly)
        );
        assert_eq!(
            ledger.submit_bid(
                &registry,
                "2",
                BidMode::Arbitrary(Money::new(9_000_000)),
                now()
            ),
            Err(SessionError::IncrementOnly)
        );
        assert_eq!(ledger.history().len(), 1);
    }

    #[test]
    fn test_validation_order() {
        let registry = registry(&["1", "2"]);
        let mut ledger = ledger();

        assert_eq!(
            ledger.submit_bid(&registry, "9", BidMode::Arbitrary(Money::new(1)), now()),
            Err(SessionError::UnknownBidder("9".to_string()))
        );

        ledger.submit_bid(&registry, "1", steps(1), now()).unwrap();
        // The consecutive check wins over the mode check.
        assert_eq!(
            ledger.submit_bid(&registry, "1", BidMode::StartingPrice, now()),
            Err(SessionError::ConsecutiveBidder("1".to_string()))
        );
        assert_eq!(
            ledger.submit_bid(&registry, "1", steps(3), now()),
            Err(SessionError::ConsecutiveBidder("1".to_string()))
        );
        assert_eq!(ledger.history().len(), 1);

        ledger.submit_bid(&registry, "2", steps(3), now()).unwrap();
        assert_eq!(ledger.current_price(), Money::new(3_000_000));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let registry = registry(&["1"]);
        let mut ledger = BidLedger::new(Money::new(1), Money::new(u64::MAX / 2));
        assert_eq!(
            ledger.submit_bid(&registry, "1", steps(3), now()),
            Err(SessionError::AmountOverflow)
        );
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn test_submit_then_undo_restores_state() {
        let registry = registry(&["1", "2", "3"]);
        let mut ledger = ledger();
        ledger.submit_bid(&registry, "1", steps(1), now()).unwrap();
        ledger.submit_bid(&registry, "2", steps(1), now()).unwrap();

        let before = ledger.current_state();
        ledger.submit_bid(&registry, "3", steps(4), now()).unwrap();
        let removed = ledger.undo_last().unwrap();
        assert_eq!(removed.participant_id, "3");
        assert_eq!(ledger.current_state(), before);

        // Bidder 2 still holds the last bid and stays locked out.
        assert_eq!(
            ledger.submit_bid(&registry, "2", steps(1), now()),
            Err(SessionError::ConsecutiveBidder("2".to_string()))
        );
        ledger.submit_bid(&registry, "1", steps(1), now()).unwrap();
        assert_eq!(ledger.last().unwrap().sequence_number, 3);
    }

    #[test]
    fn test_repeated_undo_rederives_lock() {
        let registry = registry(&["1", "2", "3"]);
        let mut ledger = ledger();
        ledger.submit_bid(&registry, "1", steps(1), now()).unwrap();
        ledger.submit_bid(&registry, "2", steps(1), now()).unwrap();
        ledger.submit_bid(&registry, "3", steps(1), now()).unwrap();

        ledger.undo_last().unwrap();
        assert_eq!(ledger.previous_bidder(), Some(&"2".to_string()));
        ledger.undo_last().unwrap();
        assert_eq!(ledger.previous_bidder(), Some(&"1".to_string()));
        assert_eq!(ledger.current_price(), Money::new(1_500_000));
        ledger.undo_last().unwrap();
        assert_eq!(ledger.previous_bidder(), None);
        assert_eq!(ledger.current_price(), Money::new(1_000_000));

        // Back to an opening bid, so every mode is available again.
        ledger
            .submit_bid(&registry, "1", BidMode::StartingPrice, now())
            .unwrap();
    }

    #[test]
    fn test_undo_on_empty_ledger() {
        let mut ledger = ledger();
        assert_eq!(ledger.undo_last(), Err(SessionError::EmptyLedger));
        assert_eq!(ledger.current_state(), self::ledger().current_state());
    }

    #[test]
    fn test_history_invariants_hold_over_long_session() {
        let registry = registry(&["1", "2", "3"]);
        let mut ledger = ledger();
        let bidders = ["1", "2", "3", "1", "3", "2", "1", "2"];
        for (i, bidder) in bidders.iter().enumerate() {
            ledger
                .submit_bid(&registry, bidder, steps((i % 3 + 1) as u64), now())
                .unwrap();
            if i == 4 {
                ledger.undo_last().unwrap();
                ledger.undo_last().unwrap();
            }
        }
        let history = ledger.history();
        for (position, record) in history.iter().enumerate() {
            assert_eq!(record.sequence_number as usize, position + 1);
        }
        for pair in history.windows(2) {
            assert!(pair[1].amount > pair[0].amount);
            assert_ne!(pair[1].participant_id, pair[0].participant_id);
        }
    }
}
