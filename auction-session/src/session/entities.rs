use {
    crate::{
        api::SessionError,
        kernel::{
            entities::Money,
            tabular::HistoryExportRow,
        },
        ledger::{
            bid_ledger::BidLedger,
            entities::{
                BidMode,
                BidRecord,
            },
        },
        participant::{
            entities::{
                ImportSummary,
                Participant,
                ParticipantId,
            },
            registry::Registry,
        },
        timer::RoundTimer,
    },
    auction_session_api_types::participant::ParticipantCreate,
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type SessionId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Setup,
    Bidding,
    Closed,
}

/// Lot settings, fixed once bidding opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionConfig {
    pub starting_price:  Money,
    pub price_increment: Money,
    pub lot_description: String,
    pub auctioneer_name: String,
}

impl AuctionConfig {
    fn validate(&self, allowed_auctioneers: &[String]) -> Result<(), SessionError> {
        if self.starting_price.is_zero() {
            return Err(SessionError::IncompleteSetup(
                "starting price must be positive".to_string(),
            ));
        }
        if self.price_increment.is_zero() {
            return Err(SessionError::IncompleteSetup(
                "price increment must be positive".to_string(),
            ));
        }
        if self.lot_description.trim().is_empty() {
            return Err(SessionError::IncompleteSetup(
                "lot description is missing".to_string(),
            ));
        }
        let auctioneer = self.auctioneer_name.trim();
        if auctioneer.is_empty() {
            return Err(SessionError::IncompleteSetup(
                "auctioneer name is missing".to_string(),
            ));
        }
        if !allowed_auctioneers.is_empty()
            && !allowed_auctioneers.iter().any(|name| name == auctioneer)
        {
            return Err(SessionError::IncompleteSetup(format!(
                "{} is not a registered auctioneer",
                auctioneer
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Auction {
    pub config: AuctionConfig,
    pub ledger: BidLedger,
}

#[derive(Clone, Debug)]
pub enum Stage {
    Setup,
    Bidding(Auction),
    /// The ledger is frozen, it is only kept for snapshots and export.
    Closed(Auction),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionResult {
    pub winner:        Option<Participant>,
    pub winning_price: Option<Money>,
    pub total_bids:    u32,
}

/// Everything the operator works on during one auction.
#[derive(Clone, Debug)]
pub struct Session {
    pub id:       SessionId,
    pub registry: Registry,
    pub timer:    RoundTimer,
    pub stage:    Stage,
}

fn bidding(stage: &mut Stage) -> Result<&mut Auction, SessionError> {
    match stage {
        Stage::Setup => Err(SessionError::SessionNotStarted),
        Stage::Bidding(auction) => Ok(auction),
        Stage::Closed(_) => Err(SessionError::SessionClosed),
    }
}

impl Session {
    pub fn new(round_duration: u32) -> Self {
        Self {
            id:       Uuid::new_v4(),
            registry: Registry::default(),
            timer:    RoundTimer::new(round_duration),
            stage:    Stage::Setup,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self.stage {
            Stage::Setup => SessionStatus::Setup,
            Stage::Bidding(_) => SessionStatus::Bidding,
            Stage::Closed(_) => SessionStatus::Closed,
        }
    }

    pub fn auction(&self) -> Option<&Auction> {
        match &self.stage {
            Stage::Setup => None,
            Stage::Bidding(auction) | Stage::Closed(auction) => Some(auction),
        }
    }

    pub fn ledger(&self) -> Option<&BidLedger> {
        self.auction().map(|auction| &auction.ledger)
    }

    pub fn ensure_setup(&self) -> Result<(), SessionError> {
        match self.stage {
            Stage::Setup => Ok(()),
            Stage::Bidding(_) => Err(SessionError::SetupFinalized),
            Stage::Closed(_) => Err(SessionError::SessionClosed),
        }
    }

    fn registry_for_setup(&mut self) -> Result<&mut Registry, SessionError> {
        self.ensure_setup()?;
        Ok(&mut self.registry)
    }

    pub fn add_participant(&mut self, participant: Participant) -> Result<(), SessionError> {
        self.registry_for_setup()?.add(participant)
    }

    pub fn remove_participant(&mut self, id: &str) -> Result<Participant, SessionError> {
        self.registry_for_setup()?.remove(id)
    }

    pub fn bulk_import(
        &mut self,
        rows: Vec<ParticipantCreate>,
    ) -> Result<ImportSummary, SessionError> {
        Ok(self.registry_for_setup()?.bulk_import(rows))
    }

    /// Locks the roster and the lot settings and opens bidding.
    pub fn finalize(
        &mut self,
        config: AuctionConfig,
        allowed_auctioneers: &[String],
    ) -> Result<(), SessionError> {
        self.ensure_setup()?;
        config.validate(allowed_auctioneers)?;
        if self.registry.is_empty() {
            return Err(SessionError::IncompleteSetup(
                "at least one participant is required".to_string(),
            ));
        }
        let config = AuctionConfig {
            lot_description: config.lot_description.trim().to_string(),
            auctioneer_name: config.auctioneer_name.trim().to_string(),
            ..config
        };
        let ledger = BidLedger::new(config.starting_price, config.price_increment);
        self.stage = Stage::Bidding(Auction { config, ledger });
        self.timer.reset_on_bid();
        Ok(())
    }

    pub fn submit_bid(
        &mut self,
        participant_id: &str,
        mode: BidMode,
        placed_at: OffsetDateTime,
    ) -> Result<BidRecord, SessionError> {
        let auction = bidding(&mut self.stage)?;
        let record = auction
            .ledger
            .submit_bid(&self.registry, participant_id, mode, placed_at)?;
        self.timer.reset_on_bid();
        Ok(record)
    }

    pub fn undo_last(&mut self) -> Result<BidRecord, SessionError> {
        bidding(&mut self.stage)?.ledger.undo_last()
    }

    pub fn start_timer(&mut self) -> Result<(), SessionError> {
        bidding(&mut self.stage)?;
        self.timer.start()
    }

    pub fn pause_timer(&mut self) -> Result<(), SessionError> {
        bidding(&mut self.stage)?;
        self.timer.pause()
    }

    /// One second of the round clock. Returns whether the timer moved.
    pub fn tick(&mut self) -> bool {
        match self.stage {
            Stage::Bidding(_) => self.timer.tick(),
            Stage::Setup | Stage::Closed(_) => false,
        }
    }

    pub fn close(&mut self) -> Result<AuctionResult, SessionError> {
        let auction = match &self.stage {
            Stage::Setup => return Err(SessionError::SessionNotStarted),
            Stage::Closed(_) => return Err(SessionError::AlreadyClosed),
            Stage::Bidding(auction) => auction.clone(),
        };
        self.timer.halt();
        self.stage = Stage::Closed(auction);
        Ok(self.result())
    }

    /// Current leader and price, final once the session is closed.
    pub fn result(&self) -> AuctionResult {
        let ledger = self.ledger();
        let last = ledger.and_then(|ledger| ledger.last());
        AuctionResult {
            winner:        last.and_then(|record| self.registry.get(&record.participant_id).cloned()),
            winning_price: last.map(|record| record.amount),
            total_bids:    ledger.map(|ledger| ledger.history().len() as u32).unwrap_or_default(),
        }
    }

    pub fn participant_name(&self, id: &ParticipantId) -> String {
        self.registry.name_of(id).unwrap_or_default().to_string()
    }

    pub fn export_rows(&self) -> Result<Vec<HistoryExportRow>, SessionError> {
        let ledger = self.ledger().ok_or(SessionError::SessionNotStarted)?;
        Ok(ledger
            .history()
            .iter()
            .map(|record| HistoryExportRow {
                sequence_number: record.sequence_number,
                participant_id:  record.participant_id.clone(),
                name:            self.participant_name(&record.participant_id),
                amount_display:  record.amount.to_string(),
            })
            .collect())
    }
}
