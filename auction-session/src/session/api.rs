use {
    super::{
        entities::{
            AuctionConfig,
            AuctionResult,
            Session,
            SessionId,
            SessionStatus,
        },
        service::{
            add_participant::AddParticipantInput,
            export_history::ExportHistoryInput,
            finalize_setup::FinalizeSetupInput,
            import_participants::ImportParticipantsInput,
            remove_participant::RemoveParticipantInput,
            submit_bid::SubmitBidInput,
            Service,
        },
    },
    crate::{
        api::SessionError,
        kernel::entities::Money,
        ledger::entities::{
            BidMode,
            BidRecord,
        },
    },
    auction_session_api_types::{
        bid::{
            BidCreate,
            BidModeInput,
            HistoryRow,
        },
        console::{
            APIResponse,
            ClientMessage,
        },
        session as api,
    },
    std::num::NonZeroU64,
};

/// Rounds at or above this number show the two bids before the leader on the public screen.
const PUBLIC_RECENT_FROM_ROUND: u32 = 4;

impl From<SessionStatus> for api::SessionStatus {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Setup => api::SessionStatus::Setup,
            SessionStatus::Bidding => api::SessionStatus::Bidding,
            SessionStatus::Closed => api::SessionStatus::Closed,
        }
    }
}

impl From<AuctionConfig> for api::AuctionConfig {
    fn from(config: AuctionConfig) -> Self {
        api::AuctionConfig {
            starting_price:  config.starting_price.units(),
            price_increment: config.price_increment.units(),
            lot_description: config.lot_description,
            auctioneer_name: config.auctioneer_name,
        }
    }
}

impl AuctionResult {
    pub fn into_api(self, session_id: SessionId) -> api::AuctionResult {
        api::AuctionResult {
            session_id,
            winner_id: self.winner.as_ref().map(|winner| winner.id.clone()),
            winner_name: self.winner.map(|winner| winner.name),
            winning_price: self.winning_price.map(|price| price.units()),
            winning_price_display: self.winning_price.map(|price| price.to_string()),
            total_bids: self.total_bids,
        }
    }
}

impl Session {
    fn history_row(&self, record: &BidRecord) -> HistoryRow {
        HistoryRow {
            sequence_number: record.sequence_number,
            participant_id:  record.participant_id.clone(),
            name:            self.participant_name(&record.participant_id),
            amount:          record.amount.units(),
            amount_display:  record.amount.to_string(),
            placed_at:       record.placed_at,
        }
    }

    fn leader_name(&self) -> Option<String> {
        self.ledger()
            .and_then(|ledger| ledger.current_leader())
            .map(|id| self.participant_name(id))
    }

    /// The starting price until the first bid, nothing before setup is finalized.
    fn current_price(&self) -> Money {
        self.ledger()
            .map(|ledger| ledger.current_price())
            .unwrap_or(Money::ZERO)
    }

    pub fn snapshot(&self) -> api::Snapshot {
        let state = self.ledger().map(|ledger| ledger.current_state());
        let current_price = self.current_price();
        api::Snapshot {
            session_id: self.id,
            status: self.status().into(),
            config: self.auction().map(|auction| auction.config.clone().into()),
            round: state
                .as_ref()
                .map(|state| state.history.len() as u32 + 1)
                .unwrap_or_default(),
            leader_id: state.as_ref().and_then(|state| state.leader_id.clone()),
            leader_name: self.leader_name(),
            current_price: current_price.units(),
            current_price_display: current_price.to_string(),
            previous_bidder: state
                .as_ref()
                .and_then(|state| state.previous_bidder.clone()),
            remaining_seconds: self.timer.remaining_seconds(),
            timer_state: self.timer.state().into(),
            timer_running: self.timer.is_running(),
            participant_count: self.registry.len(),
            participants: self.registry.iter().cloned().map(Into::into).collect(),
            history: state
                .map(|state| {
                    state
                        .history
                        .iter()
                        .map(|record| self.history_row(record))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn public_display(&self) -> api::PublicDisplay {
        let history = self.ledger().map(|ledger| ledger.history()).unwrap_or(&[]);
        let round = history
            .last()
            .map(|record| record.sequence_number)
            .unwrap_or_default();
        let recent = if round >= PUBLIC_RECENT_FROM_ROUND {
            history
                .iter()
                .rev()
                .skip(1)
                .take(2)
                .map(|record| self.history_row(record))
                .collect()
        } else {
            vec![]
        };
        let current_price = self.current_price();
        api::PublicDisplay {
            round,
            leader_name: self.leader_name(),
            current_price: current_price.units(),
            current_price_display: current_price.to_string(),
            remaining_seconds: self.timer.remaining_seconds(),
            recent,
        }
    }
}

pub fn parse_money(field: &str, value: &str) -> Result<Money, SessionError> {
    value
        .parse()
        .map_err(|e| SessionError::ParseError(format!("{}: {}", field, e)))
}

pub fn parse_bid_mode(input: BidModeInput) -> Result<BidMode, SessionError> {
    match input {
        BidModeInput::StartingPrice => Ok(BidMode::StartingPrice),
        BidModeInput::Stepped(steps) => {
            let steps: u64 = steps.trim().parse().map_err(|_| {
                SessionError::ParseError(format!("step count: '{}' is not a whole number", steps))
            })?;
            NonZeroU64::new(steps)
                .map(BidMode::Stepped)
                .ok_or(SessionError::InvalidStepCount)
        }
        BidModeInput::Arbitrary(amount) => Ok(BidMode::Arbitrary(parse_money("amount", &amount)?)),
    }
}

fn ok_snapshot(snapshot: api::Snapshot) -> Option<APIResponse> {
    Some(APIResponse::Snapshot(snapshot))
}

/// Runs a single console command against the session.
///
/// Mutating commands answer with the snapshot taken right after the change.
pub async fn process_command(
    service: &Service,
    message: ClientMessage,
) -> Result<Option<APIResponse>, SessionError> {
    match message {
        ClientMessage::AddParticipant { participant } => service
            .add_participant(AddParticipantInput { participant })
            .await
            .map(ok_snapshot),
        ClientMessage::RemoveParticipant { participant_id } => service
            .remove_participant(RemoveParticipantInput { participant_id })
            .await
            .map(ok_snapshot),
        ClientMessage::BulkImportParticipants { rows } => service
            .bulk_import_participants(rows)
            .await
            .map(|summary| Some(APIResponse::ImportSummary(summary.into()))),
        ClientMessage::ImportParticipants { path } => service
            .import_participants(ImportParticipantsInput { path })
            .await
            .map(|summary| Some(APIResponse::ImportSummary(summary.into()))),
        ClientMessage::FinalizeSetup { config } => service
            .finalize_setup(FinalizeSetupInput { config })
            .await
            .map(ok_snapshot),
        ClientMessage::SubmitBid {
            bid: BidCreate {
                participant_id,
                mode,
            },
        } => service
            .submit_bid(SubmitBidInput {
                participant_id,
                mode: parse_bid_mode(mode)?,
            })
            .await
            .map(ok_snapshot),
        ClientMessage::UndoLastBid => service.undo_last_bid().await.map(ok_snapshot),
        ClientMessage::StartTimer => service.start_timer().await.map(ok_snapshot),
        ClientMessage::PauseTimer => service.pause_timer().await.map(ok_snapshot),
        ClientMessage::CloseSession => service
            .close_session()
            .await
            .map(|result| Some(APIResponse::AuctionResult(result))),
        ClientMessage::ExportHistory { path } => service
            .export_history(ExportHistoryInput { path })
            .await
            .map(|_| None),
        ClientMessage::GetSnapshot => Ok(ok_snapshot(service.get_snapshot().await)),
        ClientMessage::GetPublicDisplay => Ok(Some(APIResponse::PublicDisplay(
            service.get_public_display().await,
        ))),
    }
}
