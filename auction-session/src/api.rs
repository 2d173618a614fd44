use {
    crate::{
        kernel::entities::Money,
        participant::entities::ParticipantId,
        timer::TimerState,
    },
    std::fmt::{
        Display,
        Formatter,
    },
};

pub mod console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The command was malformed or broke an auction rule.
    Validation,
    /// The command is not allowed in the current session state.
    State,
    /// Reading or writing a tabular file failed.
    Io,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The bidder is not on the roster
    UnknownBidder(ParticipantId),
    /// The bidder holds the previous bid and may not outbid themselves
    ConsecutiveBidder(ParticipantId),
    /// A free first bid below the starting price
    BelowStartingPrice { amount: Money, starting_price: Money },
    /// The resolved amount does not beat the current price
    NonIncreasingBid { amount: Money, current_price: Money },
    /// Only stepped bids are accepted after the first bid
    IncrementOnly,
    /// The number of price steps must be at least one
    InvalidStepCount,
    /// The resolved amount does not fit into the currency type
    AmountOverflow,
    /// The session can not leave setup yet
    IncompleteSetup(String),
    /// The participant is missing an id or a name
    InvalidParticipant(String),
    /// Free text input could not be parsed
    ParseError(String),
    /// There is no bid to undo
    EmptyLedger,
    /// The session is closed and the ledger is frozen
    SessionClosed,
    /// The session was already closed
    AlreadyClosed,
    /// Bidding has not been opened yet
    SessionNotStarted,
    /// The roster and lot settings can no longer change
    SetupFinalized,
    /// The timer can not perform the action from its current state
    InvalidTimerTransition { from: TimerState, action: &'static str },
    /// A participant with the same id is already registered
    DuplicateId(ParticipantId),
    /// No participant with this id is registered
    NotFound(ParticipantId),
    /// The import file does not have the expected shape
    ImportFormat(String),
    /// Reading or writing a file failed
    Io(String),
}

impl SessionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SessionError::UnknownBidder(_)
            | SessionError::ConsecutiveBidder(_)
            | SessionError::BelowStartingPrice { .. }
            | SessionError::NonIncreasingBid { .. }
            | SessionError::IncrementOnly
            | SessionError::InvalidStepCount
            | SessionError::AmountOverflow
            | SessionError::IncompleteSetup(_)
            | SessionError::InvalidParticipant(_)
            | SessionError::ParseError(_) => ErrorCategory::Validation,
            SessionError::EmptyLedger
            | SessionError::SessionClosed
            | SessionError::AlreadyClosed
            | SessionError::SessionNotStarted
            | SessionError::SetupFinalized
            | SessionError::InvalidTimerTransition { .. }
            | SessionError::DuplicateId(_)
            | SessionError::NotFound(_) => ErrorCategory::State,
            SessionError::ImportFormat(_) | SessionError::Io(_) => ErrorCategory::Io,
        }
    }

    pub fn to_message(&self) -> String {
        match self {
            SessionError::UnknownBidder(id) => format!("Bidder {} is not registered", id),
            SessionError::ConsecutiveBidder(id) => {
                format!("Bidder {} may not outbid themselves", id)
            }
            SessionError::BelowStartingPrice {
                amount,
                starting_price,
            } => format!(
                "Bid of {} is below the starting price of {}",
                amount, starting_price
            ),
            SessionError::NonIncreasingBid {
                amount,
                current_price,
            } => format!(
                "Bid of {} must be higher than the current price of {}",
                amount, current_price
            ),
            SessionError::IncrementOnly => {
                "Only stepped bids are accepted after the first bid".to_string()
            }
            SessionError::InvalidStepCount => {
                "The number of price steps must be a positive integer".to_string()
            }
            SessionError::AmountOverflow => "The bid amount is too large".to_string(),
            SessionError::IncompleteSetup(reason) => format!("Setup is incomplete: {}", reason),
            SessionError::InvalidParticipant(reason) => {
                format!("Invalid participant: {}", reason)
            }
            SessionError::ParseError(msg) => format!("Invalid input: {}", msg),
            SessionError::EmptyLedger => "There is no bid to undo".to_string(),
            SessionError::SessionClosed => "The session is closed".to_string(),
            SessionError::AlreadyClosed => "The session was already closed".to_string(),
            SessionError::SessionNotStarted => "Bidding has not started yet".to_string(),
            SessionError::SetupFinalized => "Setup was already finalized".to_string(),
            SessionError::InvalidTimerTransition { from, action } => {
                format!("Can not {} the timer while it is {}", action, from)
            }
            SessionError::DuplicateId(id) => {
                format!("A participant with id {} already exists", id)
            }
            SessionError::NotFound(id) => format!("No participant with id {}", id),
            SessionError::ImportFormat(msg) => format!("Invalid import file: {}", msg),
            SessionError::Io(msg) => format!("File operation failed: {}", msg),
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_message())
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Io(err.to_string())
    }
}

impl From<csv_async::Error> for SessionError {
    fn from(err: csv_async::Error) -> Self {
        SessionError::Io(err.to_string())
    }
}
