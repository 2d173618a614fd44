use {
    crate::api::SessionError,
    auction_session_api_types::session as api,
    strum::Display,
};

pub const DEFAULT_ROUND_DURATION_SECS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
}

impl From<TimerState> for api::TimerState {
    fn from(state: TimerState) -> Self {
        match state {
            TimerState::Idle => api::TimerState::Idle,
            TimerState::Running => api::TimerState::Running,
            TimerState::Paused => api::TimerState::Paused,
            TimerState::Expired => api::TimerState::Expired,
        }
    }
}

/// Countdown for the current round.
///
/// The timer only moves on `tick`, which an external clock calls once per
/// second. Expiry is informational, it never blocks bidding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundTimer {
    round_duration:    u32,
    remaining_seconds: u32,
    state:             TimerState,
}

impl RoundTimer {
    pub fn new(round_duration: u32) -> Self {
        Self {
            round_duration,
            remaining_seconds: round_duration,
            state: TimerState::Idle,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Ok(())
            }
            from => Err(SessionError::InvalidTimerTransition {
                from,
                action: "start",
            }),
        }
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Ok(())
            }
            from => Err(SessionError::InvalidTimerTransition {
                from,
                action: "pause",
            }),
        }
    }

    /// Advances the countdown by one second. Returns whether anything changed.
    ///
    /// Ticks outside of `Running` are dropped, so a tick racing a pause is harmless.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.state = TimerState::Expired;
        }
        true
    }

    /// Refills the countdown for a new round. The operator restarts it by hand.
    pub fn reset_on_bid(&mut self) {
        self.remaining_seconds = self.round_duration;
        self.state = TimerState::Idle;
    }

    /// Stops the countdown for good when the session closes.
    pub fn halt(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }
}
