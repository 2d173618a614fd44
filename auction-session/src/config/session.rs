use {
    crate::timer::DEFAULT_ROUND_DURATION_SECS,
    clap::Args,
};

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Session Options")]
#[group(id = "Session")]
pub struct Options {
    /// Length of a bidding round in seconds.
    #[arg(long = "round-duration-secs")]
    #[arg(default_value_t = DEFAULT_ROUND_DURATION_SECS)]
    #[arg(env = "ROUND_DURATION_SECS")]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub round_duration_secs: u32,
    /// Roster file imported into the registry when the session starts.
    #[arg(long = "participants-file")]
    #[arg(env = "PARTICIPANTS_FILE")]
    pub participants_file:   Option<String>,
}
