use {
    crate::kernel::entities::Money,
    anyhow::Result,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::fs,
};

pub mod session;

// `Options` is a structup definition to provide clean command-line args for the auction session.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
#[allow(clippy::large_enum_variant)]
pub enum Options {
    /// Run an auction session on the console.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Session Options
    #[command(flatten)]
    pub session: session::Options,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file with the auctioneer roster and lot defaults.
    #[arg(long = "config")]
    #[arg(env = "AUCTION_CONFIG")]
    pub config: Option<String>,
}

/// Lot settings used when the operator leaves them blank at the end of setup.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LotPreset {
    #[serde(default)]
    pub lot_description: Option<String>,
    #[serde(default)]
    pub starting_price:  Option<Money>,
    #[serde(default)]
    pub price_increment: Option<Money>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Names accepted as auctioneer. Empty means any name is accepted.
    #[serde(default)]
    pub auctioneers: Vec<String>,
    #[serde(default)]
    pub lot:         Option<LotPreset>,
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let yaml_content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&yaml_content)?;
        Ok(config)
    }
}
