use {
    super::Service,
    crate::{
        api::SessionError,
        kernel::entities::Money,
        session::{
            api::parse_money,
            entities::AuctionConfig,
        },
    },
    auction_session_api_types::session::{
        AuctionConfigInput,
        Snapshot,
    },
};

#[derive(Debug, Clone)]
pub struct FinalizeSetupInput {
    pub config: AuctionConfigInput,
}

fn resolve_price(
    field: &str,
    input: Option<&str>,
    preset: Option<Money>,
) -> Result<Money, SessionError> {
    match input.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_money(field, value),
        None => Ok(preset.unwrap_or(Money::ZERO)),
    }
}

impl Service {
    /// Fills the blanks of the operator input from the configured lot preset.
    fn resolve_config(&self, input: AuctionConfigInput) -> Result<AuctionConfig, SessionError> {
        let preset = self.config.lot_preset.clone().unwrap_or_default();
        Ok(AuctionConfig {
            starting_price:  resolve_price(
                "starting price",
                input.starting_price.as_deref(),
                preset.starting_price,
            )?,
            price_increment: resolve_price(
                "price increment",
                input.price_increment.as_deref(),
                preset.price_increment,
            )?,
            lot_description: input
                .lot_description
                .filter(|value| !value.trim().is_empty())
                .or(preset.lot_description)
                .unwrap_or_default(),
            auctioneer_name: input.auctioneer_name,
        })
    }

    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn finalize_setup(&self, input: FinalizeSetupInput) -> Result<Snapshot, SessionError> {
        let config = self.resolve_config(input.config)?;
        let mut session = self.session.lock().await;
        session.finalize(config, &self.config.auctioneers)?;
        tracing::info!(
            session_id = %session.id,
            participants = session.registry.len(),
            "Setup finalized, bidding is open"
        );
        Ok(self.publish(&session))
    }
}
