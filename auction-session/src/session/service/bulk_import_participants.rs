use {
    super::Service,
    crate::{
        api::SessionError,
        participant::entities::ImportSummary,
    },
    auction_session_api_types::participant::ParticipantCreate,
};

impl Service {
    #[tracing::instrument(skip_all, fields(rows = rows.len()), err(level = tracing::Level::TRACE))]
    pub async fn bulk_import_participants(
        &self,
        rows: Vec<ParticipantCreate>,
    ) -> Result<ImportSummary, SessionError> {
        let mut session = self.session.lock().await;
        let summary = session.bulk_import(rows)?;
        tracing::info!(
            added = summary.added,
            skipped_duplicates = summary.skipped_duplicates,
            skipped_invalid = summary.skipped_invalid,
            "Imported participants"
        );
        self.publish(&session);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::session::service::tests::{
            bidding_service,
            participant,
        },
    };

    #[tokio::test]
    async fn test_bulk_import_is_rejected_after_setup() {
        let (service, _receiver) = bidding_service().await;
        assert_eq!(
            service
                .bulk_import_participants(vec![participant("9")])
                .await,
            Err(SessionError::SetupFinalized)
        );
        assert_eq!(service.get_snapshot().await.participant_count, 3);
    }
}
