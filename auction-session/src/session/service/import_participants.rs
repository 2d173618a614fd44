use {
    super::Service,
    crate::{
        api::SessionError,
        participant::entities::ImportSummary,
    },
};

#[derive(Debug, Clone)]
pub struct ImportParticipantsInput {
    pub path: String,
}

impl Service {
    /// Reads a roster file and merges it into the registry.
    #[tracing::instrument(skip_all, fields(path = %input.path), err(level = tracing::Level::TRACE))]
    pub async fn import_participants(
        &self,
        input: ImportParticipantsInput,
    ) -> Result<ImportSummary, SessionError> {
        self.session.lock().await.ensure_setup()?;
        let rows = self.tabular.read_participants(&input.path).await?;
        self.bulk_import_participants(rows).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            kernel::tabular::MockTabularStore,
            session::service::tests::{
                config,
                participant,
                service_with,
            },
        },
        auction_session_api_types::participant::ParticipantCreate,
        mockall::predicate::eq,
    };

    #[tokio::test]
    async fn test_import_participants_skips_bad_rows() {
        let mut tabular = MockTabularStore::new();
        tabular
            .expect_read_participants()
            .with(eq("roster.csv"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    participant("1"),
                    participant("2"),
                    participant("1"),
                    ParticipantCreate {
                        id: "3".to_string(),
                        name: " ".to_string(),
                        ..Default::default()
                    },
                ])
            });
        let (service, _receiver) = service_with(config(), tabular);

        let summary = service
            .import_participants(ImportParticipantsInput {
                path: "roster.csv".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                added:              2,
                skipped_duplicates: 1,
                skipped_invalid:    1,
            }
        );
        assert_eq!(service.get_snapshot().await.participant_count, 2);
    }

    #[tokio::test]
    async fn test_import_participants_propagates_read_errors() {
        let mut tabular = MockTabularStore::new();
        tabular
            .expect_read_participants()
            .returning(|_| Err(SessionError::ImportFormat("missing column 'Tên'".to_string())));
        let (service, _receiver) = service_with(config(), tabular);

        assert_eq!(
            service
                .import_participants(ImportParticipantsInput {
                    path: "roster.csv".to_string(),
                })
                .await,
            Err(SessionError::ImportFormat("missing column 'Tên'".to_string()))
        );
        assert_eq!(service.get_snapshot().await.participant_count, 0);
    }
}
