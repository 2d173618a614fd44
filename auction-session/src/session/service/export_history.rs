use {
    super::Service,
    crate::api::SessionError,
};

#[derive(Debug, Clone)]
pub struct ExportHistoryInput {
    pub path: String,
}

impl Service {
    #[tracing::instrument(skip_all, fields(path = %input.path), err(level = tracing::Level::TRACE))]
    pub async fn export_history(&self, input: ExportHistoryInput) -> Result<(), SessionError> {
        // The session lock is released before the file is written.
        let rows = self.session.lock().await.export_rows()?;
        let count = rows.len();
        self.tabular.write_history(&input.path, rows).await?;
        tracing::info!(rows = count, "Bid history exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            kernel::tabular::{
                HistoryExportRow,
                MockTabularStore,
            },
            session::service::tests::{
                bid,
                bidding_service_with,
                config,
                service_with,
                steps,
            },
        },
        mockall::predicate::{
            always,
            eq,
        },
    };

    #[tokio::test]
    async fn test_export_requires_bidding() {
        let (service, _receiver) = service_with(config(), MockTabularStore::new());
        assert_eq!(
            service
                .export_history(ExportHistoryInput {
                    path: "history.csv".to_string(),
                })
                .await,
            Err(SessionError::SessionNotStarted)
        );
    }

    #[tokio::test]
    async fn test_export_history_after_close() {
        let mut tabular = MockTabularStore::new();
        tabular
            .expect_write_history()
            .with(eq("history.csv"), always())
            .times(1)
            .returning(|_, rows| {
                assert_eq!(
                    rows,
                    vec![
                        HistoryExportRow {
                            sequence_number: 1,
                            participant_id:  "1".to_string(),
                            name:            "Bidder 1".to_string(),
                            amount_display:  "2.000.000 đồng".to_string(),
                        },
                        HistoryExportRow {
                            sequence_number: 2,
                            participant_id:  "2".to_string(),
                            name:            "Bidder 2".to_string(),
                            amount_display:  "2.500.000 đồng".to_string(),
                        },
                    ]
                );
                Ok(())
            });
        let (service, _receiver) = bidding_service_with(tabular).await;
        bid(&service, "1", steps(2)).await.unwrap();
        bid(&service, "2", steps(1)).await.unwrap();
        service.close_session().await.unwrap();

        service
            .export_history(ExportHistoryInput {
                path: "history.csv".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_export_history_io_error() {
        let mut tabular = MockTabularStore::new();
        tabular
            .expect_write_history()
            .returning(|_, _| Err(SessionError::Io("permission denied".to_string())));
        let (service, _receiver) = bidding_service_with(tabular).await;
        assert_eq!(
            service
                .export_history(ExportHistoryInput {
                    path: "/readonly/history.csv".to_string(),
                })
                .await,
            Err(SessionError::Io("permission denied".to_string()))
        );
    }
}
