#[cfg(test)]
use mockall::automock;
use {
    crate::api::SessionError,
    async_trait::async_trait,
    auction_session_api_types::participant::ParticipantCreate,
    csv_async::{
        AsyncReaderBuilder,
        AsyncWriterBuilder,
        StringRecord,
        Trim,
    },
    futures::StreamExt,
    std::fmt::Debug,
};

pub const COLUMN_ID: &str = "Mã Số";
pub const COLUMN_NAME: &str = "Tên";
pub const COLUMN_IDENTITY_NUMBER: &str = "CCCD/DKKD";
pub const COLUMN_ISSUED_BY: &str = "Nơi Cấp";
pub const COLUMN_ADDRESS: &str = "Địa Chỉ";

pub const COLUMN_SEQUENCE: &str = "Lần Trả";
pub const COLUMN_AMOUNT: &str = "Giá Trả";

const EXPORT_HEADER: [&str; 4] = [COLUMN_SEQUENCE, COLUMN_ID, COLUMN_NAME, COLUMN_AMOUNT];
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryExportRow {
    pub sequence_number: u32,
    pub participant_id:  String,
    pub name:            String,
    pub amount_display:  String,
}

/// Tabular files exchanged with the operator: the roster import and the bid history export.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TabularStore: Debug + Send + Sync + 'static {
    async fn read_participants(&self, path: &str) -> Result<Vec<ParticipantCreate>, SessionError>;
    async fn write_history(
        &self,
        path: &str,
        rows: Vec<HistoryExportRow>,
    ) -> Result<(), SessionError>;
}

#[derive(Clone, Debug, Default)]
pub struct CsvStore;

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim_start_matches(BYTE_ORDER_MARK).trim() == name)
}

fn require_column(headers: &StringRecord, name: &str) -> Result<usize, SessionError> {
    find_column(headers, name)
        .ok_or_else(|| SessionError::ImportFormat(format!("missing column '{}'", name)))
}

fn optional_field(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|index| record.get(index))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl TabularStore for CsvStore {
    #[tracing::instrument(skip(self), err(level = tracing::Level::DEBUG))]
    async fn read_participants(&self, path: &str) -> Result<Vec<ParticipantCreate>, SessionError> {
        let file = tokio::fs::File::open(path).await?;
        let mut reader = AsyncReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .create_reader(file);
        let headers = reader.headers().await?.clone();
        let id_column = require_column(&headers, COLUMN_ID)?;
        let name_column = require_column(&headers, COLUMN_NAME)?;
        let identity_column = find_column(&headers, COLUMN_IDENTITY_NUMBER);
        let issued_by_column = find_column(&headers, COLUMN_ISSUED_BY);
        let address_column = find_column(&headers, COLUMN_ADDRESS);

        let mut rows = Vec::new();
        let mut records = reader.records();
        while let Some(record) = records.next().await {
            let record = record?;
            rows.push(ParticipantCreate {
                id:              record.get(id_column).unwrap_or_default().to_string(),
                name:            record.get(name_column).unwrap_or_default().to_string(),
                identity_number: optional_field(&record, identity_column),
                issued_by:       optional_field(&record, issued_by_column),
                address:         optional_field(&record, address_column),
            });
        }
        tracing::debug!(rows = rows.len(), "Read participant rows");
        Ok(rows)
    }

    #[tracing::instrument(skip(self, rows), fields(rows = rows.len()), err(level = tracing::Level::DEBUG))]
    async fn write_history(
        &self,
        path: &str,
        rows: Vec<HistoryExportRow>,
    ) -> Result<(), SessionError> {
        let file = tokio::fs::File::create(path).await?;
        let mut writer = AsyncWriterBuilder::new().create_writer(file);
        writer.write_record(EXPORT_HEADER).await?;
        for row in rows {
            writer
                .write_record([
                    row.sequence_number.to_string(),
                    row.participant_id,
                    row.name,
                    row.amount_display,
                ])
                .await?;
        }
        writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_participants_by_header_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        tokio::fs::write(
            &path,
            "\u{feff}Tên,Mã Số,CCCD/DKKD,Nơi Cấp,Địa Chỉ\n\
             Nguyen Van A,1,001099000123,Ha Noi,12 Hang Bac\n\
             Tran Thi B, 2 ,,,\n",
        )
        .await
        .unwrap();

        let rows = CsvStore
            .read_participants(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![
                ParticipantCreate {
                    id:              "1".to_string(),
                    name:            "Nguyen Van A".to_string(),
                    identity_number: Some("001099000123".to_string()),
                    issued_by:       Some("Ha Noi".to_string()),
                    address:         Some("12 Hang Bac".to_string()),
                },
                ParticipantCreate {
                    id:              "2".to_string(),
                    name:            "Tran Thi B".to_string(),
                    identity_number: None,
                    issued_by:       None,
                    address:         None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_read_participants_requires_id_and_name_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        tokio::fs::write(&path, "Tên,Địa Chỉ\nNguyen Van A,Hue\n")
            .await
            .unwrap();

        let result = CsvStore.read_participants(path.to_str().unwrap()).await;
        assert_eq!(
            result,
            Err(SessionError::ImportFormat(
                "missing column 'Mã Số'".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let result = CsvStore.read_participants("/nonexistent/roster.csv").await;
        assert!(matches!(result, Err(SessionError::Io(_))));
    }

    #[tokio::test]
    async fn test_write_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        CsvStore
            .write_history(
                path.to_str().unwrap(),
                vec![
                    HistoryExportRow {
                        sequence_number: 1,
                        participant_id:  "1".to_string(),
                        name:            "Nguyen Van A".to_string(),
                        amount_display:  "2.000.000 đồng".to_string(),
                    },
                    HistoryExportRow {
                        sequence_number: 2,
                        participant_id:  "2".to_string(),
                        name:            "Tran Thi B".to_string(),
                        amount_display:  "2.500.000 đồng".to_string(),
                    },
                ],
            )
            .await
            .unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            written,
            "Lần Trả,Mã Số,Tên,Giá Trả\n\
             1,1,Nguyen Van A,2.000.000 đồng\n\
             2,2,Tran Thi B,2.500.000 đồng\n"
        );
    }
}
