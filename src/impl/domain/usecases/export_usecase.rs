use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    data::models::{
        backup_model::BackupModel,
        export_row_model::{GoalRowModel, SummaryRowModel, TransactionRowModel},
    },
    domain::logic::aggregator::Aggregator,
    entities::{AppState, ExportDataType, ExportFile, ExportFormat, ExportRequest},
    errors::{NothingToExport, WriteError},
    presentation::export_printer::ExportPrinter,
};

#[async_trait]
pub trait ExportUsecase: Send + Sync {
    fn export(
        &self,
        state: &AppState,
        request: ExportRequest,
        now: DateTime<Utc>,
    ) -> Result<ExportFile, ServerError>;

    fn backup(&self, state: &AppState, now: DateTime<Utc>) -> Result<ExportFile, ServerError>;

    /// Writes `file` into `dir` under its own filename.
    async fn write_to_dir<P>(&self, file: &ExportFile, dir: P) -> Result<PathBuf, ServerError>
    where
        P: AsRef<Path> + Send;
}

pub(crate) struct ExportUsecaseImpl {
    printer: ExportPrinter,
}

#[async_trait]
impl ExportUsecase for ExportUsecaseImpl {
    fn export(
        &self,
        state: &AppState,
        request: ExportRequest,
        now: DateTime<Utc>,
    ) -> Result<ExportFile, ServerError> {
        let ExportRequest {
            data_type,
            format,
            window,
        } = request;
        let date = now.date_naive().format("%Y-%m-%d");
        let ext = format.extension();

        let (filename, content, record_count) = match data_type {
            ExportDataType::Transactions => {
                let rows: Vec<TransactionRowModel> = Aggregator::new(&state.transactions)
                    .within(window, now)
                    .transactions()
                    .map(Into::into)
                    .collect();
                self.ensure_rows(rows.len(), request)?;
                (
                    format!("transactions_{}_{date}.{ext}", window.key()),
                    self.printer.print_rows(&rows, format)?,
                    rows.len(),
                )
            }
            ExportDataType::Goals => {
                let rows: Vec<GoalRowModel> = state.goals.iter().map(Into::into).collect();
                self.ensure_rows(rows.len(), request)?;
                (
                    format!("goals_{date}.{ext}"),
                    self.printer.print_rows(&rows, format)?,
                    rows.len(),
                )
            }
            ExportDataType::Summary => {
                let aggregator = Aggregator::new(&state.transactions).within(window, now);
                let rows = SummaryRowModel::rows(&aggregator.summary(), aggregator.len(), window);
                self.ensure_rows(rows.len(), request)?;
                (
                    format!("financial_summary_{}_{date}.{ext}", window.key()),
                    self.printer.print_rows(&rows, format)?,
                    rows.len(),
                )
            }
        };

        info!(
            data_type = data_type.key(),
            window = window.key(),
            record_count,
            %filename,
            "Exported data."
        );
        Ok(ExportFile {
            filename,
            mime_type: format.mime_type(),
            content,
            record_count,
        })
    }

    fn backup(&self, state: &AppState, now: DateTime<Utc>) -> Result<ExportFile, ServerError> {
        let content = self
            .printer
            .print_backup(&BackupModel::from_state(state, now))?;
        let filename = format!(
            "finance-app-backup-{}.json",
            now.date_naive().format("%Y-%m-%d")
        );
        info!(%filename, "Created backup.");
        Ok(ExportFile {
            filename,
            mime_type: ExportFormat::Json.mime_type(),
            content,
            record_count: state.transactions.len() + state.goals.len() + state.custom_quotes.len(),
        })
    }

    async fn write_to_dir<P>(&self, file: &ExportFile, dir: P) -> Result<PathBuf, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let path = dir.as_ref().join(&file.filename);
        tokio::fs::write(&path, file.content.as_bytes())
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        Ok(path)
    }
}

impl ExportUsecaseImpl {
    pub(crate) fn new() -> Self {
        ExportUsecaseImpl {
            printer: ExportPrinter::new(),
        }
    }

    fn ensure_rows(&self, count: usize, request: ExportRequest) -> Result<(), ServerError> {
        if count == 0 {
            return Err(NothingToExport::new(
                request.data_type.key(),
                request.window.key(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::entities::{Goal, TimeWindow, Transaction, TransactionType};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn transaction(id: &str, t: TransactionType, amount: f64, date: (i32, u32, u32)) -> Transaction {
        Transaction {
            id: id.into(),
            transaction_type: t,
            amount,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            source: None,
            category: None,
            description: None,
            tags: vec![],
        }
    }

    fn state() -> AppState {
        AppState {
            transactions: Arc::new(vec![
                transaction("1", TransactionType::Income, 1000.0, (2024, 3, 1)),
                transaction("2", TransactionType::Expense, 50.0, (2024, 3, 10)),
                transaction("3", TransactionType::Expense, 70.0, (2023, 1, 10)),
            ]),
            ..Default::default()
        }
    }

    fn request(data_type: ExportDataType, format: ExportFormat, window: TimeWindow) -> ExportRequest {
        ExportRequest {
            data_type,
            format,
            window,
        }
    }

    #[test]
    fn transactions_respect_window() {
        let file = ExportUsecaseImpl::new()
            .export(
                &state(),
                request(ExportDataType::Transactions, ExportFormat::Csv, TimeWindow::Month),
                now(),
            )
            .unwrap();
        assert_eq!(file.filename, "transactions_month_2024-03-15.csv");
        assert_eq!(file.mime_type, "text/csv");
        assert_eq!(file.record_count, 2);
        assert_eq!(file.content.lines().count(), 3);
    }

    #[test]
    fn summary_rows_include_other_category() {
        let file = ExportUsecaseImpl::new()
            .export(
                &state(),
                request(ExportDataType::Summary, ExportFormat::Json, TimeWindow::All),
                now(),
            )
            .unwrap();
        assert_eq!(file.filename, "financial_summary_all_2024-03-15.json");
        let rows: serde_json::Value = serde_json::from_str(&file.content).unwrap();
        assert_eq!(rows[2]["metric"], "Net Balance");
        assert_eq!(rows[2]["value"], 880.0);
        assert_eq!(rows[4]["metric"], "Expenses - Other");
        assert_eq!(rows[4]["period"], "all");
    }

    #[test]
    fn empty_selection_is_an_error() {
        let usecase = ExportUsecaseImpl::new();
        assert!(usecase
            .export(
                &state(),
                request(ExportDataType::Goals, ExportFormat::Csv, TimeWindow::All),
                now(),
            )
            .is_err());
        assert!(usecase
            .export(
                &AppState::default(),
                request(ExportDataType::Transactions, ExportFormat::Json, TimeWindow::Week),
                now(),
            )
            .is_err());
    }

    #[test]
    fn goals_ignore_window() {
        let mut state = state();
        state.goals = Arc::new(vec![Goal {
            id: "g".into(),
            title: "Fund".to_string(),
            target_amount: 100.0,
            current_amount: 100.0,
            deadline: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }]);
        let file = ExportUsecaseImpl::new()
            .export(
                &state,
                request(ExportDataType::Goals, ExportFormat::Csv, TimeWindow::Week),
                now(),
            )
            .unwrap();
        assert_eq!(file.filename, "goals_2024-03-15.csv");
        assert!(file.content.ends_with("g,Fund,100,100,2020-01-01,100.00%\n"));
    }

    #[tokio::test]
    async fn backup_is_written_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let usecase = ExportUsecaseImpl::new();
        let file = usecase.backup(&state(), now()).unwrap();
        assert_eq!(file.filename, "finance-app-backup-2024-03-15.json");

        let path = usecase.write_to_dir(&file, dir.path()).await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["transactions"].as_array().unwrap().len(), 3);
        assert_eq!(value["customQuotes"], serde_json::json!([]));
        assert_eq!(value["exportDate"], "2024-03-15T10:00:00.000Z");
        assert_eq!(value["config"]["currency"], "USD");
    }
}
