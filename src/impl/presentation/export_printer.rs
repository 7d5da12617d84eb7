use fractic_server_error::{CriticalError, ServerError};

use crate::{
    data::models::{backup_model::BackupModel, export_row_model::ExportRow},
    entities::ExportFormat,
    errors::{CsvWriteError, SerializationError},
};

pub(crate) struct ExportPrinter;

impl ExportPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print_rows<R: ExportRow>(
        &self,
        rows: &[R],
        format: ExportFormat,
    ) -> Result<String, ServerError> {
        match format {
            ExportFormat::Csv => self.print_csv(rows),
            ExportFormat::Json => serde_json::to_string_pretty(rows)
                .map_err(|e| SerializationError::with_debug("export rows", &e)),
        }
    }

    pub(crate) fn print_backup(&self, backup: &BackupModel) -> Result<String, ServerError> {
        serde_json::to_string_pretty(backup).map_err(|e| SerializationError::with_debug("backup", &e))
    }

    /// Header row, then one row per record. Fields containing the delimiter,
    /// quotes or newlines are quoted.
    fn print_csv<R: ExportRow>(&self, rows: &[R]) -> Result<String, ServerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(R::HEADERS)
            .map_err(|e| CsvWriteError::with_debug(&e))?;
        for row in rows {
            writer
                .write_record(row.csv_fields())
                .map_err(|e| CsvWriteError::with_debug(&e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CsvWriteError::with_debug(e.error()))?;
        String::from_utf8(bytes)
            .map_err(|e| CriticalError::with_debug("CSV output is not valid UTF-8", &e))
    }
}
