use super::{app_config::ExportFormat, time_window::TimeWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDataType {
    Transactions,
    Goals,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRequest {
    pub data_type: ExportDataType,
    pub format: ExportFormat,
    /// Ignored for goals.
    pub window: TimeWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
    pub record_count: usize,
}
