#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
    #[error("Workbook has no sheets")]
    EmptyWorkbook,
    #[error("Required column not found: {column}")]
    MissingColumn { column: &'static str },
    #[error("No reporting-date sheets found in workbook")]
    NoReportSheets,
}
