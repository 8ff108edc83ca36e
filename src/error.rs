use thiserror::Error;

/// Failures raised while loading the KPI table or deriving views from it.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A column was referenced that the loaded table does not have.
    #[error("column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("workbook has no worksheets")]
    EmptyWorkbook,
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

impl DashboardError {
    pub fn missing_column(column: &str) -> Self {
        DashboardError::MissingColumn {
            column: column.to_string(),
        }
    }
}
