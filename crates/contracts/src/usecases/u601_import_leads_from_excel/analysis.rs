use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Spreadsheet formats accepted by the import endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetKind {
    Xlsx,
    Xls,
    Csv,
}

impl SpreadsheetKind {
    pub const ALL: [SpreadsheetKind; 3] = [Self::Xlsx, Self::Xls, Self::Csv];

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Xls => "application/vnd.ms-excel",
            Self::Csv => "text/csv",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Csv => "csv",
        }
    }

    /// Value for the `accept` attribute of a file input
    pub fn accept_attribute() -> String {
        Self::ALL
            .iter()
            .map(|k| format!(".{}", k.extension()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Classify an uploaded file.
    ///
    /// The MIME type decides. Only when the browser reports no MIME type at
    /// all does the file extension decide.
    pub fn detect(mime_type: &str, file_name: &str) -> Option<Self> {
        let mime = mime_type.trim().to_lowercase();
        if !mime.is_empty() {
            return Self::ALL.into_iter().find(|k| k.mime_type() == mime);
        }

        let ext = file_name.rsplit_once('.')?.1.to_lowercase();
        Self::ALL.into_iter().find(|k| k.extension() == ext)
    }
}

/// Workbook metadata returned by `POST /leads/import/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelFileAnalysis {
    pub file_name: String,
    pub file_size: u64,
    pub sheets: Vec<ExcelSheetInfo>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelSheetInfo {
    pub name: String,
    pub row_count: u64,
    #[serde(default)]
    pub column_headers: Vec<String>,
    pub has_data: bool,
}

impl ExcelFileAnalysis {
    /// First sheet flagged as containing data, in workbook order
    pub fn first_sheet_with_data(&self) -> Option<&ExcelSheetInfo> {
        self.sheets.iter().find(|s| s.has_data)
    }

    pub fn sheet(&self, name: &str) -> Option<&ExcelSheetInfo> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Bounded sample of a sheet returned by `POST /leads/import/preview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPreviewData {
    pub headers: Vec<String>,
    #[serde(default)]
    pub sample_rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub total_rows: u64,
}

impl SheetPreviewData {
    /// Headers that can be offered as mapping targets (blank headers skipped)
    pub fn mappable_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .map(|h| h.as_str())
            .filter(|h| !h.trim().is_empty())
            .collect()
    }

    /// Index of a header in the sheet, if present
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell at `row`/`column` rendered as display text
    pub fn cell_text(&self, row: usize, column: usize) -> String {
        self.sample_rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(cell_to_text)
            .unwrap_or_default()
    }
}

/// Render a preview cell for display: strings verbatim, null as empty,
/// anything else as JSON text.
pub fn cell_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
