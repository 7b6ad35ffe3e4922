use super::mapping::{FieldMapping, FieldMappings};
use serde::{Deserialize, Serialize};

/// Header row is row 1, data starts on row 2
pub const DATA_START_ROW: u32 = 2;

/// Import submission sent with the file to `POST /leads/import`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub sheet_name: String,
    /// Only mappings that carry a column
    pub field_mappings: Vec<FieldMapping>,
    pub skip_empty_rows: bool,
    pub start_from_row: u32,
}

impl ImportRequest {
    pub fn new(sheet_name: impl Into<String>, mappings: &FieldMappings) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            field_mappings: mappings.bound(),
            skip_empty_rows: true,
            start_from_row: DATA_START_ROW,
        }
    }

    /// Multipart text parts in submission order (the file part is added by the caller)
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("sheetName", self.sheet_name.clone()),
            ("fieldMappings", serde_json::to_string(&self.field_mappings)?),
            ("skipEmptyRows", self.skip_empty_rows.to_string()),
            ("startFromRow", self.start_from_row.to_string()),
        ])
    }
}

/// Sample request sent with the file to `POST /leads/import/preview`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub sheet_name: String,
    pub preview_rows: u32,
}

impl PreviewRequest {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sheetName", self.sheet_name.clone()),
            ("previewRows", self.preview_rows.to_string()),
        ]
    }
}
