use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SheetUrlError {
    #[error("Please enter a Google Sheet URL")]
    Empty,
}

/// Body of `POST /leads/import/google-sheet`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSheetImportRequest {
    pub sheet_url: String,
}

impl GoogleSheetImportRequest {
    /// Trims the URL; blank input is never sent
    pub fn new(sheet_url: &str) -> Result<Self, SheetUrlError> {
        let sheet_url = sheet_url.trim();
        if sheet_url.is_empty() {
            return Err(SheetUrlError::Empty);
        }
        Ok(Self {
            sheet_url: sheet_url.to_string(),
        })
    }
}
