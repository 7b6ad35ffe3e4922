use crate::usecases::common::DuplicateLead;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSheetImportResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub inserted_count: u32,
    #[serde(default)]
    pub duplicate_count: Option<u32>,
    #[serde(default)]
    pub duplicate_leads: Option<Vec<DuplicateLead>>,
}

impl GoogleSheetImportResponse {
    /// Rows to show in the duplicate review, `None` when the backend
    /// reported no duplicates
    pub fn duplicates_to_review(&self) -> Option<&[DuplicateLead]> {
        match self.duplicate_count {
            Some(count) if count > 0 => Some(self.duplicate_leads.as_deref().unwrap_or_default()),
            _ => None,
        }
    }
}
