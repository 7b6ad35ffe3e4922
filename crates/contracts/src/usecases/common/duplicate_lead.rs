use serde::{Deserialize, Serialize};

/// Row rejected by the backend because it matches an existing lead
/// (by email or phone). Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateLead {
    /// Spreadsheet row number as reported by the backend
    #[serde(alias = "rowIndex", alias = "rowNumber")]
    pub row: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "duplicateReason")]
    pub reason: String,
}
