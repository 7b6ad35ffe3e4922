use crate::usecases::common::DuplicateLead;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of `POST /leads/import`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelUploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<ImportSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_leads: Option<Vec<DuplicateLead>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportSummary {
    pub total_rows: u32,
    pub successful_imports: u32,
    pub failed_imports: u32,
    pub errors: Vec<ImportRowError>,
    /// Created leads as returned by the backend; not interpreted here
    pub leads: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRowError {
    pub row: u32,
    pub message: String,
}

/// Per-row errors trimmed for display
#[derive(Debug, Clone, PartialEq)]
pub struct RowErrorDigest {
    pub shown: Vec<ImportRowError>,
    pub hidden: usize,
}

impl RowErrorDigest {
    /// "+N more errors" when the list was trimmed
    pub fn overflow_label(&self) -> Option<String> {
        match self.hidden {
            0 => None,
            1 => Some("+1 more error".to_string()),
            n => Some(format!("+{} more errors", n)),
        }
    }
}

impl ExcelUploadResponse {
    pub fn summary(&self) -> ImportSummary {
        self.data.clone().unwrap_or_default()
    }

    pub fn duplicates(&self) -> &[DuplicateLead] {
        self.duplicate_leads.as_deref().unwrap_or_default()
    }
}

impl ImportSummary {
    /// First `cap` row errors plus the count of the rest
    pub fn error_digest(&self, cap: usize) -> RowErrorDigest {
        let shown: Vec<_> = self.errors.iter().take(cap).cloned().collect();
        RowErrorDigest {
            hidden: self.errors.len() - shown.len(),
            shown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_partial_success_and_reports_errors_verbatim() {
        let response: ExcelUploadResponse = serde_json::from_value(json!({
            "success": true,
            "message": "Imported 8 of 10 rows",
            "data": {
                "totalRows": 10,
                "successfulImports": 8,
                "failedImports": 2,
                "errors": [
                    { "row": 4, "message": "Invalid email" },
                    { "row": 7, "message": "Phone is required" }
                ],
                "leads": [{ "id": "l1" }]
            }
        }))
        .unwrap();

        let summary = response.summary();
        assert_eq!(summary.successful_imports, 8);
        assert_eq!(summary.failed_imports, 2);

        let digest = summary.error_digest(10);
        assert_eq!(digest.hidden, 0);
        assert_eq!(digest.overflow_label(), None);
        assert_eq!(digest.shown[0].message, "Invalid email");
        assert_eq!(digest.shown[1].row, 7);
        assert!(response.duplicates().is_empty());
    }

    #[test]
    fn test_error_digest_caps_display() {
        let summary = ImportSummary {
            errors: (1..=13)
                .map(|row| ImportRowError {
                    row,
                    message: format!("bad row {}", row),
                })
                .collect(),
            ..Default::default()
        };

        let digest = summary.error_digest(10);
        assert_eq!(digest.shown.len(), 10);
        assert_eq!(digest.shown.last().unwrap().row, 10);
        assert_eq!(digest.overflow_label().as_deref(), Some("+3 more errors"));
    }

    #[test]
    fn test_failure_without_data_is_lenient() {
        let response: ExcelUploadResponse =
            serde_json::from_value(json!({ "success": false, "message": "Sheet is empty", "data": null }))
                .unwrap();
        assert!(!response.success);
        assert_eq!(response.summary(), ImportSummary::default());
    }
}
