//! Import wizard state machine.
//!
//! `upload → analyze → map → preview → import → complete`, with
//! `preview → map` as the only backward step and `reset` from anywhere.
//! [`advance`] is the transition table; [`ImportWizard`] owns the session
//! state and a single in-flight request ticket. Rendering code drives it and
//! performs the HTTP calls.

use super::analysis::{ExcelFileAnalysis, SheetPreviewData, SpreadsheetKind};
use super::field::LeadFieldDefinition;
use super::mapping::{FieldMappings, MappingError};
use super::request::{ImportRequest, PreviewRequest};
use super::response::ExcelUploadResponse;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    Upload,
    Analyze,
    Map,
    Preview,
    Import,
    Complete,
}

impl WizardStage {
    pub const ALL: [WizardStage; 6] = [
        Self::Upload,
        Self::Analyze,
        Self::Map,
        Self::Preview,
        Self::Import,
        Self::Complete,
    ];

    /// Position in the wizard, starting at 0
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::Analyze => "Analyze",
            Self::Map => "Map",
            Self::Preview => "Preview",
            Self::Import => "Import",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for WizardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    FileAccepted,
    AnalysisSucceeded,
    AnalysisFailed,
    MappingConfirmed,
    BackToMapping,
    ImportSubmitted,
    ImportCompleted,
    ImportFailed,
    Reset,
}

/// Transition table
pub fn advance(stage: WizardStage, event: WizardEvent) -> Result<WizardStage, WizardError> {
    use WizardEvent::*;
    use WizardStage::*;

    match (stage, event) {
        (_, Reset) => Ok(Upload),
        (Upload, FileAccepted) => Ok(Analyze),
        (Analyze, AnalysisSucceeded) => Ok(Map),
        (Analyze, AnalysisFailed) => Ok(Upload),
        (Map, MappingConfirmed) => Ok(Preview),
        (Preview, BackToMapping) => Ok(Map),
        (Preview, ImportSubmitted) => Ok(Import),
        (Import, ImportCompleted) => Ok(Complete),
        (Import, ImportFailed) => Ok(Map),
        (stage, event) => Err(WizardError::InvalidTransition { stage, event }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Analyze,
    Preview,
    Import,
}

/// Proof of the single outstanding request. Responses must hand it back;
/// a ticket that is no longer current is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    id: u64,
    kind: RequestKind,
}

/// File handle the wizard can inspect before uploading
pub trait SpreadsheetFile {
    fn file_name(&self) -> String;
    fn mime_type(&self) -> String;
    fn size(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("\"{file_name}\" is not a supported spreadsheet. Please upload an .xlsx, .xls or .csv file")]
    UnsupportedFileType { file_name: String },
    #[error("Cannot apply {event:?} in the {stage} stage")]
    InvalidTransition {
        stage: WizardStage,
        event: WizardEvent,
    },
    #[error("This action is only available in the {expected} stage (currently {actual})")]
    WrongStage {
        expected: WizardStage,
        actual: WizardStage,
    },
    #[error("Please wait for the current {0:?} request to finish")]
    Busy(RequestKind),
    #[error("Ignoring a response for a request that is no longer current")]
    StaleResponse,
    #[error("Please select a sheet first")]
    NoSheetSelected,
    #[error("Lead fields are not loaded yet")]
    SchemaNotLoaded,
    #[error("Sheet \"{0}\" does not exist in this file")]
    UnknownSheet(String),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    /// Message reported by the backend or transport, shown verbatim
    #[error("{0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct ImportWizard<F> {
    stage: WizardStage,
    fields: Vec<LeadFieldDefinition>,
    file: Option<F>,
    analysis: Option<ExcelFileAnalysis>,
    selected_sheet: Option<String>,
    preview: Option<SheetPreviewData>,
    mappings: FieldMappings,
    result: Option<ExcelUploadResponse>,
    in_flight: Option<RequestTicket>,
    issued: u64,
}

impl<F> Default for ImportWizard<F> {
    fn default() -> Self {
        Self {
            stage: WizardStage::Upload,
            fields: Vec::new(),
            file: None,
            analysis: None,
            selected_sheet: None,
            preview: None,
            mappings: FieldMappings::default(),
            result: None,
            in_flight: None,
            issued: 0,
        }
    }
}

impl<F: SpreadsheetFile> ImportWizard<F> {
    pub fn new(fields: Vec<LeadFieldDefinition>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn fields(&self) -> &[LeadFieldDefinition] {
        &self.fields
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn analysis(&self) -> Option<&ExcelFileAnalysis> {
        self.analysis.as_ref()
    }

    pub fn selected_sheet(&self) -> Option<&str> {
        self.selected_sheet.as_deref()
    }

    pub fn preview(&self) -> Option<&SheetPreviewData> {
        self.preview.as_ref()
    }

    pub fn mappings(&self) -> &FieldMappings {
        &self.mappings
    }

    pub fn result(&self) -> Option<&ExcelUploadResponse> {
        self.result.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestKind> {
        self.in_flight.map(|t| t.kind)
    }

    /// Install the lead field schema. When a preview is already loaded the
    /// mappings are re-seeded against it.
    pub fn set_fields(&mut self, fields: Vec<LeadFieldDefinition>) {
        self.fields = fields;
        if self.stage == WizardStage::Map {
            if let Some(preview) = &self.preview {
                self.mappings = FieldMappings::seed(&self.fields, &preview.headers);
            }
        }
    }

    // ---- upload / analyze ----

    /// Accept a file and start its analysis. Unsupported files are refused
    /// without touching any state.
    pub fn select_file(&mut self, file: F) -> Result<RequestTicket, WizardError> {
        let file_name = file.file_name();
        if SpreadsheetKind::detect(&file.mime_type(), &file_name).is_none() {
            log::warn!("wizard: rejected file {:?} ({:?})", file_name, file.mime_type());
            return Err(WizardError::UnsupportedFileType { file_name });
        }
        let next = advance(self.stage, WizardEvent::FileAccepted)?;
        self.ensure_idle()?;

        self.file = Some(file);
        self.enter(next, WizardEvent::FileAccepted);
        Ok(self.begin(RequestKind::Analyze))
    }

    /// Apply the analysis response. Success moves to `map` and auto-selects
    /// the first sheet with data; failure resets to `upload`.
    pub fn finish_analysis(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ExcelFileAnalysis, String>,
    ) -> Result<(), WizardError> {
        self.settle(ticket)?;
        match outcome {
            Ok(analysis) => {
                let next = advance(self.stage, WizardEvent::AnalysisSucceeded)?;
                self.selected_sheet = analysis.first_sheet_with_data().map(|s| s.name.clone());
                self.analysis = Some(analysis);
                self.enter(next, WizardEvent::AnalysisSucceeded);
                Ok(())
            }
            Err(message) => {
                let next = advance(self.stage, WizardEvent::AnalysisFailed)?;
                self.clear_session();
                self.enter(next, WizardEvent::AnalysisFailed);
                Err(WizardError::Server(message))
            }
        }
    }

    // ---- sheet selection / preview ----

    /// Change the selected sheet. Clears the preview and mappings; the caller
    /// follows up with [`Self::begin_preview`].
    pub fn select_sheet(&mut self, name: &str) -> Result<(), WizardError> {
        self.ensure_stage(WizardStage::Map)?;
        self.ensure_idle()?;
        let exists = self
            .analysis
            .as_ref()
            .map(|a| a.sheet(name).is_some())
            .unwrap_or(false);
        if !exists {
            return Err(WizardError::UnknownSheet(name.to_string()));
        }

        self.selected_sheet = Some(name.to_string());
        self.preview = None;
        self.mappings = FieldMappings::default();
        Ok(())
    }

    pub fn begin_preview(
        &mut self,
        preview_rows: u32,
    ) -> Result<(RequestTicket, PreviewRequest), WizardError> {
        self.ensure_stage(WizardStage::Map)?;
        self.ensure_idle()?;
        let sheet_name = self
            .selected_sheet
            .clone()
            .ok_or(WizardError::NoSheetSelected)?;

        let ticket = self.begin(RequestKind::Preview);
        Ok((
            ticket,
            PreviewRequest {
                sheet_name,
                preview_rows,
            },
        ))
    }

    /// Apply the preview response and re-seed the mappings from its headers.
    /// Failure leaves the stage unchanged.
    pub fn finish_preview(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<SheetPreviewData, String>,
    ) -> Result<(), WizardError> {
        self.settle(ticket)?;
        let preview = outcome.map_err(WizardError::Server)?;
        self.mappings = FieldMappings::seed(&self.fields, &preview.headers);
        self.preview = Some(preview);
        Ok(())
    }

    // ---- mapping edits ----

    pub fn update_mapping(&mut self, lead_field: &str, excel_column: &str) -> Result<(), WizardError> {
        self.ensure_stage(WizardStage::Map)?;
        Ok(self.mappings.update(lead_field, excel_column)?)
    }

    pub fn add_notes_column(&mut self, column: &str) -> Result<(), WizardError> {
        self.ensure_stage(WizardStage::Map)?;
        Ok(self.mappings.add_notes_column(column)?)
    }

    pub fn remove_notes_column(&mut self, index: usize) -> Result<String, WizardError> {
        self.ensure_stage(WizardStage::Map)?;
        Ok(self.mappings.remove_notes_column(index)?)
    }

    /// Returns the field that was added, `None` when every field is mapped
    pub fn add_mapping(&mut self) -> Result<Option<String>, WizardError> {
        self.ensure_stage(WizardStage::Map)?;
        Ok(self.mappings.add(&self.fields))
    }

    pub fn remove_mapping(&mut self, lead_field: &str) -> Result<(), WizardError> {
        self.ensure_stage(WizardStage::Map)?;
        self.mappings.remove(lead_field)?;
        Ok(())
    }

    // ---- review / import ----

    /// `map → preview`, only when the schema is loaded and every required
    /// field has a column
    pub fn confirm_mapping(&mut self) -> Result<(), WizardError> {
        let next = advance(self.stage, WizardEvent::MappingConfirmed)?;
        self.ensure_idle()?;
        self.ensure_schema()?;
        if self.selected_sheet.is_none() {
            return Err(WizardError::NoSheetSelected);
        }
        self.mappings.validate()?;
        self.enter(next, WizardEvent::MappingConfirmed);
        Ok(())
    }

    /// `preview → map`; mappings are kept
    pub fn back_to_mapping(&mut self) -> Result<(), WizardError> {
        let next = advance(self.stage, WizardEvent::BackToMapping)?;
        self.enter(next, WizardEvent::BackToMapping);
        Ok(())
    }

    pub fn begin_import(&mut self) -> Result<(RequestTicket, ImportRequest), WizardError> {
        let next = advance(self.stage, WizardEvent::ImportSubmitted)?;
        self.ensure_idle()?;
        self.ensure_schema()?;
        let sheet_name = self
            .selected_sheet
            .clone()
            .ok_or(WizardError::NoSheetSelected)?;

        let request = ImportRequest::new(sheet_name, &self.mappings);
        self.enter(next, WizardEvent::ImportSubmitted);
        Ok((self.begin(RequestKind::Import), request))
    }

    /// Any decoded response completes the wizard, successful or not. A
    /// transport failure falls back to `map`.
    pub fn finish_import(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ExcelUploadResponse, String>,
    ) -> Result<(), WizardError> {
        self.settle(ticket)?;
        match outcome {
            Ok(response) => {
                let next = advance(self.stage, WizardEvent::ImportCompleted)?;
                self.result = Some(response);
                self.enter(next, WizardEvent::ImportCompleted);
                Ok(())
            }
            Err(message) => {
                let next = advance(self.stage, WizardEvent::ImportFailed)?;
                self.enter(next, WizardEvent::ImportFailed);
                Err(WizardError::Server(message))
            }
        }
    }

    /// Discard the session and return to `upload`. The field schema is kept
    /// and any outstanding ticket becomes stale.
    pub fn reset(&mut self) {
        self.clear_session();
        self.enter(WizardStage::Upload, WizardEvent::Reset);
    }

    // ---- internals ----

    fn clear_session(&mut self) {
        self.file = None;
        self.analysis = None;
        self.selected_sheet = None;
        self.preview = None;
        self.mappings = FieldMappings::default();
        self.result = None;
        self.in_flight = None;
    }

    fn enter(&mut self, next: WizardStage, event: WizardEvent) {
        log::debug!("wizard: {} --{:?}--> {}", self.stage, event, next);
        self.stage = next;
    }

    fn ensure_stage(&self, expected: WizardStage) -> Result<(), WizardError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        match self.in_flight {
            Some(ticket) => {
                log::warn!("wizard: refused while {:?} is in flight", ticket.kind);
                Err(WizardError::Busy(ticket.kind))
            }
            None => Ok(()),
        }
    }

    fn ensure_schema(&self) -> Result<(), WizardError> {
        if self.fields.is_empty() {
            Err(WizardError::SchemaNotLoaded)
        } else {
            Ok(())
        }
    }

    fn begin(&mut self, kind: RequestKind) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket {
            id: self.issued,
            kind,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    fn settle(&mut self, ticket: RequestTicket) -> Result<(), WizardError> {
        if self.in_flight != Some(ticket) {
            log::debug!("wizard: dropping stale {:?} response", ticket.kind);
            return Err(WizardError::StaleResponse);
        }
        self.in_flight = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u601_import_leads_from_excel::analysis::ExcelSheetInfo;
    use crate::usecases::u601_import_leads_from_excel::mapping::NOTES_FIELD;
    use serde_json::json;

    const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    #[derive(Debug, Clone, PartialEq)]
    struct TestFile {
        name: &'static str,
        mime: &'static str,
    }

    impl SpreadsheetFile for TestFile {
        fn file_name(&self) -> String {
            self.name.to_string()
        }

        fn mime_type(&self) -> String {
            self.mime.to_string()
        }

        fn size(&self) -> u64 {
            2048
        }
    }

    fn leads_xlsx() -> TestFile {
        TestFile {
            name: "leads.xlsx",
            mime: XLSX,
        }
    }

    fn schema() -> Vec<LeadFieldDefinition> {
        vec![
            LeadFieldDefinition::new("name", "Full Name", true),
            LeadFieldDefinition::new("email", "Email", true),
            LeadFieldDefinition::new("phone", "Phone", true),
        ]
    }

    fn analysis() -> ExcelFileAnalysis {
        ExcelFileAnalysis {
            file_name: "leads.xlsx".to_string(),
            file_size: 2048,
            uploaded_at: chrono::Utc::now(),
            sheets: vec![
                ExcelSheetInfo {
                    name: "Summary".to_string(),
                    row_count: 0,
                    column_headers: vec![],
                    has_data: false,
                },
                ExcelSheetInfo {
                    name: "Leads".to_string(),
                    row_count: 10,
                    column_headers: vec!["Full Name".into(), "Email".into(), "Phone".into()],
                    has_data: true,
                },
                ExcelSheetInfo {
                    name: "Old".to_string(),
                    row_count: 3,
                    column_headers: vec!["Full Name".into(), "Email".into()],
                    has_data: true,
                },
            ],
        }
    }

    fn preview(headers: &[&str]) -> SheetPreviewData {
        SheetPreviewData {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            sample_rows: vec![vec![json!("Ann"), json!("ann@x.io"), json!("555-0101")]],
            total_rows: 10,
        }
    }

    /// Wizard sitting in `map` with a loaded preview
    fn wizard_in_map(headers: &[&str]) -> ImportWizard<TestFile> {
        let mut wizard = ImportWizard::new(schema());
        let ticket = wizard.select_file(leads_xlsx()).unwrap();
        wizard.finish_analysis(ticket, Ok(analysis())).unwrap();
        let (ticket, _) = wizard.begin_preview(10).unwrap();
        wizard.finish_preview(ticket, Ok(preview(headers))).unwrap();
        wizard
    }

    #[test]
    fn test_transition_table() {
        use WizardEvent::*;
        use WizardStage::*;

        assert_eq!(advance(Upload, FileAccepted), Ok(Analyze));
        assert_eq!(advance(Analyze, AnalysisFailed), Ok(Upload));
        assert_eq!(advance(Preview, BackToMapping), Ok(Map));
        assert_eq!(advance(Import, ImportFailed), Ok(Map));
        for stage in WizardStage::ALL {
            assert_eq!(advance(stage, Reset), Ok(Upload));
        }
        assert!(advance(Map, BackToMapping).is_err());
        assert!(advance(Complete, ImportSubmitted).is_err());
        assert!(advance(Upload, MappingConfirmed).is_err());
    }

    #[test]
    fn test_supported_files_proceed_to_analysis() {
        for (name, mime) in [
            ("a.xlsx", XLSX),
            ("b.xls", "application/vnd.ms-excel"),
            ("c.csv", "text/csv"),
        ] {
            let mut wizard: ImportWizard<TestFile> = ImportWizard::new(schema());
            wizard.select_file(TestFile { name, mime }).unwrap();
            assert_eq!(wizard.stage(), WizardStage::Analyze);
            assert_eq!(wizard.in_flight(), Some(RequestKind::Analyze));
            assert!(wizard.is_busy());
        }
    }

    #[test]
    fn test_unsupported_file_is_rejected_without_state_change() {
        let mut wizard: ImportWizard<TestFile> = ImportWizard::new(schema());
        let err = wizard
            .select_file(TestFile {
                name: "contract.pdf",
                mime: "application/pdf",
            })
            .unwrap_err();

        assert!(matches!(err, WizardError::UnsupportedFileType { .. }));
        assert!(err.to_string().contains("contract.pdf"));
        assert_eq!(wizard.stage(), WizardStage::Upload);
        assert!(wizard.file().is_none());
        assert!(!wizard.is_busy());
    }

    #[test]
    fn test_analysis_success_auto_selects_first_sheet_with_data() {
        let mut wizard = ImportWizard::new(schema());
        let ticket = wizard.select_file(leads_xlsx()).unwrap();
        wizard.finish_analysis(ticket, Ok(analysis())).unwrap();

        assert_eq!(wizard.stage(), WizardStage::Map);
        assert_eq!(wizard.selected_sheet(), Some("Leads"));
        assert!(!wizard.is_busy());
    }

    #[test]
    fn test_analysis_failure_resets_to_upload() {
        let mut wizard = ImportWizard::new(schema());
        let ticket = wizard.select_file(leads_xlsx()).unwrap();
        let err = wizard
            .finish_analysis(ticket, Err("File is corrupted".to_string()))
            .unwrap_err();

        assert_eq!(err, WizardError::Server("File is corrupted".to_string()));
        assert_eq!(wizard.stage(), WizardStage::Upload);
        assert!(wizard.file().is_none());
        assert!(wizard.analysis().is_none());
    }

    #[test]
    fn test_preview_seeds_mappings_and_confirm_succeeds() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);

        let bound: Vec<_> = wizard
            .mappings()
            .as_slice()
            .iter()
            .map(|m| (m.lead_field.as_str(), m.excel_column.as_str()))
            .collect();
        assert_eq!(
            bound,
            vec![("name", "Full Name"), ("email", "Email"), ("phone", "Phone"), (NOTES_FIELD, "")]
        );

        wizard.confirm_mapping().unwrap();
        assert_eq!(wizard.stage(), WizardStage::Preview);
    }

    #[test]
    fn test_missing_phone_column_blocks_confirmation() {
        let mut wizard = wizard_in_map(&["Full Name", "Email"]);
        assert_eq!(wizard.mappings().get("phone").unwrap().excel_column, "");

        let err = wizard.confirm_mapping().unwrap_err();
        assert_eq!(
            err,
            WizardError::Mapping(MappingError::MissingRequired(vec!["phone".to_string()]))
        );
        assert!(err.to_string().contains("phone"));
        assert_eq!(wizard.stage(), WizardStage::Map);
    }

    #[test]
    fn test_preview_failure_keeps_stage() {
        let mut wizard = ImportWizard::new(schema());
        let ticket = wizard.select_file(leads_xlsx()).unwrap();
        wizard.finish_analysis(ticket, Ok(analysis())).unwrap();
        let (ticket, request) = wizard.begin_preview(10).unwrap();
        assert_eq!(request.sheet_name, "Leads");
        assert_eq!(request.preview_rows, 10);

        let err = wizard
            .finish_preview(ticket, Err("Sheet not found".to_string()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Sheet not found");
        assert_eq!(wizard.stage(), WizardStage::Map);
        assert!(wizard.preview().is_none());
        assert!(!wizard.is_busy());
    }

    #[test]
    fn test_changing_sheet_clears_preview_and_requires_known_sheet() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);

        assert_eq!(
            wizard.select_sheet("Nope"),
            Err(WizardError::UnknownSheet("Nope".to_string()))
        );
        wizard.select_sheet("Old").unwrap();
        assert_eq!(wizard.selected_sheet(), Some("Old"));
        assert!(wizard.preview().is_none());
        assert!(wizard.mappings().as_slice().is_empty());

        let (ticket, request) = wizard.begin_preview(10).unwrap();
        assert_eq!(request.sheet_name, "Old");
        wizard
            .finish_preview(ticket, Ok(preview(&["Full Name", "Email"])))
            .unwrap();
        assert_eq!(wizard.mappings().get("name").unwrap().excel_column, "Full Name");
    }

    #[test]
    fn test_second_request_while_busy_is_refused() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);
        let (_ticket, _) = wizard.begin_preview(10).unwrap();

        assert_eq!(
            wizard.begin_preview(10).unwrap_err(),
            WizardError::Busy(RequestKind::Preview)
        );
        assert_eq!(
            wizard.select_sheet("Old").unwrap_err(),
            WizardError::Busy(RequestKind::Preview)
        );
        assert_eq!(wizard.in_flight(), Some(RequestKind::Preview));
    }

    #[test]
    fn test_response_after_reset_is_ignored() {
        let mut wizard = ImportWizard::new(schema());
        let ticket = wizard.select_file(leads_xlsx()).unwrap();
        wizard.reset();

        assert_eq!(
            wizard.finish_analysis(ticket, Ok(analysis())),
            Err(WizardError::StaleResponse)
        );
        assert_eq!(wizard.stage(), WizardStage::Upload);
        assert!(wizard.analysis().is_none());
    }

    #[test]
    fn test_back_to_mapping_keeps_mappings() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);
        wizard.add_notes_column("Email").unwrap();
        wizard.confirm_mapping().unwrap();
        let before = wizard.mappings().clone();

        wizard.back_to_mapping().unwrap();
        assert_eq!(wizard.stage(), WizardStage::Map);
        assert_eq!(wizard.mappings(), &before);
    }

    #[test]
    fn test_mapping_edits_only_in_map_stage() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);
        wizard.confirm_mapping().unwrap();

        assert_eq!(
            wizard.update_mapping("email", "Phone"),
            Err(WizardError::WrongStage {
                expected: WizardStage::Map,
                actual: WizardStage::Preview,
            })
        );
    }

    #[test]
    fn test_remove_mapping_protects_required_and_notes() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);
        assert!(wizard.remove_mapping("email").is_err());
        assert!(wizard.remove_mapping(NOTES_FIELD).is_err());
        assert_eq!(wizard.mappings().as_slice().len(), 4);
        assert_eq!(wizard.add_mapping(), Ok(None));
    }

    #[test]
    fn test_import_completes_regardless_of_success_flag() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);
        wizard.confirm_mapping().unwrap();
        let (ticket, request) = wizard.begin_import().unwrap();

        assert_eq!(wizard.stage(), WizardStage::Import);
        assert_eq!(request.sheet_name, "Leads");
        assert_eq!(request.field_mappings.len(), 3);

        let response: ExcelUploadResponse = serde_json::from_value(json!({
            "success": false,
            "message": "Imported 8 of 10 rows",
            "data": {
                "totalRows": 10, "successfulImports": 8, "failedImports": 2,
                "errors": [{ "row": 3, "message": "Invalid email" }, { "row": 9, "message": "Duplicate phone" }],
                "leads": []
            }
        }))
        .unwrap();
        wizard.finish_import(ticket, Ok(response)).unwrap();

        assert_eq!(wizard.stage(), WizardStage::Complete);
        let summary = wizard.result().unwrap().summary();
        assert_eq!((summary.successful_imports, summary.failed_imports), (8, 2));
        assert_eq!(summary.errors[1].message, "Duplicate phone");
    }

    #[test]
    fn test_import_transport_failure_returns_to_map() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);
        wizard.confirm_mapping().unwrap();
        let (ticket, _) = wizard.begin_import().unwrap();

        let err = wizard
            .finish_import(ticket, Err("Network error".to_string()))
            .unwrap_err();
        assert_eq!(err, WizardError::Server("Network error".to_string()));
        assert_eq!(wizard.stage(), WizardStage::Map);
        assert!(wizard.result().is_none());
        assert_eq!(wizard.mappings().get("email").unwrap().excel_column, "Email");
    }

    #[test]
    fn test_reset_clears_session_but_keeps_schema() {
        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);
        wizard.confirm_mapping().unwrap();
        wizard.reset();

        assert_eq!(wizard.stage(), WizardStage::Upload);
        assert!(wizard.file().is_none());
        assert!(wizard.analysis().is_none());
        assert!(wizard.selected_sheet().is_none());
        assert!(wizard.preview().is_none());
        assert!(wizard.mappings().as_slice().is_empty());
        assert!(wizard.result().is_none());
        assert_eq!(wizard.fields().len(), 3);
    }

    #[test]
    fn test_late_schema_reseeds_loaded_preview() {
        let mut wizard: ImportWizard<TestFile> = ImportWizard::new(Vec::new());
        let ticket = wizard.select_file(leads_xlsx()).unwrap();
        wizard.finish_analysis(ticket, Ok(analysis())).unwrap();
        let (ticket, _) = wizard.begin_preview(10).unwrap();
        wizard
            .finish_preview(ticket, Ok(preview(&["Full Name", "Email", "Phone"])))
            .unwrap();
        assert_eq!(wizard.mappings().as_slice().len(), 1);

        wizard.set_fields(schema());
        assert_eq!(wizard.mappings().as_slice().len(), 4);
        assert!(wizard.mappings().validate().is_ok());
    }

    #[test]
    fn test_mapping_without_schema_cannot_be_submitted() {
        let mut wizard: ImportWizard<TestFile> = ImportWizard::new(Vec::new());
        let ticket = wizard.select_file(leads_xlsx()).unwrap();
        wizard.finish_analysis(ticket, Ok(analysis())).unwrap();
        let (ticket, _) = wizard.begin_preview(10).unwrap();
        wizard
            .finish_preview(ticket, Ok(preview(&["Full Name", "Email", "Phone"])))
            .unwrap();

        assert_eq!(wizard.confirm_mapping(), Err(WizardError::SchemaNotLoaded));
        assert_eq!(wizard.stage(), WizardStage::Map);

        let mut wizard = wizard_in_map(&["Full Name", "Email", "Phone"]);
        wizard.confirm_mapping().unwrap();
        wizard.set_fields(Vec::new());
        assert_eq!(wizard.begin_import().unwrap_err(), WizardError::SchemaNotLoaded);
        assert_eq!(wizard.stage(), WizardStage::Preview);
        assert!(!wizard.is_busy());
    }
}
