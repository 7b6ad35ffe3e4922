pub mod analysis;
pub mod field;
pub mod mapping;
pub mod request;
pub mod response;
pub mod wizard;

pub use analysis::{ExcelFileAnalysis, ExcelSheetInfo, SheetPreviewData, SpreadsheetKind};
pub use field::{LeadFieldDefinition, LeadFieldType};
pub use mapping::{FieldMapping, FieldMappings, MappingError, MatchStrategy, NOTES_FIELD};
pub use request::{ImportRequest, PreviewRequest, DATA_START_ROW};
pub use response::{ExcelUploadResponse, ImportRowError, ImportSummary, RowErrorDigest};
pub use wizard::{
    advance, ImportWizard, RequestKind, RequestTicket, SpreadsheetFile, WizardError, WizardEvent,
    WizardStage,
};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportLeadsFromExcel;

impl UseCaseMetadata for ImportLeadsFromExcel {
    fn usecase_index() -> &'static str {
        "u601"
    }

    fn display_name() -> &'static str {
        "Import leads from Excel"
    }

    fn description() -> &'static str {
        "Upload an .xlsx/.xls/.csv file, map its columns to lead fields and import the rows"
    }
}
