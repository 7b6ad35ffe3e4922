pub mod request;
pub mod response;

pub use request::{GoogleSheetImportRequest, SheetUrlError};
pub use response::GoogleSheetImportResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportLeadsFromGoogleSheet;

impl UseCaseMetadata for ImportLeadsFromGoogleSheet {
    fn usecase_index() -> &'static str {
        "u602"
    }

    fn display_name() -> &'static str {
        "Import leads from Google Sheet"
    }

    fn description() -> &'static str {
        "Import a shared Google Sheet by URL and review the rows flagged as duplicates"
    }
}
