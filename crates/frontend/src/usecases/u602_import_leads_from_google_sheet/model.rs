use contracts::usecases::u602_import_leads_from_google_sheet::{
    GoogleSheetImportRequest, GoogleSheetImportResponse,
};

use crate::shared::api_client::{self, ApiError};

const IMPORT_PATH: &str = "/leads/import/google-sheet";

pub async fn import_google_sheet(
    request: &GoogleSheetImportRequest,
) -> Result<GoogleSheetImportResponse, ApiError> {
    api_client::post_json(IMPORT_PATH, request).await
}
