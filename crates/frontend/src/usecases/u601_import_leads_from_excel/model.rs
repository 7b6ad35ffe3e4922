use contracts::usecases::u601_import_leads_from_excel::{
    ExcelFileAnalysis, ExcelUploadResponse, ImportRequest, LeadFieldDefinition, PreviewRequest,
    SheetPreviewData, SpreadsheetFile,
};

use crate::shared::api_client::{self, form_data, ApiError};

const FIELDS_PATH: &str = "/leads/import/fields";
const ANALYZE_PATH: &str = "/leads/import/analyze";
const PREVIEW_PATH: &str = "/leads/import/preview";
const IMPORT_PATH: &str = "/leads/import";

/// Browser file picked for import
#[derive(Clone, Debug)]
pub struct UploadFile(pub web_sys::File);

impl SpreadsheetFile for UploadFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

/// Lead field schema used for mapping
pub async fn fetch_fields() -> Result<Vec<LeadFieldDefinition>, ApiError> {
    api_client::post_empty(FIELDS_PATH).await
}

/// Upload the file and list its sheets
pub async fn analyze_file(file: &web_sys::File) -> Result<ExcelFileAnalysis, ApiError> {
    let form = form_data(Some(file), &[])?;
    api_client::post_multipart(ANALYZE_PATH, &form).await
}

pub async fn preview_sheet(
    file: &web_sys::File,
    request: &PreviewRequest,
) -> Result<SheetPreviewData, ApiError> {
    let form = form_data(Some(file), &request.form_fields())?;
    api_client::post_multipart(PREVIEW_PATH, &form).await
}

/// Commit the import. Single call, never retried.
pub async fn execute_import(
    file: &web_sys::File,
    request: &ImportRequest,
) -> Result<ExcelUploadResponse, ApiError> {
    let parts = request
        .form_fields()
        .map_err(|e| ApiError::Browser(format!("Failed to serialize mappings: {}", e)))?;
    let form = form_data(Some(file), &parts)?;
    api_client::post_multipart(IMPORT_PATH, &form).await
}
