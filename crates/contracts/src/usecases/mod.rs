pub mod common;
pub mod u601_import_leads_from_excel;
pub mod u602_import_leads_from_google_sheet;
