pub mod top_header;

use crate::usecases::u601_import_leads_from_excel::ImportLeadsFromExcelPage;
use crate::usecases::u602_import_leads_from_google_sheet::ImportLeadsFromGoogleSheetPage;
use leptos::prelude::*;
use top_header::TopHeader;

/// Source the import page works from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportTab {
    #[default]
    ExcelFile,
    GoogleSheet,
}

impl ImportTab {
    pub const ALL: [ImportTab; 2] = [Self::ExcelFile, Self::GoogleSheet];

    /// Whether the page for `self` is hidden while `active` is selected
    pub fn is_hidden(&self, active: ImportTab) -> bool {
        *self != active
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ExcelFile => "Excel file",
            Self::GoogleSheet => "Google Sheet",
        }
    }
}

/// Application shell:
/// ```text
/// +------------------------------------------+
/// |  TopHeader (brand, tabs, user, logout)    |
/// +------------------------------------------+
/// |  import pages (inactive one hidden)       |
/// +------------------------------------------+
/// ```
#[component]
pub fn MainLayout() -> impl IntoView {
    let active_tab = RwSignal::new(ImportTab::default());

    view! {
        <div class="app-layout">
            <TopHeader active_tab=active_tab />
            <div class="app-main">
                // Both pages stay mounted; switching tabs only toggles visibility
                <div class:hidden=move || ImportTab::ExcelFile.is_hidden(active_tab.get())>
                    <ImportLeadsFromExcelPage />
                </div>
                <div class:hidden=move || ImportTab::GoogleSheet.is_hidden(active_tab.get())>
                    <ImportLeadsFromGoogleSheetPage />
                </div>
            </div>
        </div>
    }
}
