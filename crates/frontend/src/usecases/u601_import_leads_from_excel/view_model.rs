use super::model::{self, UploadFile};
use crate::shared::config::config;
use crate::shared::toast::{use_toasts, ToastService};
use contracts::usecases::u601_import_leads_from_excel::{
    ImportWizard, RequestKind, WizardError, WizardStage,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

type Wizard = ImportWizard<UploadFile>;

/// ViewModel for the Excel import wizard.
///
/// Owns the wizard in a local signal (browser files are not `Send`) and runs
/// the HTTP calls the wizard hands out tickets for.
#[derive(Clone, Copy)]
pub struct ExcelImportVm {
    pub wizard: RwSignal<Wizard, LocalStorage>,
    fields_loading: RwSignal<bool>,
    toasts: ToastService,
}

impl ExcelImportVm {
    pub fn new() -> Self {
        let vm = Self {
            wizard: RwSignal::new_local(ImportWizard::new(Vec::new())),
            fields_loading: RwSignal::new(false),
            toasts: use_toasts(),
        };
        vm.load_fields();
        vm
    }

    pub fn stage(&self) -> WizardStage {
        self.wizard.with(|w| w.stage())
    }

    pub fn in_flight(&self) -> Option<RequestKind> {
        self.wizard.with(|w| w.in_flight())
    }

    /// Lead field schema is available; mappings cannot be confirmed without it
    pub fn fields_loaded(&self) -> bool {
        self.wizard.with(|w| !w.fields().is_empty())
    }

    pub fn fields_loading(&self) -> bool {
        self.fields_loading.get()
    }

    fn apply<R>(&self, f: impl FnOnce(&mut Wizard) -> R) -> Option<R> {
        self.wizard.try_update(f)
    }

    /// Report a wizard error; stale responses are dropped silently
    fn report(&self, error: WizardError) {
        match error {
            WizardError::StaleResponse => {}
            e => self.toasts.error(e.to_string()),
        }
    }

    fn current_file(&self) -> Option<web_sys::File> {
        self.wizard
            .with_untracked(|w| w.file().map(|f| f.0.clone()))
    }

    /// Load the lead field schema; also used as the retry after a failure
    pub fn load_fields(&self) {
        if self.fields_loading.get_untracked() {
            return;
        }
        self.fields_loading.set(true);
        let vm = *self;
        spawn_local(async move {
            let outcome = model::fetch_fields().await;
            vm.fields_loading.set(false);
            match outcome {
                Ok(fields) => {
                    log::debug!("Loaded {} lead fields", fields.len());
                    vm.apply(|w| w.set_fields(fields));
                }
                Err(e) => vm
                    .toasts
                    .error(format!("Failed to load lead fields: {}", e)),
            }
        });
    }

    /// File chosen in the upload step
    pub fn select_file(&self, file: web_sys::File) {
        let ticket = match self.apply(|w| w.select_file(UploadFile(file.clone()))) {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => return self.report(e),
            None => return,
        };

        let vm = *self;
        spawn_local(async move {
            let outcome = model::analyze_file(&file).await.map_err(|e| e.to_string());
            match vm.apply(|w| w.finish_analysis(ticket, outcome)) {
                Some(Ok(())) => vm.request_preview(),
                Some(Err(e)) => vm.report(e),
                None => {}
            }
        });
    }

    /// Load a preview of the selected sheet
    pub fn request_preview(&self) {
        let Some(file) = self.current_file() else {
            return;
        };
        let (ticket, request) = match self.apply(|w| w.begin_preview(config().import.preview_rows)) {
            Some(Ok(started)) => started,
            Some(Err(WizardError::NoSheetSelected)) => {
                return self
                    .toasts
                    .info("No sheet with data was found. Please choose a sheet.");
            }
            Some(Err(e)) => return self.report(e),
            None => return,
        };

        let vm = *self;
        spawn_local(async move {
            let outcome = model::preview_sheet(&file, &request)
                .await
                .map_err(|e| e.to_string());
            if let Some(Err(e)) = vm.apply(|w| w.finish_preview(ticket, outcome)) {
                vm.report(e);
            }
        });
    }

    pub fn select_sheet(&self, name: String) {
        match self.apply(|w| w.select_sheet(&name)) {
            Some(Ok(())) => self.request_preview(),
            Some(Err(e)) => self.report(e),
            None => {}
        }
    }

    pub fn update_mapping(&self, lead_field: String, excel_column: String) {
        if let Some(Err(e)) = self.apply(|w| w.update_mapping(&lead_field, &excel_column)) {
            self.report(e);
        }
    }

    pub fn add_notes_column(&self, column: String) {
        if let Some(Err(e)) = self.apply(|w| w.add_notes_column(&column)) {
            self.report(e);
        }
    }

    pub fn remove_notes_column(&self, index: usize) {
        if let Some(Err(e)) = self.apply(|w| w.remove_notes_column(index)) {
            self.report(e);
        }
    }

    pub fn add_mapping(&self) {
        match self.apply(|w| w.add_mapping()) {
            Some(Ok(None)) => self.toasts.info("Every lead field is already mapped"),
            Some(Err(e)) => self.report(e),
            _ => {}
        }
    }

    pub fn remove_mapping(&self, lead_field: String) {
        if let Some(Err(e)) = self.apply(|w| w.remove_mapping(&lead_field)) {
            self.report(e);
        }
    }

    /// map → preview
    pub fn confirm_mapping(&self) {
        if let Some(Err(e)) = self.apply(|w| w.confirm_mapping()) {
            self.report(e);
        }
    }

    /// preview → map
    pub fn back_to_mapping(&self) {
        if let Some(Err(e)) = self.apply(|w| w.back_to_mapping()) {
            self.report(e);
        }
    }

    /// preview → import → complete
    pub fn start_import(&self) {
        let Some(file) = self.current_file() else {
            return;
        };
        let (ticket, request) = match self.apply(|w| w.begin_import()) {
            Some(Ok(started)) => started,
            Some(Err(e)) => return self.report(e),
            None => return,
        };

        let vm = *self;
        spawn_local(async move {
            let outcome = model::execute_import(&file, &request).await;
            let message = match &outcome {
                Ok(response) if response.message.is_empty() => Some((
                    response.success,
                    if response.success { "Import finished" } else { "Import failed" }.to_string(),
                )),
                Ok(response) => Some((response.success, response.message.clone())),
                Err(_) => None,
            };

            match vm.apply(|w| w.finish_import(ticket, outcome.map_err(|e| e.to_string()))) {
                Some(Ok(())) => match message {
                    Some((true, message)) => vm.toasts.success(message),
                    Some((false, message)) => vm.toasts.error(message),
                    None => {}
                },
                Some(Err(e)) => vm.report(e),
                None => {}
            }
        });
    }

    pub fn reset(&self) {
        self.apply(|w| w.reset());
    }
}
