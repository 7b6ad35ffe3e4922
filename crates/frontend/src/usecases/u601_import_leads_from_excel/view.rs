use super::mapping_view::{MappingStep, ReviewStep};
use super::view_model::ExcelImportVm;
use crate::shared::config::config;
use crate::shared::format::{format_file_size, pluralize};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::usecases::u602_import_leads_from_google_sheet::duplicate_review::DuplicateReview;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u601_import_leads_from_excel::{
    ImportLeadsFromExcel, SpreadsheetFile, SpreadsheetKind, WizardStage,
};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[component]
pub fn ImportLeadsFromExcelPage() -> impl IntoView {
    let vm = ExcelImportVm::new();

    view! {
        <PageFrame page_id="u601_import_leads_from_excel--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{ImportLeadsFromExcel::title()}</h1>
                    <p class="page__subtitle">{ImportLeadsFromExcel::description()}</p>
                </div>
                <div class="page__header-right">
                    <Show when=move || vm.stage() != WizardStage::Upload>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.reset()>
                            "Start over"
                        </Button>
                    </Show>
                </div>
            </div>

            <div class="page__content">
                <Stepper vm=vm />

                {move || match vm.stage() {
                    WizardStage::Upload => view! { <UploadStep vm=vm /> }.into_any(),
                    WizardStage::Analyze => view! {
                        <BusyNotice text=move || {
                            let name = vm.wizard.with(|w| w.file().map(|f| f.file_name()).unwrap_or_default());
                            format!("Analyzing {}...", name)
                        } />
                    }.into_any(),
                    WizardStage::Map => view! { <MappingStep vm=vm /> }.into_any(),
                    WizardStage::Preview => view! { <ReviewStep vm=vm /> }.into_any(),
                    WizardStage::Import => view! {
                        <BusyNotice text=|| "Importing leads, this may take a moment...".to_string() />
                    }.into_any(),
                    WizardStage::Complete => view! { <CompleteStep vm=vm /> }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}

/// Stage indicator
#[component]
fn Stepper(vm: ExcelImportVm) -> impl IntoView {
    view! {
        <ol class="wizard-steps">
            {WizardStage::ALL
                .into_iter()
                .map(|stage| {
                    let class = move || {
                        let current = vm.stage().index();
                        if stage.index() < current {
                            "wizard-steps__item wizard-steps__item--done"
                        } else if stage.index() == current {
                            "wizard-steps__item wizard-steps__item--active"
                        } else {
                            "wizard-steps__item"
                        }
                    };
                    view! {
                        <li class=class>
                            <span class="wizard-steps__index">{stage.index() + 1}</span>
                            <span class="wizard-steps__label">{stage.label()}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}

#[component]
pub fn BusyNotice<F>(text: F) -> impl IntoView
where
    F: Fn() -> String + Send + Sync + 'static,
{
    view! {
        <div class="wizard-busy">
            <Spinner />
            <span>{text}</span>
        </div>
    }
}

#[component]
fn UploadStep(vm: ExcelImportVm) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(input) = input {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                vm.select_file(file);
            }
            // Allow picking the same file again after a rejection
            input.set_value("");
        }
    };

    view! {
        <Card>
            <div class="upload-step">
                {icon("upload")}
                <p class="upload-step__title">"Upload a spreadsheet with your leads"</p>
                <p class="upload-step__hint">
                    "Supported formats: .xlsx, .xls, .csv. The first row must contain column headers."
                </p>
                <label class="button button--primary" for="lead-file-input">
                    {icon("file")}
                    " Choose file"
                </label>
                <input
                    id="lead-file-input"
                    type="file"
                    accept=SpreadsheetKind::accept_attribute()
                    on:change=on_change
                    class="hidden"
                />
            </div>
        </Card>
    }
}

#[component]
fn CompleteStep(vm: ExcelImportVm) -> impl IntoView {
    let show_duplicates = RwSignal::new(false);
    let response = vm.wizard.with_untracked(|w| w.result().cloned());
    let Some(response) = response else {
        return view! { <></> }.into_any();
    };

    let summary = response.summary();
    let digest = summary.error_digest(config().import.max_displayed_errors);
    let duplicates = response.duplicates().to_vec();
    let duplicates_for_review = duplicates.clone();
    let file_info = vm.wizard.with_untracked(|w| {
        w.file()
            .map(|f| format!("{} ({})", f.file_name(), format_file_size(f.size())))
            .unwrap_or_default()
    });
    let status_class = if response.success {
        "warning-box warning-box--success"
    } else {
        "warning-box warning-box--error"
    };

    view! {
        <Card>
            <div class="import-result">
                <div class=status_class>
                    <span class="warning-box__icon">{icon(if response.success { "check" } else { "alert" })}</span>
                    <span class="warning-box__text">{response.message.clone()}</span>
                </div>
                <p class="import-result__file">{file_info}</p>

                <div class="import-result__stats">
                    <div class="stat">
                        <span class="stat__value">{summary.total_rows}</span>
                        <span class="stat__label">"Total rows"</span>
                    </div>
                    <div class="stat stat--success">
                        <span class="stat__value">{summary.successful_imports}</span>
                        <span class="stat__label">"Imported"</span>
                    </div>
                    <div class="stat stat--error">
                        <span class="stat__value">{summary.failed_imports}</span>
                        <span class="stat__label">"Failed"</span>
                    </div>
                </div>

                {(!digest.shown.is_empty()).then(|| {
                    let overflow = digest.overflow_label();
                    view! {
                        <div class="import-result__errors">
                            <h3>"Row errors"</h3>
                            <ul>
                                {digest.shown.iter().map(|e| view! {
                                    <li>
                                        <strong>{format!("Row {}: ", e.row)}</strong>
                                        {e.message.clone()}
                                    </li>
                                }).collect_view()}
                            </ul>
                            {overflow.map(|label| view! {
                                <p class="import-result__more">{label}</p>
                            })}
                        </div>
                    }
                })}

                {(!duplicates.is_empty()).then(|| {
                    let label = format!(
                        "Review {}",
                        pluralize(duplicates.len() as u64, "duplicate", "duplicates")
                    );
                    view! {
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_duplicates.set(true)>
                            {label}
                        </Button>
                    }
                })}

                <div class="import-result__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.reset()>
                        "Import another file"
                    </Button>
                </div>
            </div>
        </Card>

        <Show when=move || show_duplicates.get()>
            <DuplicateReview
                duplicates=duplicates_for_review.clone()
                on_close=Callback::new(move |_| show_duplicates.set(false))
            />
        </Show>
    }
    .into_any()
}
